/// Wakes the GUI thread's run loop after a request has been enqueued.
///
/// Implementations must be callable from any thread and must not block.
pub trait GuiWaker: Send + Sync {
    fn wake(&self);
}

/// For loops that poll the inbox on their own schedule.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopWaker;

impl GuiWaker for NoopWaker {
    fn wake(&self) {}
}
