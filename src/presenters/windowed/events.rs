/// User events for the winit event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuiEvent {
    /// The invocation inbox has requests waiting.
    ///
    /// Wakes coalesce freely: one pump drains everything that is pending.
    Wake,
}
