use parking_lot::Mutex;
use winit::event_loop::EventLoopProxy;

use crate::controllers::ports::waker::GuiWaker;
use crate::presenters::windowed::events::GuiEvent;

/// Wakes the winit event loop by sending it a [`GuiEvent::Wake`].
pub struct ProxyWaker {
    proxy: Mutex<EventLoopProxy<GuiEvent>>,
}

impl ProxyWaker {
    #[must_use]
    pub fn new(proxy: EventLoopProxy<GuiEvent>) -> Self {
        Self {
            proxy: Mutex::new(proxy),
        }
    }
}

impl GuiWaker for ProxyWaker {
    fn wake(&self) {
        if self.proxy.lock().send_event(GuiEvent::Wake).is_err() {
            tracing::trace!("winit: event loop closed, wake dropped");
        }
    }
}
