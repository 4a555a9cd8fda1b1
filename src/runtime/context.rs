//! The handle user code holds to talk to the GUI thread.
//!
//! A [`GraphicsContext`] is built once per process by [`connect`] and then
//! cloned into whatever needs it. There is no global lookup of the current
//! application or window.

use std::sync::Arc;

use crate::config::BridgeConfig;
use crate::controllers::gui_owner::GuiOwner;
use crate::controllers::invocation::{Invoker, Operation, invocation_channel};
use crate::controllers::ports::waker::GuiWaker;
use crate::core::data::colour::Colour;
use crate::core::data::window::{SubwindowKind, SubwindowSpec, WindowSpec};
use crate::core::data::window_ref::{ActiveTarget, WindowRef};
use crate::core::errors::BridgeError;
use crate::core::event_queue::EventQueue;
use crate::core::registry::{SharedRegistry, shared_registry};

/// Wires up a user-side context and the GUI owner that serves it.
///
/// The owner must be moved to, and driven from, the GUI thread.
#[must_use]
pub fn connect(config: BridgeConfig, waker: Arc<dyn GuiWaker>) -> (GraphicsContext, GuiOwner) {
    let queue = Arc::new(EventQueue::new(config.queue_capacity));
    let registry = shared_registry();
    let (invoker, inbox) = invocation_channel(waker);

    let owner = GuiOwner::new(Arc::clone(&registry), Arc::clone(&queue), inbox);
    let context = GraphicsContext {
        invoker,
        queue,
        registry,
        config: Arc::new(config),
    };

    (context, owner)
}

#[derive(Clone)]
pub struct GraphicsContext {
    pub(crate) invoker: Invoker,
    pub(crate) queue: Arc<EventQueue>,
    pub(crate) registry: SharedRegistry,
    pub(crate) config: Arc<BridgeConfig>,
}

impl GraphicsContext {
    #[must_use]
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    #[must_use]
    pub fn event_queue(&self) -> &Arc<EventQueue> {
        &self.queue
    }

    /// Opens a window described by `spec`. Blocks until it exists.
    pub fn open(&self, spec: WindowSpec) -> Result<WindowRef, BridgeError> {
        self.invoker
            .call(Operation::CreateWindow(spec))?
            .into_window()
    }

    pub fn open_window(
        &self,
        width: u32,
        height: u32,
        title: &str,
    ) -> Result<WindowRef, BridgeError> {
        self.open(WindowSpec::single(width, height, title, SubwindowKind::Canvas2d))
    }

    pub fn open_window_3d(
        &self,
        width: u32,
        height: u32,
        title: &str,
    ) -> Result<WindowRef, BridgeError> {
        self.open(WindowSpec::single(width, height, title, SubwindowKind::View3d))
    }

    /// Opens a tabbed window with one subwindow per `(name, kind)` pair.
    pub fn open_complex_window(
        &self,
        width: u32,
        height: u32,
        title: &str,
        tabs: &[(&str, SubwindowKind)],
    ) -> Result<WindowRef, BridgeError> {
        let subwindows = tabs
            .iter()
            .map(|(name, kind)| SubwindowSpec::new(*name, *kind))
            .collect();

        self.open(WindowSpec::tabbed(width, height, title, subwindows))
    }

    /// # Errors
    ///
    /// [`BridgeError::UnknownWindow`] if `window` is not open. The registry is
    /// left untouched in that case.
    pub fn close_window(&self, window: WindowRef) -> Result<(), BridgeError> {
        self.invoker.call(Operation::CloseWindow(window)).map(drop)
    }

    pub fn set_active_window(
        &self,
        window: WindowRef,
        subwindow: usize,
    ) -> Result<(), BridgeError> {
        self.invoker
            .call(Operation::SetActiveWindow { window, subwindow })
            .map(drop)
    }

    pub fn show_window(&self, window: WindowRef, subwindow: usize) -> Result<(), BridgeError> {
        self.invoker
            .call(Operation::ShowWindow { window, subwindow })
            .map(drop)
    }

    /// Queued: repaints the active subwindow with its background.
    pub fn clear_window(&self) -> Result<(), BridgeError> {
        self.invoker.post(Operation::ClearWindow)
    }

    /// Queued: sets and paints the background of the active subwindow.
    pub fn set_background(&self, colour: Colour) -> Result<(), BridgeError> {
        self.invoker.post(Operation::SetBackground(colour))
    }

    /// Queued: toggles `MouseMove` events for the active subwindow.
    pub fn enable_mouse_tracking(&self, enabled: bool) -> Result<(), BridgeError> {
        self.invoker.post(Operation::EnableMouseTracking(enabled))
    }

    /// Reads back one pixel of the active subwindow.
    pub fn capture_pixel(&self, x: i32, y: i32) -> Result<Colour, BridgeError> {
        self.invoker
            .call(Operation::CapturePixel { x, y })?
            .into_pixel()
    }

    /// Returns once every request submitted earlier has been executed.
    pub fn sync(&self) -> Result<(), BridgeError> {
        self.invoker.call(Operation::Sync).map(drop)
    }

    #[must_use]
    pub fn active_window(&self) -> Option<ActiveTarget> {
        self.registry.lock().active()
    }

    #[must_use]
    pub fn window_count(&self) -> usize {
        self.registry.lock().len()
    }

    /// Asks the GUI thread to leave its run loop.
    pub fn request_shutdown(&self) -> Result<(), BridgeError> {
        self.invoker.post(Operation::Shutdown)
    }

    /// Prompts on the console and waits for a click in any window.
    pub fn end_graphics(&self) -> Result<(), BridgeError> {
        println!("Click in a window to end the program...");
        self.any_click().map(drop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::gui_owner::LoopControl;
    use crate::controllers::ports::native_backend::NativeBackend;
    use crate::controllers::ports::waker::NoopWaker;
    use crate::core::data::window::Window;
    use std::thread;

    struct NullBackend;

    impl NativeBackend for NullBackend {
        fn open_window(&mut self, _window: &Window) -> Result<(), BridgeError> {
            Ok(())
        }

        fn close_window(&mut self, _window: WindowRef) -> Result<(), BridgeError> {
            Ok(())
        }

        fn raise_window(&mut self, _window: &Window, _subwindow: usize) -> Result<(), BridgeError> {
            Ok(())
        }

        fn present(&mut self, _window: &Window) {}
    }

    fn spawn_owner(mut owner: GuiOwner) -> thread::JoinHandle<()> {
        thread::spawn(move || owner.run(&mut NullBackend))
    }

    #[test]
    fn test_open_complex_window_builds_tabs() {
        let (context, owner) = connect(BridgeConfig::default(), Arc::new(NoopWaker));
        let gui = spawn_owner(owner);

        let handle = context
            .open_complex_window(
                40,
                30,
                "complex",
                &[("plot", SubwindowKind::Canvas2d), ("mesh", SubwindowKind::View3d)],
            )
            .unwrap();

        {
            let registry = context.registry.lock();
            let window = registry.get(handle).unwrap();
            assert_eq!(window.subwindow_count(), 2);
            assert_eq!(window.tabs.as_ref().unwrap().names[1], "mesh");
        }

        context.request_shutdown().unwrap();
        gui.join().unwrap();
    }

    #[test]
    fn test_window_lifecycle_round_trip() {
        let (context, owner) = connect(BridgeConfig::default(), Arc::new(NoopWaker));
        let gui = spawn_owner(owner);

        let handle = context.open_window(20, 20, "lifecycle").unwrap();
        assert_eq!(context.window_count(), 1);
        assert_eq!(context.active_window().map(|a| a.window), Some(handle));

        context.close_window(handle).unwrap();
        assert_eq!(context.window_count(), 0);
        assert_eq!(context.active_window(), None);

        assert!(matches!(
            context.close_window(handle),
            Err(BridgeError::UnknownWindow(_))
        ));

        context.request_shutdown().unwrap();
        gui.join().unwrap();
    }

    #[test]
    fn test_calls_after_shutdown_report_disconnected() {
        let (context, mut owner) = connect(BridgeConfig::default(), Arc::new(NoopWaker));

        context.request_shutdown().unwrap();
        assert_eq!(owner.pump(&mut NullBackend), LoopControl::Exit);
        drop(owner);

        assert!(matches!(
            context.open_window(10, 10, "late"),
            Err(BridgeError::Disconnected)
        ));
    }
}
