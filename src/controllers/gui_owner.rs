//! The GUI-thread side of the bridge.
//!
//! [`GuiOwner`] executes invocation requests in arrival order and turns
//! native input into queued events. The registry lock is held only while
//! the registry is read or mutated; native calls run after it is released,
//! against a copy of the affected window.

use std::sync::Arc;

use crate::controllers::invocation::{
    Inbound, InvocationInbox, InvocationRequest, Operation, Outcome,
};
use crate::controllers::ports::native_backend::NativeBackend;
use crate::controllers::ports::native_input::NativeInput;
use crate::core::data::event::Event;
use crate::core::data::window::Window;
use crate::core::data::window_ref::ActiveTarget;
use crate::core::errors::BridgeError;
use crate::core::event_queue::EventQueue;
use crate::core::registry::SharedRegistry;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Lives on the GUI thread. Executes invocation requests against the
/// registry and the native backend, and turns native input into events.
pub struct GuiOwner {
    registry: SharedRegistry,
    queue: Arc<EventQueue>,
    inbox: InvocationInbox,
}

impl GuiOwner {
    pub fn new(registry: SharedRegistry, queue: Arc<EventQueue>, inbox: InvocationInbox) -> Self {
        Self {
            registry,
            queue,
            inbox,
        }
    }

    #[must_use]
    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }

    #[must_use]
    pub fn queue(&self) -> &Arc<EventQueue> {
        &self.queue
    }

    /// Takes the next pending request without running it.
    ///
    /// For loops that interleave other work between requests; run the
    /// request with [`handle`](Self::handle).
    pub fn next_request(&self) -> Inbound {
        self.inbox.try_next()
    }

    /// Executes every pending request, in arrival order, without blocking.
    pub fn pump<B: NativeBackend + ?Sized>(&mut self, backend: &mut B) -> LoopControl {
        loop {
            match self.next_request() {
                Inbound::Request(request) => {
                    if self.handle(request, backend) == LoopControl::Exit {
                        return LoopControl::Exit;
                    }
                }
                Inbound::Empty => return LoopControl::Continue,
                Inbound::Closed => {
                    tracing::info!("gui-owner: all invokers dropped, stopping");
                    return LoopControl::Exit;
                }
            }
        }
    }

    /// Blocks on the inbox until shutdown. For loops with nothing else to wait on.
    pub fn run<B: NativeBackend + ?Sized>(&mut self, backend: &mut B) {
        while let Inbound::Request(request) = self.inbox.next() {
            if self.handle(request, backend) == LoopControl::Exit {
                return;
            }
        }

        tracing::info!("gui-owner: all invokers dropped, stopping");
    }

    pub fn handle<B: NativeBackend + ?Sized>(
        &mut self,
        request: InvocationRequest,
        backend: &mut B,
    ) -> LoopControl {
        let seq = request.seq();
        let name = request.operation().name();
        let control = if matches!(request.operation(), Operation::Shutdown) {
            LoopControl::Exit
        } else {
            LoopControl::Continue
        };

        match request {
            InvocationRequest::Blocking {
                operation, reply, ..
            } => {
                tracing::debug!("gui-owner: #{seq} blocking {name}");

                let result = self.apply(operation, backend);
                if let Err(err) = &result {
                    tracing::warn!("gui-owner: #{seq} {name} failed: {err}");
                }

                // The caller may have given up; nothing to do then.
                let _ = reply.send(result);
            }
            InvocationRequest::Queued { operation, .. } => {
                tracing::debug!("gui-owner: #{seq} queued {name}");

                if let Err(err) = self.apply(operation, backend) {
                    tracing::warn!("gui-owner: #{seq} {name} skipped: {err}");
                }
            }
        }

        control
    }

    fn apply<B: NativeBackend + ?Sized>(
        &mut self,
        operation: Operation,
        backend: &mut B,
    ) -> Result<Outcome, BridgeError> {
        match operation {
            Operation::CreateWindow(spec) => {
                let window = self.registry.lock().prepare(&spec)?;

                // Registered only once the native side exists.
                backend.open_window(&window)?;
                let id = self.registry.lock().insert(window);

                tracing::info!(
                    "gui-owner: opened {id} {}x{} with {} subwindow(s)",
                    spec.width,
                    spec.height,
                    spec.subwindows.len()
                );
                Ok(Outcome::Window(id))
            }
            Operation::CloseWindow(window) => {
                self.registry.lock().remove(window)?;

                backend.close_window(window)?;
                tracing::info!("gui-owner: closed {window}");
                Ok(Outcome::Done)
            }
            Operation::SetActiveWindow { window, subwindow } => {
                self.registry.lock().set_active(window, subwindow)?;
                Ok(Outcome::Done)
            }
            Operation::ShowWindow { window, subwindow } => {
                let mut shown = {
                    let registry = self.registry.lock();
                    registry.check_bounds(window, subwindow)?;
                    registry
                        .get(window)
                        .cloned()
                        .ok_or(BridgeError::UnknownWindow(window))?
                };
                shown.select(subwindow);

                // Nothing changes unless the native raise succeeded.
                backend.raise_window(&shown, subwindow)?;
                self.registry.lock().show(window, subwindow)?;
                backend.present(&shown);
                Ok(Outcome::Done)
            }
            Operation::ClearWindow => {
                let shown = {
                    let mut registry = self.registry.lock();
                    registry.active_subwindow_mut()?.clear();
                    registry.active_window().cloned()
                };
                present(shown, backend);
                Ok(Outcome::Done)
            }
            Operation::SetBackground(colour) => {
                let shown = {
                    let mut registry = self.registry.lock();
                    registry.active_subwindow_mut()?.set_background(colour);
                    registry.active_window().cloned()
                };
                present(shown, backend);
                Ok(Outcome::Done)
            }
            Operation::EnableMouseTracking(enabled) => {
                self.registry
                    .lock()
                    .active_subwindow_mut()?
                    .set_mouse_tracking(enabled);
                Ok(Outcome::Done)
            }
            Operation::CapturePixel { x, y } => {
                let registry = self.registry.lock();
                let subwindow = registry
                    .active_subwindow()
                    .ok_or(BridgeError::NoActiveWindow)?;

                Ok(Outcome::Pixel(subwindow.surface().pixel(x, y)?))
            }
            Operation::Sync => Ok(Outcome::Done),
            Operation::Shutdown => {
                tracing::info!("gui-owner: shutdown requested");
                Ok(Outcome::Done)
            }
        }
    }

    /// Converts native input into an event and queues it for the user thread.
    ///
    /// The registry lock is released before the backend or the event queue
    /// is touched.
    pub fn dispatch_input<B: NativeBackend + ?Sized>(
        &mut self,
        input: NativeInput,
        backend: &mut B,
    ) {
        let window = match input {
            NativeInput::Button { window, .. }
            | NativeInput::Key { window, .. }
            | NativeInput::Motion { window, .. }
            | NativeInput::TabSelected { window, .. }
            | NativeInput::CloseRequested { window } => window,
        };

        let (event, shown) = {
            let mut registry = self.registry.lock();

            let Some(target) = registry.get_mut(window) else {
                tracing::trace!("gui-owner: input for closed {window} dropped");
                return;
            };

            let origin = ActiveTarget {
                window,
                subwindow: target.active_subwindow,
            };
            let mut selected_tab = None;
            let mut shown = None;

            let event = match input {
                NativeInput::Button {
                    x,
                    y,
                    button,
                    pressed,
                    modifiers,
                    ..
                } => {
                    let event = if pressed {
                        Event::button_down(origin, x, y, button)
                    } else {
                        Event::button_up(origin, x, y, button)
                    };
                    Some(event.with_modifiers(modifiers))
                }
                NativeInput::Key {
                    key,
                    pressed,
                    modifiers,
                    ..
                } => Some(if pressed {
                    Event::key_down(origin, key, modifiers)
                } else {
                    Event::key_up(origin, key, modifiers)
                }),
                NativeInput::Motion { x, y, .. } => target
                    .subwindow(origin.subwindow)
                    .is_some_and(|sub| sub.mouse_tracking())
                    .then(|| Event::mouse_move(origin, x, y)),
                NativeInput::TabSelected { index, .. } => {
                    if index < target.subwindow_count() {
                        target.select(index);
                        shown = Some(target.clone());
                        selected_tab = Some(index);
                    }
                    None
                }
                NativeInput::CloseRequested { .. } => {
                    tracing::info!(
                        "gui-owner: close request for {window} ignored, \
                         windows close from user code"
                    );
                    None
                }
            };

            // The active target follows tab changes in the active window.
            if let Some(index) = selected_tab {
                if registry.active().is_some_and(|active| active.window == window) {
                    let _ = registry.set_active(window, index);
                }
            }

            (event, shown)
        };

        present(shown, backend);

        if let Some(event) = event {
            self.queue.push(event);
        }
    }
}

fn present<B: NativeBackend + ?Sized>(window: Option<Window>, backend: &mut B) {
    if let Some(window) = window {
        backend.present(&window);
    }
}
