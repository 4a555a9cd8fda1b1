use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use parking_lot::Mutex;

use crate::config::BridgeConfig;
use crate::controllers::gui_owner::{GuiOwner, LoopControl};
use crate::controllers::invocation::Inbound;
use crate::controllers::ports::native_input::NativeInput;
use crate::controllers::ports::waker::GuiWaker;
use crate::core::data::event::Modifiers;
use crate::core::data::window_ref::WindowRef;
use crate::core::errors::BridgeError;
use crate::presenters::headless::backend::{BackendLog, HeadlessBackend};
use crate::presenters::headless::doorbell::Doorbell;
use crate::runtime::context::{GraphicsContext, connect};
use crate::runtime::user_runtime::UserRuntime;

/// A GUI thread driving a [`HeadlessBackend`].
///
/// Input is injected from any thread and reaches the user side through the
/// same path native input would take.
pub struct HeadlessGui {
    context: GraphicsContext,
    input: Sender<NativeInput>,
    doorbell: Arc<Doorbell>,
    log: Arc<Mutex<BackendLog>>,
    gui_thread: Option<JoinHandle<()>>,
}

impl HeadlessGui {
    pub fn start(config: BridgeConfig) -> Result<Self, BridgeError> {
        Self::start_with(config, HeadlessBackend::default())
    }

    pub fn start_with(config: BridgeConfig, backend: HeadlessBackend) -> Result<Self, BridgeError> {
        config.validate()?;

        let doorbell = Arc::new(Doorbell::default());
        let waker: Arc<dyn GuiWaker> = Arc::clone(&doorbell) as Arc<dyn GuiWaker>;
        let (context, owner) = connect(config, waker);
        let (input, native_rx) = mpsc::channel();
        let log = backend.log();

        let bell = Arc::clone(&doorbell);
        let gui_thread = thread::Builder::new()
            .name("gui".to_string())
            .spawn(move || gui_loop(owner, backend, &bell, &native_rx))?;

        Ok(Self {
            context,
            input,
            doorbell,
            log,
            gui_thread: Some(gui_thread),
        })
    }

    /// The user-side handle. Clone it into user threads.
    #[must_use]
    pub fn context(&self) -> &GraphicsContext {
        &self.context
    }

    pub fn inject(&self, input: NativeInput) {
        // Once the GUI thread is gone, input has nowhere to go.
        if self.input.send(input).is_ok() {
            self.doorbell.wake();
        }
    }

    /// Press then release of `button` at `(x, y)`.
    pub fn inject_click(&self, window: WindowRef, x: i32, y: i32, button: i32) {
        for pressed in [true, false] {
            self.inject(NativeInput::Button {
                window,
                x,
                y,
                button,
                pressed,
                modifiers: Modifiers::empty(),
            });
        }
    }

    pub fn inject_button_down(&self, window: WindowRef, x: i32, y: i32, button: i32) {
        self.inject(NativeInput::Button {
            window,
            x,
            y,
            button,
            pressed: true,
            modifiers: Modifiers::empty(),
        });
    }

    /// Press then release of `key`.
    pub fn inject_key(&self, window: WindowRef, key: i32, modifiers: Modifiers) {
        for pressed in [true, false] {
            self.inject(NativeInput::Key {
                window,
                key,
                pressed,
                modifiers,
            });
        }
    }

    pub fn inject_motion(&self, window: WindowRef, x: i32, y: i32) {
        self.inject(NativeInput::Motion { window, x, y });
    }

    pub fn select_tab(&self, window: WindowRef, index: usize) {
        self.inject(NativeInput::TabSelected { window, index });
    }

    pub fn request_close(&self, window: WindowRef) {
        self.inject(NativeInput::CloseRequested { window });
    }

    /// Returns once everything injected or requested so far has been handled.
    pub fn settle(&self) -> Result<(), BridgeError> {
        self.context.sync()
    }

    #[must_use]
    pub fn backend_log(&self) -> BackendLog {
        self.log.lock().clone()
    }

    /// Runs `runtime` on a user thread and waits for both threads to finish.
    pub fn run(mut self, runtime: UserRuntime) -> Result<(), BridgeError> {
        let user = runtime.spawn(self.context.clone())?;
        let user_result = user
            .join()
            .map_err(|_| BridgeError::Backend("user thread panicked".to_string()));

        self.join_gui()?;
        user_result
    }

    pub fn shutdown(mut self) -> Result<(), BridgeError> {
        if let Err(err) = self.context.request_shutdown() {
            tracing::debug!("headless: GUI thread already stopped: {err}");
        }
        self.join_gui()
    }

    fn join_gui(&mut self) -> Result<(), BridgeError> {
        match self.gui_thread.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| BridgeError::Backend("GUI thread panicked".to_string())),
            None => Ok(()),
        }
    }
}

impl Drop for HeadlessGui {
    fn drop(&mut self) {
        if self.gui_thread.is_some() {
            let _ = self.context.request_shutdown();
            if let Err(err) = self.join_gui() {
                tracing::error!("headless: {err}");
            }
        }
    }
}

/// Injected input is drained after each request is taken and before it
/// runs. Input sent before a request is visible once the request is, so a
/// blocking call made after an injection returns only once that input is
/// queued.
fn gui_loop(
    mut owner: GuiOwner,
    mut backend: HeadlessBackend,
    doorbell: &Doorbell,
    native_rx: &Receiver<NativeInput>,
) {
    tracing::info!("headless: GUI loop started");

    'wake: loop {
        doorbell.wait();

        loop {
            let next = owner.next_request();

            while let Ok(input) = native_rx.try_recv() {
                owner.dispatch_input(input, &mut backend);
            }

            match next {
                Inbound::Request(request) => {
                    if owner.handle(request, &mut backend) == LoopControl::Exit {
                        break 'wake;
                    }
                }
                Inbound::Empty => break,
                Inbound::Closed => {
                    tracing::info!("headless: all invokers dropped");
                    break 'wake;
                }
            }
        }
    }

    tracing::info!("headless: GUI loop stopped");
}
