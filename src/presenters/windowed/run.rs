use std::sync::Arc;

use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoopBuilder};

use crate::config::BridgeConfig;
use crate::controllers::gui_owner::LoopControl;
use crate::controllers::ports::native_input::NativeInput;
use crate::core::errors::BridgeError;
use crate::presenters::windowed::events::GuiEvent;
use crate::presenters::windowed::session::{SurfaceMap, WinitSession};
use crate::presenters::windowed::waker::ProxyWaker;
use crate::runtime::context::connect;
use crate::runtime::user_runtime::UserRuntime;

/// Runs `runtime` on a user thread and the winit event loop on this one.
///
/// Must be called from the main thread. Returns after the entry point has
/// returned and the GUI owner has shut down.
pub fn run_gui(config: BridgeConfig, runtime: UserRuntime) -> Result<(), BridgeError> {
    config.validate()?;

    let event_loop = EventLoopBuilder::<GuiEvent>::with_user_event()
        .build()
        .map_err(|err| BridgeError::Backend(err.to_string()))?;

    let waker = Arc::new(ProxyWaker::new(event_loop.create_proxy()));
    let (context, mut owner) = connect(config, waker);
    let user = runtime.spawn(context)?;

    let mut surfaces = SurfaceMap::default();
    let mut inputs: Vec<NativeInput> = Vec::new();

    event_loop
        .run(|event, elwt| {
            elwt.set_control_flow(ControlFlow::Wait);

            match event {
                Event::UserEvent(GuiEvent::Wake) => {
                    let mut session = WinitSession::new(elwt, &mut surfaces);
                    if owner.pump(&mut session) == LoopControl::Exit {
                        elwt.exit();
                    }
                }
                Event::WindowEvent { window_id, event } => {
                    let Some(surface) = surfaces.by_window_id(window_id) else {
                        return;
                    };

                    if matches!(event, WindowEvent::RedrawRequested) {
                        match surface.render() {
                            Ok(Some(index)) => inputs.push(NativeInput::TabSelected {
                                window: surface.handle(),
                                index,
                            }),
                            Ok(None) => {}
                            Err(err) => {
                                tracing::error!(
                                    "winit: render of {} failed: {err}",
                                    surface.handle()
                                );
                            }
                        }
                    } else {
                        surface.on_window_event(&event, &mut inputs);
                    }

                    let mut session = WinitSession::new(elwt, &mut surfaces);
                    for input in inputs.drain(..) {
                        owner.dispatch_input(input, &mut session);
                    }
                }
                _ => {}
            }
        })
        .map_err(|err| BridgeError::Backend(err.to_string()))?;

    user.join()
        .map_err(|_| BridgeError::Backend("user thread panicked".to_string()))
}
