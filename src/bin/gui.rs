//! Interactive demo: echoes clicks and keys until Escape, then waits for a
//! final click.

use clap::Parser;
use gfx_bridge::cli::BridgeArgs;
use gfx_bridge::core::keys::KEY_ESCAPE;
use gfx_bridge::{
    BridgeError, Colour, EventKind, GraphicsContext, SubwindowKind, Timeout, UserRuntime,
};

#[derive(Parser, Debug)]
#[command(name = "gui", version, about)]
struct Cli {
    #[command(flatten)]
    bridge: BridgeArgs,
}

fn echo(ctx: &GraphicsContext) -> Result<(), BridgeError> {
    let window = ctx.open_complex_window(
        640,
        480,
        "gfx-bridge",
        &[("canvas", SubwindowKind::Canvas2d), ("view", SubwindowKind::View3d)],
    )?;
    ctx.set_background(Colour::rgb(30, 30, 40))?;
    println!("Clicks and keys in {window} are echoed. Escape stops.");

    loop {
        let event = ctx.get_event(Timeout::Forever)?;
        match event.kind {
            EventKind::ButtonDown => {
                println!("button {} at ({}, {})", event.button, event.x, event.y);
            }
            EventKind::KeyDown if event.key == KEY_ESCAPE => break,
            EventKind::KeyDown => println!("key {}", event.key),
            _ => {}
        }
    }

    ctx.end_graphics()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    gfx_bridge::logging::init_tracing(&cli.bridge.log);

    let runtime = UserRuntime::new().entry_point(|ctx, _args| {
        if let Err(err) = echo(ctx) {
            tracing::error!("gui: {err}");
        }
    });

    gfx_bridge::run_gui(cli.bridge.to_config()?, runtime)?;
    Ok(())
}
