//! Headless demo: runs a small user program against the in-memory GUI and
//! drives it with scripted input.

use std::time::{Duration, Instant};

use clap::Parser;
use gfx_bridge::cli::BridgeArgs;
use gfx_bridge::core::keys::KEY_RETURN;
use gfx_bridge::runtime::timing::milli_sleep;
use gfx_bridge::{
    BridgeError, Colour, GraphicsContext, HeadlessGui, Modifiers, SubwindowKind, UserRuntime,
    WindowRef,
};

const SCRIPT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Parser, Debug)]
#[command(name = "gfx-bridge", version, about)]
struct Cli {
    #[command(flatten)]
    bridge: BridgeArgs,
}

fn demo(ctx: &GraphicsContext, _args: &[String]) {
    if let Err(err) = run_demo(ctx) {
        tracing::error!("demo: {err}");
    }
}

fn run_demo(ctx: &GraphicsContext) -> Result<(), BridgeError> {
    ctx.open_window(200, 150, "first")?;

    let click = ctx.get_mouse()?;
    println!("click at ({}, {}) with button {}", click.x, click.y, click.button);

    let key = ctx.get_key(false)?;
    println!("key {}", key.key);

    let tabbed = ctx.open_complex_window(
        300,
        200,
        "tabs",
        &[("plot", SubwindowKind::Canvas2d), ("scene", SubwindowKind::View3d)],
    )?;
    ctx.show_window(tabbed, 1)?;
    ctx.set_background(Colour::BLUE)?;
    let pixel = ctx.capture_pixel(0, 0)?;
    println!("background of {tabbed} tab 1 reads {pixel:?}");

    ctx.end_graphics()
}

fn wait_until(what: &str, mut done: impl FnMut() -> bool) -> Result<(), BridgeError> {
    let started = Instant::now();
    while !done() {
        if started.elapsed() > SCRIPT_TIMEOUT {
            return Err(BridgeError::Backend(format!("timed out waiting for {what}")));
        }
        milli_sleep(5);
    }
    Ok(())
}

fn active_window(gui: &HeadlessGui) -> Result<WindowRef, BridgeError> {
    gui.context()
        .active_window()
        .map(|active| active.window)
        .ok_or(BridgeError::NoActiveWindow)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    gfx_bridge::logging::init_tracing(&cli.bridge.log);

    let gui = HeadlessGui::start(cli.bridge.to_config()?)?;
    let user = UserRuntime::new()
        .args(std::env::args())
        .entry_point(demo)
        .spawn(gui.context().clone())?;

    wait_until("first window", || gui.context().window_count() == 1)?;
    let first = active_window(&gui)?;
    gui.inject_click(first, 20, 30, 1);
    gui.inject_key(first, KEY_RETURN, Modifiers::empty());

    wait_until("tabbed window", || {
        gui.context()
            .active_window()
            .is_some_and(|active| active.window != first && active.subwindow == 1)
    })?;
    let tabbed = active_window(&gui)?;
    gui.inject_click(tabbed, 5, 5, 1);

    user.join()
        .map_err(|_| BridgeError::Backend("user thread panicked".to_string()))?;
    gui.shutdown()?;

    Ok(())
}
