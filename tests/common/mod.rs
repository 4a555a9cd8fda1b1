use std::time::Duration;

use gfx_bridge::{BridgeConfig, HeadlessGui};

pub fn start() -> HeadlessGui {
    start_with(BridgeConfig::default())
}

/// Short poll interval so active-window changes are picked up quickly.
#[allow(dead_code)]
pub fn start_fast() -> HeadlessGui {
    start_with(BridgeConfig {
        poll_interval: Duration::from_millis(5),
        ..BridgeConfig::default()
    })
}

pub fn start_with(config: BridgeConfig) -> HeadlessGui {
    gfx_bridge::logging::init_tracing("warn");
    HeadlessGui::start(config).unwrap()
}
