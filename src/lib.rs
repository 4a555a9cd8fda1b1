//! Runs application code on a user thread while a single GUI thread owns
//! every window.
//!
//! User code holds a [`GraphicsContext`]. Window operations travel to the GUI
//! thread through one ordered invocation channel; input travels back through
//! a bounded [`EventQueue`](crate::core::event_queue::EventQueue).

pub mod adapters;
pub mod cli;
pub mod config;
pub mod controllers;
pub mod core;
pub mod logging;
pub mod presenters;
pub mod runtime;

pub use crate::config::BridgeConfig;
pub use crate::core::data::colour::Colour;
pub use crate::core::data::event::{Event, EventKind, Modifiers};
pub use crate::core::data::window::{SubwindowKind, WindowSpec};
pub use crate::core::data::window_ref::{ActiveTarget, WindowRef};
pub use crate::core::errors::BridgeError;
pub use crate::presenters::headless::HeadlessGui;
#[cfg(feature = "gui")]
pub use crate::presenters::windowed::run_gui;
pub use crate::runtime::context::GraphicsContext;
pub use crate::runtime::input::{KeyPress, MouseClick, Timeout};
pub use crate::runtime::user_runtime::UserRuntime;
