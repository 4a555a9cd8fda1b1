//! The windowed presenter: a winit event loop on the main thread, one
//! pixels surface per window, and egui for the tab strip.

pub mod events;
pub mod keymap;
pub mod run;
pub mod session;
pub mod surface;
pub mod waker;

pub use run::run_gui;
