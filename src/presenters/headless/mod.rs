//! A display-less presenter. Drives the GUI owner from a plain thread and
//! renders windows into memory.

pub mod backend;
pub mod doorbell;
pub mod gui;

pub use backend::{BackendLog, Frame, HeadlessBackend};
pub use gui::HeadlessGui;
