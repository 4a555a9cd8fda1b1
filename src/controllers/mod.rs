//! Application layer: the GUI owner and the protocol the user thread uses
//! to reach it.
//!
//! # Architecture
//!
//! Follows the ports & adapters pattern:
//! - **Input**: [`invocation::Operation`]s submitted by the user thread
//! - **Output**: [`ports::native_backend::NativeBackend`] for native windowing
//! - **Core**: registry and event queue from `core/`

pub mod gui_owner;
pub mod invocation;
pub mod ports;
