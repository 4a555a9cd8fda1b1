//! Port definitions for the GUI owner.
//!
//! Contains the traits a native windowing backend implements, and the wake-up
//! hook the user thread uses to nudge an idle GUI loop.

pub mod native_backend;
pub mod native_input;
pub mod waker;
