//! User-thread side: the context object, blocking input, timing, and the
//! runtime that hosts the application entry point.

pub mod context;
pub mod input;
pub mod timing;
pub mod user_runtime;
