//! Cross-thread invocation protocol.
//!
//! The user thread submits [`Operation`]s either as blocking calls
//! (request/response) or as queued calls (fire-and-forget). The GUI thread
//! drains them strictly in arrival order.

mod channel;
mod request;

pub use channel::{Inbound, InvocationInbox, Invoker, invocation_channel};
pub use request::{InvocationRequest, Operation, Outcome, Reply, ResultSlot};
