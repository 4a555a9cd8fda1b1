pub mod data;
pub mod errors;
pub mod event_queue;
pub mod keys;
pub mod registry;
