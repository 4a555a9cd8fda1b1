pub mod canvas;
pub mod colour;
pub mod event;
pub mod window;
pub mod window_ref;
