//! Error types shared by the GUI owner, the invocation protocol and the
//! user-thread runtime.

use thiserror::Error;

use crate::config::ConfigError;
use crate::core::data::canvas::CanvasError;
use crate::core::data::window_ref::WindowRef;

#[derive(Debug, Error)]
pub enum BridgeError {
    /// The handle was never returned by window creation, or was already closed.
    #[error("unknown window handle {0}")]
    UnknownWindow(WindowRef),

    #[error("subwindow {index} out of bounds for {window} ({count} subwindows)")]
    SubwindowOutOfBounds {
        window: WindowRef,
        index: usize,
        count: usize,
    },

    /// An operation that targets the active window ran while none was set.
    #[error("no active window")]
    NoActiveWindow,

    #[error("pixel at x:{x}, y:{y} is outside of the active subwindow")]
    PixelOutOfBounds { x: i32, y: i32 },

    #[error("invalid window spec: {0}")]
    InvalidWindowSpec(String),

    /// The GUI thread is gone; no request can be delivered or answered.
    #[error("GUI thread disconnected")]
    Disconnected,

    #[error("no user entry point registered")]
    NoEntryPoint,

    #[error("native backend error: {0}")]
    Backend(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<CanvasError> for BridgeError {
    fn from(err: CanvasError) -> Self {
        match err {
            CanvasError::PixelOutsideBounds { x, y, .. } => Self::PixelOutOfBounds { x, y },
            CanvasError::InvalidSize { .. } => Self::InvalidWindowSpec(err.to_string()),
        }
    }
}
