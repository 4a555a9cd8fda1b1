use std::sync::mpsc::SyncSender;

use crate::core::data::colour::Colour;
use crate::core::data::window::WindowSpec;
use crate::core::data::window_ref::WindowRef;
use crate::core::errors::BridgeError;

/// An operation the user thread asks the GUI thread to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    CreateWindow(WindowSpec),
    CloseWindow(WindowRef),
    SetActiveWindow { window: WindowRef, subwindow: usize },
    ShowWindow { window: WindowRef, subwindow: usize },
    ClearWindow,
    SetBackground(Colour),
    EnableMouseTracking(bool),
    CapturePixel { x: i32, y: i32 },
    /// Does nothing. A blocking round trip acts as a barrier.
    Sync,
    /// Stops the GUI run loop. Sent when the user entry point returns.
    Shutdown,
}

impl Operation {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateWindow(_) => "create_window",
            Self::CloseWindow(_) => "close_window",
            Self::SetActiveWindow { .. } => "set_active_window",
            Self::ShowWindow { .. } => "show_window",
            Self::ClearWindow => "clear_window",
            Self::SetBackground(_) => "set_background",
            Self::EnableMouseTracking(_) => "enable_mouse_tracking",
            Self::CapturePixel { .. } => "capture_pixel",
            Self::Sync => "sync",
            Self::Shutdown => "shutdown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    Window(WindowRef),
    Pixel(Colour),
}

impl Outcome {
    pub fn into_window(self) -> Result<WindowRef, BridgeError> {
        match self {
            Self::Window(window) => Ok(window),
            other => Err(unexpected(other)),
        }
    }

    pub fn into_pixel(self) -> Result<Colour, BridgeError> {
        match self {
            Self::Pixel(colour) => Ok(colour),
            other => Err(unexpected(other)),
        }
    }
}

fn unexpected(outcome: Outcome) -> BridgeError {
    BridgeError::Backend(format!("unexpected reply {outcome:?}"))
}

pub type Reply = Result<Outcome, BridgeError>;

/// Where the GUI thread writes the result of a blocking call.
pub type ResultSlot = SyncSender<Reply>;

/// A request travelling from the user thread to the GUI thread.
///
/// Consumed exactly once by the GUI owner. `seq` is assigned at submission
/// and only used for tracing.
#[derive(Debug)]
pub enum InvocationRequest {
    Blocking {
        seq: u64,
        operation: Operation,
        reply: ResultSlot,
    },
    Queued {
        seq: u64,
        operation: Operation,
    },
}

impl InvocationRequest {
    #[must_use]
    pub fn seq(&self) -> u64 {
        match self {
            Self::Blocking { seq, .. } | Self::Queued { seq, .. } => *seq,
        }
    }

    #[must_use]
    pub fn operation(&self) -> &Operation {
        match self {
            Self::Blocking { operation, .. } | Self::Queued { operation, .. } => operation,
        }
    }
}
