use crate::core::data::event::Modifiers;
use crate::core::data::window_ref::WindowRef;

/// Input as reported by a native backend, before it is resolved against the
/// registry and turned into an [`Event`](crate::core::data::event::Event).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeInput {
    Button {
        window: WindowRef,
        x: i32,
        y: i32,
        button: i32,
        pressed: bool,
        modifiers: Modifiers,
    },
    Key {
        window: WindowRef,
        key: i32,
        pressed: bool,
        modifiers: Modifiers,
    },
    Motion {
        window: WindowRef,
        x: i32,
        y: i32,
    },
    /// The user picked a tab in a complex window.
    TabSelected { window: WindowRef, index: usize },
    /// The window manager asked for the window to close.
    CloseRequested { window: WindowRef },
}
