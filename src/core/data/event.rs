use bitflags::bitflags;

use crate::core::data::window_ref::{ActiveTarget, WindowRef};

bitflags! {
    /// Modifier keys held down when an event was generated.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const CONTROL = 0b0010;
        const ALT = 0b0100;
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum EventKind {
    /// No event. Returned by `get_event` when the timeout elapsed.
    #[default]
    None,
    ButtonDown,
    ButtonUp,
    KeyDown,
    KeyUp,
    /// Pointer motion, only produced for subwindows with mouse tracking enabled.
    MouseMove,
}

impl EventKind {
    #[must_use]
    pub fn is_key(self) -> bool {
        matches!(self, Self::KeyDown | Self::KeyUp)
    }
}

/// An input event as seen by user code.
///
/// Events are plain values: they are copied into the queue by the GUI thread
/// and copied out again by the user thread.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Event {
    pub kind: EventKind,
    pub x: i32,
    pub y: i32,
    pub button: i32,
    pub key: i32,
    pub modifiers: Modifiers,
    pub window: Option<WindowRef>,
    pub subwindow: usize,
}

impl Event {
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn button_down(target: ActiveTarget, x: i32, y: i32, button: i32) -> Self {
        Self {
            kind: EventKind::ButtonDown,
            x,
            y,
            button,
            window: Some(target.window),
            subwindow: target.subwindow,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn button_up(target: ActiveTarget, x: i32, y: i32, button: i32) -> Self {
        Self {
            kind: EventKind::ButtonUp,
            ..Self::button_down(target, x, y, button)
        }
    }

    #[must_use]
    pub fn key_down(target: ActiveTarget, key: i32, modifiers: Modifiers) -> Self {
        Self {
            kind: EventKind::KeyDown,
            key,
            modifiers,
            window: Some(target.window),
            subwindow: target.subwindow,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn key_up(target: ActiveTarget, key: i32, modifiers: Modifiers) -> Self {
        Self {
            kind: EventKind::KeyUp,
            ..Self::key_down(target, key, modifiers)
        }
    }

    #[must_use]
    pub fn mouse_move(target: ActiveTarget, x: i32, y: i32) -> Self {
        Self {
            kind: EventKind::MouseMove,
            x,
            y,
            window: Some(target.window),
            subwindow: target.subwindow,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// The window/subwindow pair this event was generated in, if any.
    #[must_use]
    pub fn target(&self) -> Option<ActiveTarget> {
        self.window.map(|window| ActiveTarget {
            window,
            subwindow: self.subwindow,
        })
    }

    #[must_use]
    pub fn is_in(&self, target: ActiveTarget) -> bool {
        self.target() == Some(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> ActiveTarget {
        ActiveTarget {
            window: WindowRef::from_raw(1),
            subwindow: 2,
        }
    }

    #[test]
    fn test_none_event_has_no_target() {
        let event = Event::none();

        assert_eq!(event.kind, EventKind::None);
        assert_eq!(event.target(), None);
    }

    #[test]
    fn test_button_down_carries_target_and_position() {
        let event = Event::button_down(target(), 10, 20, 1);

        assert_eq!(event.kind, EventKind::ButtonDown);
        assert_eq!((event.x, event.y, event.button), (10, 20, 1));
        assert!(event.is_in(target()));
    }

    #[test]
    fn test_key_up_keeps_modifiers() {
        let event = Event::key_up(target(), 'a' as i32, Modifiers::SHIFT | Modifiers::ALT);

        assert_eq!(event.kind, EventKind::KeyUp);
        assert!(event.kind.is_key());
        assert!(event.modifiers.contains(Modifiers::SHIFT));
        assert!(!event.modifiers.contains(Modifiers::CONTROL));
    }

    #[test]
    fn test_is_in_rejects_other_subwindow() {
        let event = Event::mouse_move(target(), 0, 0);
        let other = ActiveTarget {
            subwindow: 0,
            ..target()
        };

        assert!(!event.is_in(other));
    }
}
