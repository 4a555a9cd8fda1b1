//! Blocking input primitives used by user code.
//!
//! Every wait parks on the event queue's condition variable. Waits that are
//! restricted to the active window wake at least once per poll interval to
//! re-read the active target, which can change while they are parked.

use std::time::{Duration, Instant};

use crate::core::data::event::{Event, EventKind, Modifiers};
use crate::core::data::window_ref::ActiveTarget;
use crate::core::errors::BridgeError;
use crate::core::keys::{is_modifier_key, normalize_key};
use crate::runtime::context::GraphicsContext;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MouseClick {
    pub x: i32,
    pub y: i32,
    pub button: i32,
    pub target: ActiveTarget,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct KeyPress {
    pub key: i32,
    pub modifiers: Modifiers,
    pub target: ActiveTarget,
}

/// How long `get_event` may wait.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Timeout {
    /// Check once and return immediately.
    Poll,
    Forever,
    After(Duration),
}

impl From<i64> for Timeout {
    /// `0` polls, negative values wait forever, positive values are milliseconds.
    fn from(ms: i64) -> Self {
        match ms {
            0 => Self::Poll,
            ms if ms < 0 => Self::Forever,
            ms => Self::After(Duration::from_millis(ms.unsigned_abs())),
        }
    }
}

impl From<Duration> for Timeout {
    fn from(duration: Duration) -> Self {
        if duration.is_zero() {
            Self::Poll
        } else {
            Self::After(duration)
        }
    }
}

fn normalized(mut event: Event) -> Event {
    if event.kind.is_key() {
        event.key = normalize_key(event.key, event.modifiers);
    }
    event
}

impl GraphicsContext {
    /// Waits for a button press in the active window.
    pub fn get_mouse(&self) -> Result<MouseClick, BridgeError> {
        self.wait_click(true)
    }

    /// Like [`get_mouse`](Self::get_mouse) but only reports the button.
    pub fn click(&self) -> Result<i32, BridgeError> {
        self.wait_click(true).map(|click| click.button)
    }

    /// Waits for a button press in any window.
    pub fn any_get_mouse(&self) -> Result<MouseClick, BridgeError> {
        self.wait_click(false)
    }

    pub fn any_click(&self) -> Result<(i32, ActiveTarget), BridgeError> {
        self.wait_click(false).map(|click| (click.button, click.target))
    }

    /// Waits for a key press in the active window.
    ///
    /// With `ignore_modifiers`, lone Shift/Control/Alt/Command presses are
    /// consumed and skipped.
    pub fn get_key(&self, ignore_modifiers: bool) -> Result<KeyPress, BridgeError> {
        self.wait_key(true, ignore_modifiers)
    }

    pub fn any_get_key(&self, ignore_modifiers: bool) -> Result<KeyPress, BridgeError> {
        self.wait_key(false, ignore_modifiers)
    }

    /// Returns the next event of any kind from any window.
    ///
    /// On timeout the returned event has kind [`EventKind::None`].
    pub fn get_event(&self, timeout: impl Into<Timeout>) -> Result<Event, BridgeError> {
        let event = match timeout.into() {
            Timeout::Poll => self.queue.pop_front(),
            Timeout::Forever => self.queue.wait_for(|_| true, None),
            Timeout::After(duration) => self
                .queue
                .wait_for(|_| true, Some(Instant::now() + duration)),
        };

        Ok(event.map_or_else(Event::none, normalized))
    }

    /// Puts `event` back at the tail of the queue.
    pub fn un_get_event(&self, event: Event) {
        self.queue.requeue(event);
    }

    pub fn flush_events(&self) {
        self.queue.flush();
    }

    fn wait_click(&self, only_active: bool) -> Result<MouseClick, BridgeError> {
        let event = self.wait_matching(only_active, |e| e.kind == EventKind::ButtonDown)?;

        Ok(MouseClick {
            x: event.x,
            y: event.y,
            button: event.button,
            target: self.target_of(&event)?,
        })
    }

    fn wait_key(&self, only_active: bool, ignore_modifiers: bool) -> Result<KeyPress, BridgeError> {
        let event = self.wait_matching(only_active, |e| {
            e.kind == EventKind::KeyDown && !(ignore_modifiers && is_modifier_key(e.key))
        })?;
        let event = normalized(event);

        Ok(KeyPress {
            key: event.key,
            modifiers: event.modifiers,
            target: self.target_of(&event)?,
        })
    }

    fn target_of(&self, event: &Event) -> Result<ActiveTarget, BridgeError> {
        event
            .target()
            .ok_or_else(|| BridgeError::Backend("input event without a window".to_string()))
    }

    /// Blocks until an event accepted by `accept` (and, with `only_active`,
    /// generated in the active window) reaches the front of the queue.
    /// Events ahead of it are consumed.
    fn wait_matching<F>(&self, only_active: bool, mut accept: F) -> Result<Event, BridgeError>
    where
        F: FnMut(&Event) -> bool,
    {
        loop {
            // Read under the registry lock only; never while the queue is locked.
            let active = if only_active {
                let Some(active) = self.active_window() else {
                    tracing::warn!(
                        "runtime: input requested for the active window, but none is set"
                    );
                    return Err(BridgeError::NoActiveWindow);
                };
                Some(active)
            } else {
                None
            };

            let deadline = Instant::now() + self.config.poll_interval;
            let found = self.queue.wait_for(
                |event| accept(event) && active.is_none_or(|target| event.is_in(target)),
                if only_active { Some(deadline) } else { None },
            );

            if let Some(event) = found {
                return Ok(event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_from_millis() {
        assert_eq!(Timeout::from(0_i64), Timeout::Poll);
        assert_eq!(Timeout::from(-1_i64), Timeout::Forever);
        assert_eq!(
            Timeout::from(250_i64),
            Timeout::After(Duration::from_millis(250))
        );
    }

    #[test]
    fn test_timeout_from_duration() {
        assert_eq!(Timeout::from(Duration::ZERO), Timeout::Poll);
        assert_eq!(
            Timeout::from(Duration::from_secs(1)),
            Timeout::After(Duration::from_secs(1))
        );
    }

    #[test]
    fn test_normalized_only_touches_key_events() {
        let target = ActiveTarget {
            window: crate::core::data::window_ref::WindowRef::from_raw(1),
            subwindow: 0,
        };

        let key = normalized(Event::key_down(target, 'A' as i32, Modifiers::empty()));
        assert_eq!(key.key, 'a' as i32);

        let mut click = Event::button_down(target, 0, 0, 1);
        click.key = 'A' as i32;
        assert_eq!(normalized(click).key, 'A' as i32);
    }
}
