//! Registry of live windows and the process-wide active window.
//!
//! Only the GUI thread mutates the registry. The user thread reads the
//! active target through the same lock, see [`SharedRegistry`].

use parking_lot::Mutex;
use std::sync::Arc;

use crate::core::data::window::{Subwindow, Window, WindowSpec};
use crate::core::data::window_ref::{ActiveTarget, WindowRef};
use crate::core::errors::BridgeError;

pub type SharedRegistry = Arc<Mutex<WindowRegistry>>;

#[must_use]
pub fn shared_registry() -> SharedRegistry {
    Arc::new(Mutex::new(WindowRegistry::default()))
}

#[derive(Debug, Default)]
pub struct WindowRegistry {
    windows: Vec<Window>,
    active: Option<ActiveTarget>,
    next_id: u64,
}

impl WindowRegistry {
    /// Validates `spec` and builds a window with a fresh handle, without
    /// registering it. Handles are never reused, even if the window is
    /// later discarded.
    pub fn prepare(&mut self, spec: &WindowSpec) -> Result<Window, BridgeError> {
        if spec.subwindows.is_empty() {
            return Err(BridgeError::InvalidWindowSpec(
                "a window needs at least one subwindow".to_string(),
            ));
        }

        self.next_id += 1;
        Ok(Window::build(WindowRef::from_raw(self.next_id), spec)?)
    }

    /// Registers a prepared window. It becomes active when no other window is.
    pub fn insert(&mut self, window: Window) -> WindowRef {
        let id = window.id();
        self.windows.push(window);

        if self.active.is_none() {
            self.active = Some(ActiveTarget {
                window: id,
                subwindow: 0,
            });
        }

        id
    }

    pub fn set_active(&mut self, window: WindowRef, subwindow: usize) -> Result<(), BridgeError> {
        self.check_bounds(window, subwindow)?;
        self.active = Some(ActiveTarget { window, subwindow });

        Ok(())
    }

    /// Selects `subwindow` inside `window` and makes the pair active.
    pub fn show(&mut self, window: WindowRef, subwindow: usize) -> Result<(), BridgeError> {
        self.check_bounds(window, subwindow)?;

        if let Some(target) = self.get_mut(window) {
            target.select(subwindow);
        }
        self.active = Some(ActiveTarget { window, subwindow });

        Ok(())
    }

    /// Unregisters `window`. The active target is cleared if it pointed there.
    pub fn remove(&mut self, window: WindowRef) -> Result<Window, BridgeError> {
        let position = self
            .windows
            .iter()
            .position(|w| w.id() == window)
            .ok_or(BridgeError::UnknownWindow(window))?;

        if self.active.is_some_and(|active| active.window == window) {
            self.active = None;
        }

        Ok(self.windows.remove(position))
    }

    #[must_use]
    pub fn active(&self) -> Option<ActiveTarget> {
        self.active
    }

    pub fn active_subwindow_mut(&mut self) -> Result<&mut Subwindow, BridgeError> {
        let active = self.active.ok_or(BridgeError::NoActiveWindow)?;

        self.get_mut(active.window)
            .and_then(|w| w.subwindow_mut(active.subwindow))
            .ok_or(BridgeError::NoActiveWindow)
    }

    #[must_use]
    pub fn active_subwindow(&self) -> Option<&Subwindow> {
        let active = self.active?;
        self.get(active.window)?.subwindow(active.subwindow)
    }

    #[must_use]
    pub fn get(&self, window: WindowRef) -> Option<&Window> {
        self.windows.iter().find(|w| w.id() == window)
    }

    pub fn get_mut(&mut self, window: WindowRef) -> Option<&mut Window> {
        self.windows.iter_mut().find(|w| w.id() == window)
    }

    #[must_use]
    pub fn contains(&self, window: WindowRef) -> bool {
        self.get(window).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// The window holding the active target, if any.
    #[must_use]
    pub fn active_window(&self) -> Option<&Window> {
        self.get(self.active?.window)
    }

    pub fn check_bounds(&self, window: WindowRef, subwindow: usize) -> Result<(), BridgeError> {
        let count = self
            .get(window)
            .ok_or(BridgeError::UnknownWindow(window))?
            .subwindow_count();

        if subwindow >= count {
            return Err(BridgeError::SubwindowOutOfBounds {
                window,
                index: subwindow,
                count,
            });
        }

        Ok(())
    }
}
