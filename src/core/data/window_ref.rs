use std::fmt;

/// Opaque handle to a window owned by the GUI thread.
///
/// Handles are cheap to copy and are the only way user code refers to a
/// window. They are never reused within a process.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowRef(u64);

impl WindowRef {
    #[must_use]
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window#{}", self.0)
    }
}

/// A window together with one of its subwindow slots.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ActiveTarget {
    pub window: WindowRef,
    pub subwindow: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_raw_id() {
        assert_eq!(WindowRef::from_raw(7).to_string(), "window#7");
    }

    #[test]
    fn test_raw_round_trips() {
        let handle = WindowRef::from_raw(42);
        assert_eq!(handle.raw(), 42);
        assert_eq!(handle, WindowRef::from_raw(42));
    }
}
