use crate::core::data::window::Window;
use crate::core::data::window_ref::WindowRef;
use crate::core::errors::BridgeError;

/// Native window-system operations. Only ever called on the GUI thread.
///
/// The registry holds the domain state of each window; a backend maps
/// window handles to whatever native resources it needs.
pub trait NativeBackend {
    /// Creates native resources for a window that was just registered.
    fn open_window(&mut self, window: &Window) -> Result<(), BridgeError>;

    fn close_window(&mut self, window: WindowRef) -> Result<(), BridgeError>;

    /// Raises and focuses `window`, with `subwindow` in front.
    fn raise_window(&mut self, window: &Window, subwindow: usize) -> Result<(), BridgeError>;

    /// The content of `window` changed and should be shown.
    fn present(&mut self, window: &Window);
}
