use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::adapters::pixel_format::blit_canvas_to_rgba;
use crate::controllers::ports::native_backend::NativeBackend;
use crate::core::data::window::Window;
use crate::core::data::window_ref::WindowRef;
use crate::core::errors::BridgeError;

/// What a [`HeadlessBackend`] was asked to do, plus the last presented frame
/// of every open window.
#[derive(Debug, Clone, Default)]
pub struct BackendLog {
    pub opened: Vec<WindowRef>,
    pub closed: Vec<WindowRef>,
    pub raised: Vec<(WindowRef, usize)>,
    pub presents: usize,
    /// RGBA, one entry per open window, showing its selected subwindow.
    pub frames: HashMap<WindowRef, Frame>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl Frame {
    fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            rgba: vec![0; width as usize * height as usize * 4],
        }
    }

    /// RGBA of one pixel, `None` outside the frame.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        self.rgba[offset..offset + 4].try_into().ok()
    }
}

/// Native backend without a display. Renders into memory and records calls.
///
/// The log is shared so tests can inspect it while the GUI thread owns the
/// backend.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    log: Arc<Mutex<BackendLog>>,
    refuse_windows: bool,
}

impl HeadlessBackend {
    /// A backend whose `open_window` always fails, like a display that went away.
    #[must_use]
    pub fn refusing_windows() -> Self {
        Self {
            refuse_windows: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn log(&self) -> Arc<Mutex<BackendLog>> {
        Arc::clone(&self.log)
    }
}

impl NativeBackend for HeadlessBackend {
    fn open_window(&mut self, window: &Window) -> Result<(), BridgeError> {
        if self.refuse_windows {
            return Err(BridgeError::Backend("headless backend refuses windows".to_string()));
        }

        let mut log = self.log.lock();
        log.opened.push(window.id());
        log.frames
            .insert(window.id(), Frame::blank(window.width, window.height));
        drop(log);

        self.present(window);
        Ok(())
    }

    fn close_window(&mut self, window: WindowRef) -> Result<(), BridgeError> {
        let mut log = self.log.lock();
        log.frames.remove(&window);
        log.closed.push(window);
        Ok(())
    }

    fn raise_window(&mut self, window: &Window, subwindow: usize) -> Result<(), BridgeError> {
        self.log.lock().raised.push((window.id(), subwindow));
        Ok(())
    }

    fn present(&mut self, window: &Window) {
        let mut log = self.log.lock();
        log.presents += 1;

        let Some(frame) = log.frames.get_mut(&window.id()) else {
            return;
        };
        if let Some(subwindow) = window.subwindow(window.active_subwindow) {
            blit_canvas_to_rgba(subwindow.surface(), &mut frame.rgba, frame.width, frame.height);
        }
    }
}
