use std::collections::HashMap;

use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event_loop::EventLoopWindowTarget;
use winit::window::{Window as NativeWindow, WindowBuilder, WindowId};

use crate::controllers::ports::native_backend::NativeBackend;
use crate::core::data::window::Window;
use crate::core::data::window_ref::WindowRef;
use crate::core::errors::BridgeError;
use crate::presenters::windowed::events::GuiEvent;
use crate::presenters::windowed::surface::WindowSurface;

/// Every open native window, reachable by handle and by winit id.
#[derive(Default)]
pub struct SurfaceMap {
    surfaces: HashMap<WindowRef, WindowSurface>,
    handles: HashMap<WindowId, WindowRef>,
}

impl SurfaceMap {
    pub fn by_window_id(&mut self, id: WindowId) -> Option<&mut WindowSurface> {
        let handle = self.handles.get(&id)?;
        self.surfaces.get_mut(handle)
    }

    fn insert(&mut self, surface: WindowSurface) {
        self.handles.insert(surface.native().id(), surface.handle());
        self.surfaces.insert(surface.handle(), surface);
    }

    fn remove(&mut self, handle: WindowRef) -> Option<WindowSurface> {
        let surface = self.surfaces.remove(&handle)?;
        self.handles.remove(&surface.native().id());
        Some(surface)
    }
}

/// The winit backend for the span of one event-loop callback.
pub struct WinitSession<'a> {
    elwt: &'a EventLoopWindowTarget<GuiEvent>,
    surfaces: &'a mut SurfaceMap,
}

impl<'a> WinitSession<'a> {
    pub fn new(elwt: &'a EventLoopWindowTarget<GuiEvent>, surfaces: &'a mut SurfaceMap) -> Self {
        Self { elwt, surfaces }
    }
}

fn backend_error(err: impl std::fmt::Display) -> BridgeError {
    BridgeError::Backend(err.to_string())
}

impl NativeBackend for WinitSession<'_> {
    fn open_window(&mut self, window: &Window) -> Result<(), BridgeError> {
        let native = WindowBuilder::new()
            .with_title(window.title.as_str())
            .with_inner_size(PhysicalSize::new(window.width, window.height))
            .with_position(PhysicalPosition::new(window.x, window.y))
            .build(self.elwt)
            .map_err(backend_error)?;

        // pixels borrows the window for as long as the surface lives.
        let native: &'static NativeWindow = Box::leak(Box::new(native));

        let mut surface = WindowSurface::new(window, native, self.elwt).map_err(backend_error)?;
        surface.show(window);
        self.surfaces.insert(surface);
        Ok(())
    }

    fn close_window(&mut self, window: WindowRef) -> Result<(), BridgeError> {
        let surface = self
            .surfaces
            .remove(window)
            .ok_or(BridgeError::UnknownWindow(window))?;
        surface.hide();
        Ok(())
    }

    fn raise_window(&mut self, window: &Window, _subwindow: usize) -> Result<(), BridgeError> {
        let surface = self
            .surfaces
            .surfaces
            .get(&window.id())
            .ok_or(BridgeError::UnknownWindow(window.id()))?;
        surface.raise();
        Ok(())
    }

    fn present(&mut self, window: &Window) {
        if let Some(surface) = self.surfaces.surfaces.get_mut(&window.id()) {
            surface.show(window);
        }
    }
}
