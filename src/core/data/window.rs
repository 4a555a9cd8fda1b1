//! Window and subwindow state as tracked by the GUI thread.
//!
//! A window is a stack of subwindows. Plain windows have exactly one; complex
//! windows have several, presented as tabs.

use crate::core::data::canvas::{Canvas, CanvasError};
use crate::core::data::colour::Colour;
use crate::core::data::window_ref::WindowRef;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SubwindowKind {
    Canvas2d,
    View3d,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubwindowSpec {
    pub name: String,
    pub kind: SubwindowKind,
}

impl SubwindowSpec {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: SubwindowKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Arguments of a window creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSpec {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub x: i32,
    pub y: i32,
    pub subwindows: Vec<SubwindowSpec>,
    /// Whether subwindows are presented as tabs.
    pub tabbed: bool,
}

impl WindowSpec {
    #[must_use]
    pub fn single(width: u32, height: u32, title: impl Into<String>, kind: SubwindowKind) -> Self {
        let title = title.into();

        Self {
            width,
            height,
            subwindows: vec![SubwindowSpec::new(title.clone(), kind)],
            title,
            x: -1,
            y: -1,
            tabbed: false,
        }
    }

    #[must_use]
    pub fn tabbed(
        width: u32,
        height: u32,
        title: impl Into<String>,
        subwindows: Vec<SubwindowSpec>,
    ) -> Self {
        Self {
            width,
            height,
            title: title.into(),
            x: -1,
            y: -1,
            subwindows,
            tabbed: true,
        }
    }

    /// Requested screen position; negative coordinates let the backend choose.
    #[must_use]
    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.x = x;
        self.y = y;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CanvasPane {
    pub canvas: Canvas,
    pub background: Colour,
    pub mouse_tracking: bool,
}

/// 3D views only own their last rendered frame here; scene content is
/// produced by the mesh layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewPane {
    pub frame: Canvas,
    pub background: Colour,
    pub mouse_tracking: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Subwindow {
    Canvas(CanvasPane),
    View(ViewPane),
}

impl Subwindow {
    pub fn new(kind: SubwindowKind, width: u32, height: u32) -> Result<Self, CanvasError> {
        let background = Colour::WHITE;
        let surface = Canvas::new(width, height, background)?;

        Ok(match kind {
            SubwindowKind::Canvas2d => Self::Canvas(CanvasPane {
                canvas: surface,
                background,
                mouse_tracking: false,
            }),
            SubwindowKind::View3d => Self::View(ViewPane {
                frame: surface,
                background: Colour::BLACK,
                mouse_tracking: false,
            }),
        })
    }

    #[must_use]
    pub fn kind(&self) -> SubwindowKind {
        match self {
            Self::Canvas(_) => SubwindowKind::Canvas2d,
            Self::View(_) => SubwindowKind::View3d,
        }
    }

    #[must_use]
    pub fn surface(&self) -> &Canvas {
        match self {
            Self::Canvas(pane) => &pane.canvas,
            Self::View(pane) => &pane.frame,
        }
    }

    #[must_use]
    pub fn background(&self) -> Colour {
        match self {
            Self::Canvas(pane) => pane.background,
            Self::View(pane) => pane.background,
        }
    }

    #[must_use]
    pub fn mouse_tracking(&self) -> bool {
        match self {
            Self::Canvas(pane) => pane.mouse_tracking,
            Self::View(pane) => pane.mouse_tracking,
        }
    }

    pub fn set_mouse_tracking(&mut self, enabled: bool) {
        match self {
            Self::Canvas(pane) => pane.mouse_tracking = enabled,
            Self::View(pane) => pane.mouse_tracking = enabled,
        }
    }

    /// Records the background and repaints the surface with it.
    pub fn set_background(&mut self, colour: Colour) {
        match self {
            Self::Canvas(pane) => pane.background = colour,
            Self::View(pane) => pane.background = colour,
        }
        self.clear();
    }

    pub fn clear(&mut self) {
        match self {
            Self::Canvas(pane) => pane.canvas.fill(pane.background),
            Self::View(pane) => pane.frame.fill(pane.background),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabContainer {
    pub names: Vec<String>,
    pub selected: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    id: WindowRef,
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub x: i32,
    pub y: i32,
    pub subwindows: Vec<Subwindow>,
    pub tabs: Option<TabContainer>,
    pub active_subwindow: usize,
}

impl Window {
    pub fn build(id: WindowRef, spec: &WindowSpec) -> Result<Self, CanvasError> {
        let subwindows = spec
            .subwindows
            .iter()
            .map(|sub| Subwindow::new(sub.kind, spec.width, spec.height))
            .collect::<Result<Vec<_>, _>>()?;

        let tabs = spec.tabbed.then(|| TabContainer {
            names: spec.subwindows.iter().map(|sub| sub.name.clone()).collect(),
            selected: 0,
        });

        Ok(Self {
            id,
            title: spec.title.clone(),
            width: spec.width,
            height: spec.height,
            x: spec.x,
            y: spec.y,
            subwindows,
            tabs,
            active_subwindow: 0,
        })
    }

    #[must_use]
    pub fn id(&self) -> WindowRef {
        self.id
    }

    #[must_use]
    pub fn subwindow_count(&self) -> usize {
        self.subwindows.len()
    }

    #[must_use]
    pub fn subwindow(&self, index: usize) -> Option<&Subwindow> {
        self.subwindows.get(index)
    }

    pub fn subwindow_mut(&mut self, index: usize) -> Option<&mut Subwindow> {
        self.subwindows.get_mut(index)
    }

    /// Brings `index` to the front. Caller has checked bounds.
    pub fn select(&mut self, index: usize) {
        self.active_subwindow = index;

        if let Some(tabs) = self.tabs.as_mut() {
            tabs.selected = index;
        }
    }
}
