//! Plain persistable window

use boardpane_state::Rect;

use crate::frame::WindowFrame;
use crate::window::{PersistableWindow, SubWindow};

/// A window whose persisted state is only its bounds and visibility.
#[derive(Debug, Clone)]
pub struct SavableWindow {
    kind: &'static str,
    frame: WindowFrame,
}

impl SavableWindow {
    pub fn new(kind: &'static str, title: impl Into<String>) -> Self {
        Self {
            kind,
            frame: WindowFrame::new(title),
        }
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.frame.set_bounds(bounds);
        self
    }

    pub fn bounds(&self) -> Rect {
        self.frame.bounds()
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.frame.set_bounds(bounds);
    }

    pub fn is_visible(&self) -> bool {
        self.frame.is_visible()
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.frame.set_visible(visible);
    }
}

impl SubWindow for SavableWindow {
    fn frame(&self) -> &WindowFrame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut WindowFrame {
        &mut self.frame
    }
}

impl PersistableWindow for SavableWindow {
    fn kind(&self) -> &'static str {
        self.kind
    }
}
