//! Transient window showing information about board objects

use std::sync::Arc;

use boardpane_state::Rect;
use boardpane_window::{SubWindow, WindowFrame};
use parking_lot::Mutex;

use crate::link::{open_transient, RegistryLink};
use crate::registry::SubWindowRegistry;

/// Distance between a list window and the info windows it opens.
pub const WINDOW_OFFSET: i32 = 30;

/// Objects that can describe themselves in an info window.
pub trait Printable {
    fn print_info(&self) -> String;
}

#[derive(Debug)]
pub struct ObjectInfoWindow {
    frame: WindowFrame,
    link: RegistryLink,
    lines: Vec<String>,
}

impl ObjectInfoWindow {
    /// Opens a visible info window for `objects`, registered in `registry`.
    pub fn display<'a, P, I>(
        registry: &SubWindowRegistry,
        title: impl Into<String>,
        objects: I,
        bounds: Rect,
    ) -> Arc<Mutex<ObjectInfoWindow>>
    where
        P: Printable + ?Sized + 'a,
        I: IntoIterator<Item = &'a P>,
    {
        let lines: Vec<String> = objects.into_iter().map(|object| object.print_info()).collect();
        let title = title.into();
        open_transient(registry, move |link| {
            let mut frame = WindowFrame::new(title).with_bounds(bounds);
            frame.set_visible(true);
            ObjectInfoWindow { frame, link, lines }
        })
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl SubWindow for ObjectInfoWindow {
    fn frame(&self) -> &WindowFrame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut WindowFrame {
        &mut self.frame
    }

    fn dispose(&mut self) {
        self.link.detach();
        self.frame.dispose();
    }
}
