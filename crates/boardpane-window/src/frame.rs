//! Attributes shared by every tool window

use boardpane_state::{Rect, WindowState};

use crate::plan::{Field, FieldValue};

#[derive(Debug, Clone, Default)]
pub struct WindowFrame {
    title: String,
    bounds: Rect,
    visible: bool,
    /// Visibility before the parent was iconified. Set once per shade.
    shaded: Option<bool>,
    disposed: bool,
}

impl WindowFrame {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// While shaded the window stays hidden and `visible` is what `unshade`
    /// will restore.
    pub fn set_visible(&mut self, visible: bool) {
        match self.shaded.as_mut() {
            Some(remembered) => *remembered = visible,
            None => self.visible = visible,
        }
    }

    pub fn state(&self) -> WindowState {
        WindowState::new(self.bounds, self.visible)
    }

    pub fn apply_state(&mut self, state: WindowState) {
        self.bounds = state.bounds;
        self.set_visible(state.visible);
    }

    /// Hides the window, remembering its visibility. Repeated calls keep the
    /// visibility seen by the first one.
    pub fn shade(&mut self) {
        if self.shaded.is_none() {
            self.shaded = Some(self.visible);
        }
        self.visible = false;
    }

    /// Restores the visibility remembered by `shade`.
    pub fn unshade(&mut self) {
        if let Some(visible) = self.shaded.take() {
            self.visible = visible;
        }
    }

    pub fn is_shaded(&self) -> bool {
        self.shaded.is_some()
    }

    pub fn dispose(&mut self) {
        self.visible = false;
        self.shaded = None;
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn capture(&self, field: Field) -> Option<FieldValue> {
        match field {
            Field::Bounds => Some(FieldValue::Bounds(self.bounds)),
            Field::Visible => Some(FieldValue::Visible(self.visible)),
            _ => None,
        }
    }

    pub fn apply(&mut self, value: FieldValue) {
        match value {
            FieldValue::Bounds(bounds) => self.set_bounds(bounds),
            FieldValue::Visible(visible) => self.set_visible(visible),
            other => {
                tracing::debug!(
                    field = %other.field(),
                    title = %self.title,
                    "Ignoring field without owner"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shade_is_one_level() {
        let mut frame = WindowFrame::new("Nets");
        frame.set_visible(true);

        frame.shade();
        frame.shade();
        assert!(!frame.is_visible());

        frame.unshade();
        assert!(frame.is_visible());
        assert!(!frame.is_shaded());

        // Nothing remembered any more.
        frame.set_visible(false);
        frame.unshade();
        assert!(!frame.is_visible());
    }

    #[test]
    fn test_visibility_applied_while_shaded() {
        let mut frame = WindowFrame::new("Nets");
        frame.shade();
        frame.apply(FieldValue::Visible(true));
        assert!(!frame.is_visible());

        frame.unshade();
        assert!(frame.is_visible());
    }

    #[test]
    fn test_hidden_window_stays_hidden() {
        let mut frame = WindowFrame::new("Vias");
        frame.shade();
        frame.unshade();
        assert!(!frame.is_visible());
    }

    #[test]
    fn test_capture_base_fields_only() {
        let frame = WindowFrame::new("Misc").with_bounds(Rect::new(1, 2, 3, 4));
        assert_eq!(
            frame.capture(Field::Bounds),
            Some(FieldValue::Bounds(Rect::new(1, 2, 3, 4)))
        );
        assert_eq!(frame.capture(Field::FilterText), None);
    }
}
