//! Windows that own nested persistable dialogs
//!
//! For example the route parameter window with its manual-rule and detail
//! dialogs. The parent writes its own fields, then each child in order.

use boardpane_state::{EncodeError, FieldReader, FieldWriter};

use crate::frame::WindowFrame;
use crate::plan::FieldPlan;
use crate::window::{read_fields, save_fields, PersistableWindow, SubWindow};

pub struct CompositeWindow {
    kind: &'static str,
    frame: WindowFrame,
    children: Vec<Box<dyn PersistableWindow>>,
}

impl CompositeWindow {
    pub fn new(kind: &'static str, title: impl Into<String>) -> Self {
        Self {
            kind,
            frame: WindowFrame::new(title),
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: impl PersistableWindow + 'static) -> Self {
        self.children.push(Box::new(child));
        self
    }

    pub fn children(&self) -> &[Box<dyn PersistableWindow>] {
        &self.children
    }

    pub fn child_mut(&mut self, index: usize) -> Option<&mut (dyn PersistableWindow + 'static)> {
        self.children.get_mut(index).map(|child| child.as_mut())
    }
}

impl SubWindow for CompositeWindow {
    fn frame(&self) -> &WindowFrame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut WindowFrame {
        &mut self.frame
    }

    fn parent_iconified(&mut self) {
        for child in &mut self.children {
            child.parent_iconified();
        }
        self.frame.shade();
    }

    fn parent_deiconified(&mut self) {
        for child in &mut self.children {
            child.parent_deiconified();
        }
        self.frame.unshade();
    }

    fn dispose(&mut self) {
        for child in &mut self.children {
            child.dispose();
        }
        self.frame.dispose();
    }

    fn parent_disposed(&mut self) {
        for child in &mut self.children {
            child.parent_disposed();
        }
        self.frame.dispose();
    }
}

impl PersistableWindow for CompositeWindow {
    fn kind(&self) -> &'static str {
        self.kind
    }

    fn wire_plan(&self) -> FieldPlan {
        self.children
            .iter()
            .fold(self.field_plan(), |plan, child| plan.then(child.wire_plan()))
    }

    fn save(&self, out: &mut FieldWriter) -> Result<(), EncodeError> {
        save_fields(self, out)?;
        for child in &self.children {
            child.save(out)?;
        }
        Ok(())
    }

    /// Checks the whole nested record on a copy of the cursor first, so a damaged
    /// child leaves the parent and its siblings untouched too.
    fn read(&mut self, input: &mut FieldReader<'_>) -> bool {
        if let Err(err) = self.wire_plan().decode(&mut input.clone()) {
            tracing::warn!(
                kind = self.kind,
                title = %self.frame.title(),
                error = %err,
                "Failed to read nested window state"
            );
            return false;
        }
        if !read_fields(self, input) {
            return false;
        }
        for child in &mut self.children {
            if !child.read(input) {
                return false;
            }
        }
        self.refresh();
        true
    }

    fn refresh(&mut self) {
        for child in &mut self.children {
            child.refresh();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::Field;
    use crate::savable::SavableWindow;
    use boardpane_state::Rect;

    fn route_parameters() -> CompositeWindow {
        CompositeWindow::new("route_parameter", "Route Parameter")
            .with_child(SavableWindow::new("manual_rules", "Manual Rules"))
            .with_child(SavableWindow::new("route_detail", "Route Detail"))
    }

    #[test]
    fn test_wire_plan_is_parent_then_children() {
        let window = route_parameters();
        let base = [Field::Bounds, Field::Visible];
        let expected: Vec<Field> = base.iter().cycle().take(6).copied().collect();
        assert_eq!(window.wire_plan().fields(), expected.as_slice());
    }

    #[test]
    fn test_nested_round_trip() {
        let mut window = route_parameters();
        window.frame_mut().set_bounds(Rect::new(1, 2, 3, 4));
        window.child_mut(1).unwrap().frame_mut().set_bounds(Rect::new(9, 9, 90, 90));
        window.child_mut(1).unwrap().frame_mut().set_visible(true);

        let mut out = FieldWriter::new();
        window.save(&mut out).unwrap();

        let mut restored = route_parameters();
        assert!(restored.read(&mut FieldReader::new(out.as_bytes())));
        assert_eq!(restored.frame().bounds(), Rect::new(1, 2, 3, 4));
        assert_eq!(restored.children()[1].frame().bounds(), Rect::new(9, 9, 90, 90));
        assert!(restored.children()[1].frame().is_visible());
        assert!(!restored.children()[0].frame().is_visible());
    }

    #[test]
    fn test_child_failure_fails_whole_read() {
        let mut out = FieldWriter::new();
        route_parameters().save(&mut out).unwrap();
        let bytes = out.into_bytes();

        let mut restored = route_parameters();
        restored.frame_mut().set_bounds(Rect::new(5, 5, 5, 5));
        assert!(!restored.read(&mut FieldReader::new(&bytes[..bytes.len() - 1])));
        assert_eq!(restored.frame().bounds(), Rect::new(5, 5, 5, 5));
    }

    #[test]
    fn test_iconify_cascades_to_children() {
        let mut window = route_parameters();
        window.frame_mut().set_visible(true);
        window.child_mut(0).unwrap().frame_mut().set_visible(true);

        window.parent_iconified();
        assert!(!window.frame().is_visible());
        assert!(!window.children()[0].frame().is_visible());

        window.parent_deiconified();
        assert!(window.frame().is_visible());
        assert!(window.children()[0].frame().is_visible());
        assert!(!window.children()[1].frame().is_visible());
    }
}
