//! Window traits
//!
//! `SubWindow` is what a parent frame needs to hide, show and dispose a tool
//! window. `PersistableWindow` adds the save/restore protocol driven by the
//! window's field plan.

use std::sync::Arc;

use boardpane_state::{EncodeError, FieldReader, FieldWriter};
use parking_lot::Mutex;

use crate::frame::WindowFrame;
use crate::plan::{Field, FieldPlan, FieldValue};

pub trait SubWindow: Send {
    fn frame(&self) -> &WindowFrame;

    fn frame_mut(&mut self) -> &mut WindowFrame;

    fn parent_iconified(&mut self) {
        self.frame_mut().shade();
    }

    fn parent_deiconified(&mut self) {
        self.frame_mut().unshade();
    }

    /// Disposes this window on its own.
    fn dispose(&mut self) {
        self.frame_mut().dispose();
    }

    /// Disposes this window as part of disposing its parent. Must not touch
    /// the parent's window collections.
    fn parent_disposed(&mut self) {
        self.frame_mut().dispose();
    }
}

pub trait PersistableWindow: SubWindow {
    /// Stable tag identifying the window kind in a session stream.
    fn kind(&self) -> &'static str;

    fn field_plan(&self) -> FieldPlan {
        FieldPlan::base()
    }

    /// Everything this window writes, nested windows included.
    fn wire_plan(&self) -> FieldPlan {
        self.field_plan()
    }

    fn capture(&self, field: Field) -> Option<FieldValue> {
        self.frame().capture(field)
    }

    fn apply(&mut self, value: FieldValue) {
        self.frame_mut().apply(value);
    }

    fn save(&self, out: &mut FieldWriter) -> Result<(), EncodeError> {
        save_fields(self, out)
    }

    /// Returns false if the window could not be restored, in which case it keeps
    /// the state it had before the call.
    fn read(&mut self, input: &mut FieldReader<'_>) -> bool {
        read_fields(self, input)
    }

    /// Re-reads displayed values from the live data the window shows.
    fn refresh(&mut self) {}
}

pub type SubWindowHandle = Arc<Mutex<dyn SubWindow>>;
pub type PersistableHandle = Arc<Mutex<dyn PersistableWindow>>;

/// Wraps a window into a shared handle.
pub fn persistable<W: PersistableWindow + 'static>(window: W) -> Arc<Mutex<W>> {
    Arc::new(Mutex::new(window))
}

/// Writes every field of the window's plan, in plan order.
pub fn save_fields<W: PersistableWindow + ?Sized>(
    window: &W,
    out: &mut FieldWriter,
) -> Result<(), EncodeError> {
    for field in window.field_plan().fields() {
        let value = window
            .capture(*field)
            .filter(|value| value.field() == *field)
            .ok_or(EncodeError::MissingField(field.as_str()))?;
        value.encode(out)?;
    }
    Ok(())
}

/// Decodes the whole plan first and applies it only if every field decoded.
pub fn read_fields<W: PersistableWindow + ?Sized>(
    window: &mut W,
    input: &mut FieldReader<'_>,
) -> bool {
    let plan = window.field_plan();
    match plan.decode(input) {
        Ok(values) => {
            for value in values {
                window.apply(value);
            }
            true
        }
        Err(err) => {
            tracing::warn!(
                kind = window.kind(),
                title = %window.frame().title(),
                error = %err,
                "Failed to read window state"
            );
            false
        }
    }
}
