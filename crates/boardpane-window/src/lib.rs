//! BoardPane tool windows
//!
//! The save/restore contract shared by all tool windows and the window kinds
//! built on it. Each kind declares a field plan: the ordered fields it writes,
//! base fields first. Reading walks the same plan, so writer and reader can
//! never disagree about field order for one kind.

mod composite;
mod error;
mod filtered;
mod frame;
mod plan;
mod savable;
mod visibility;
mod window;

pub use composite::CompositeWindow;
pub use error::ApplyError;
pub use filtered::{validate_selection, DisplayName, EntitySource, FilteredListWindow};
pub use frame::WindowFrame;
pub use plan::{Field, FieldPlan, FieldValue};
pub use savable::SavableWindow;
pub use visibility::{VisibilitySource, VisibilityWindow, MAX_SLIDER_VALUE};
pub use window::{
    persistable, read_fields, save_fields, PersistableHandle, PersistableWindow, SubWindow,
    SubWindowHandle,
};
