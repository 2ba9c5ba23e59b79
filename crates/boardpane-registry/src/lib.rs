//! BoardPane sub-window registry
//!
//! The parent frame is the only writer of its registry. Transient windows
//! register themselves when opened and deregister when closed individually;
//! disposing the parent disposes them all in one pass.

mod info;
mod link;
mod registry;

pub use info::{ObjectInfoWindow, Printable, WINDOW_OFFSET};
pub use link::{open_transient, RegistryLink};
pub use registry::SubWindowRegistry;
