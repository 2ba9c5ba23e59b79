//! BoardPane Session Snapshots
//!
//! Persists the state of an ordered list of tool windows into one stream and
//! restores it later:
//! - windows are saved and read in the same traversal order
//! - a window that fails is logged and left at its default state
//! - the default tagged format matches records to windows by kind
//! - the untagged legacy format matches by position only

mod error;
mod file;
mod format;
mod report;
mod snapshot;

pub use error::SessionError;
pub use file::SessionFile;
pub use format::{SnapshotFormat, SnapshotHeader, FORMAT_VERSION, MAGIC};
pub use report::{FailureReason, RestoreReport, SaveReport, WindowFailure};
pub use snapshot::{RecordSummary, SessionSnapshot, SnapshotSummary};

pub type Result<T> = std::result::Result<T, SessionError>;
