//! Outcome of a save or restore pass

use chrono::{DateTime, Utc};

use boardpane_state::EncodeError;

use crate::format::SnapshotFormat;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The window could not encode its fields and was left out of the stream.
    Encode(EncodeError),
    /// The window's fields did not decode; it kept its default state.
    Decode,
    /// The stream had no record for the window.
    MissingRecord,
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureReason::Encode(err) => write!(f, "encode failed: {}", err),
            FailureReason::Decode => write!(f, "decode failed"),
            FailureReason::MissingRecord => write!(f, "no record"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowFailure {
    /// Position of the window in the traversal order.
    pub index: usize,
    pub kind: &'static str,
    pub reason: FailureReason,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveReport {
    pub written: usize,
    pub failed: Vec<WindowFailure>,
    pub bytes: usize,
}

impl SaveReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreReport {
    pub format: SnapshotFormat,
    /// Only known for tagged streams.
    pub saved_at: Option<DateTime<Utc>>,
    pub restored: usize,
    pub defaulted: Vec<WindowFailure>,
    /// Tagged records no window claimed.
    pub unclaimed: usize,
}

impl RestoreReport {
    pub fn new(format: SnapshotFormat) -> Self {
        Self {
            format,
            saved_at: None,
            restored: 0,
            defaulted: Vec::new(),
            unclaimed: 0,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.defaulted.is_empty() && self.unclaimed == 0
    }

    pub fn failed_kinds(&self) -> Vec<&'static str> {
        self.defaulted.iter().map(|failure| failure.kind).collect()
    }
}
