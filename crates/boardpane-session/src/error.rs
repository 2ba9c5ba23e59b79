//! Session error types
//!
//! Only stream-level problems are errors. A single window that fails to save or
//! restore is reported, not returned.

use boardpane_state::{DecodeError, EncodeError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid session header: {0}")]
    Header(#[from] DecodeError),

    #[error("Unsupported session format version: {0}")]
    UnsupportedVersion(u16),

    #[error("Invalid record tag: {0}")]
    Tag(#[from] EncodeError),

    #[error("Session file not found: {0}")]
    NotFound(String),

    #[error("Not a tagged session stream")]
    NotTagged,
}
