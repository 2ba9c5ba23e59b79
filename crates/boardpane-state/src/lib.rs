//! BoardPane window state
//!
//! Value types for the persisted attributes of tool windows and the big-endian,
//! length-prefixed field codec the session stream is built from.

mod error;
mod state;
mod stream;

pub use error::{DecodeError, EncodeError};
pub use state::{read_bounds, write_bounds, FilteredListState, Rect, WindowState};
pub use stream::{FieldReader, FieldWriter, MAX_INDEX_COUNT, MAX_TEXT_LEN};

pub type Result<T> = std::result::Result<T, DecodeError>;
