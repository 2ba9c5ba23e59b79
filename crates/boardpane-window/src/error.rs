//! Window error types

use thiserror::Error;

/// A restored value that does not fit the live window. Never propagated: the
/// offending value is dropped and the error only gets logged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApplyError {
    #[error("Selected index {index} out of range for list of {len} entries")]
    IndexOutOfRange { index: u32, len: usize },

    #[error("Slider {index} does not exist ({count} sliders)")]
    NoSuchSlider { index: usize, count: usize },
}
