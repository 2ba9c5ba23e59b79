//! Window state values
//!
//! A `WindowState` is a detached snapshot of one window. It has no identity of its
//! own; it only means something next to the kind of window it was taken from.

use serde::{Deserialize, Serialize};

use crate::error::{DecodeError, EncodeError};
use crate::stream::{FieldReader, FieldWriter};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Same size, moved by the given offset.
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.x.saturating_add(dx),
            self.y.saturating_add(dy),
            self.width,
            self.height,
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowState {
    pub bounds: Rect,
    pub visible: bool,
}

impl WindowState {
    /// Encoded size: four i32 bounds plus one visibility byte.
    pub const ENCODED_LEN: usize = 17;

    pub const fn new(bounds: Rect, visible: bool) -> Self {
        Self { bounds, visible }
    }

    pub fn write_to(&self, out: &mut FieldWriter) {
        write_bounds(out, &self.bounds);
        out.put_bool(self.visible);
    }

    pub fn read_from(input: &mut FieldReader<'_>) -> Result<Self, DecodeError> {
        let bounds = read_bounds(input)?;
        let visible = input.take_bool("visible")?;
        Ok(Self { bounds, visible })
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = FieldWriter::with_capacity(Self::ENCODED_LEN);
        self.write_to(&mut out);
        out.into_bytes()
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        Self::read_from(&mut FieldReader::new(bytes))
    }
}

pub fn write_bounds(out: &mut FieldWriter, bounds: &Rect) {
    out.put_i32(bounds.x);
    out.put_i32(bounds.y);
    out.put_i32(bounds.width);
    out.put_i32(bounds.height);
}

pub fn read_bounds(input: &mut FieldReader<'_>) -> Result<Rect, DecodeError> {
    Ok(Rect {
        x: input.take_i32("bounds.x")?,
        y: input.take_i32("bounds.y")?,
        width: input.take_i32("bounds.width")?,
        height: input.take_i32("bounds.height")?,
    })
}

/// State of a list window whose entries are filtered by display name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredListState {
    pub window: WindowState,
    /// Substring matched against each entry's display name; empty keeps everything.
    pub filter_text: String,
    /// Indices into the filtered list as it was displayed at save time.
    pub selected_indices: Vec<u32>,
}

impl FilteredListState {
    pub fn new(
        window: WindowState,
        filter_text: impl Into<String>,
        selected_indices: Vec<u32>,
    ) -> Self {
        Self {
            window,
            filter_text: filter_text.into(),
            selected_indices,
        }
    }

    pub fn write_to(&self, out: &mut FieldWriter) -> Result<(), EncodeError> {
        self.window.write_to(out);
        out.put_str(&self.filter_text)?;
        out.put_indices(&self.selected_indices)
    }

    pub fn read_from(input: &mut FieldReader<'_>) -> Result<Self, DecodeError> {
        let window = WindowState::read_from(input)?;
        let filter_text = input.take_str("filter_text")?;
        let selected_indices = input.take_indices("selected_indices")?;
        Ok(Self {
            window,
            filter_text,
            selected_indices,
        })
    }

    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let mut out = FieldWriter::new();
        self.write_to(&mut out)?;
        Ok(out.into_bytes())
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        Self::read_from(&mut FieldReader::new(bytes))
    }
}
