//! Session stream formats
//!
//! ```text
//! tagged:    "BPSN" version:u16 saved_at:i64 count:u32
//!            { tag_len:u16 tag payload_len:u32 payload }*
//! untagged:  payload payload payload ...
//! ```
//!
//! The untagged layout carries nothing but the window fields, so reading it
//! with a different window list attributes fields to the wrong windows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use boardpane_state::{DecodeError, FieldReader, FieldWriter};

use crate::error::SessionError;
use crate::Result;

pub const MAGIC: &[u8; 4] = b"BPSN";
pub const FORMAT_VERSION: u16 = 1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotFormat {
    /// Header plus one kind-tagged, length-prefixed record per window.
    #[default]
    Tagged,
    /// Bare concatenation of window payloads, matched to windows by position.
    Untagged,
}

impl SnapshotFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            SnapshotFormat::Tagged => "tagged",
            SnapshotFormat::Untagged => "untagged",
        }
    }

    /// Tagged streams start with the magic bytes; anything else is untagged.
    pub fn detect(bytes: &[u8]) -> Self {
        if bytes.starts_with(MAGIC) {
            SnapshotFormat::Tagged
        } else {
            SnapshotFormat::Untagged
        }
    }
}

impl std::fmt::Display for SnapshotFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SnapshotFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tagged" => Ok(SnapshotFormat::Tagged),
            "untagged" => Ok(SnapshotFormat::Untagged),
            _ => Err(format!("Unknown snapshot format: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotHeader {
    pub version: u16,
    pub saved_at: DateTime<Utc>,
    pub record_count: u32,
}

impl SnapshotHeader {
    pub fn new(record_count: u32) -> Self {
        Self {
            version: FORMAT_VERSION,
            saved_at: Utc::now(),
            record_count,
        }
    }

    pub fn write_to(&self, out: &mut FieldWriter) {
        out.put_bytes(MAGIC);
        out.put_u16(self.version);
        out.put_i64(self.saved_at.timestamp_millis());
        out.put_u32(self.record_count);
    }

    pub fn read_from(input: &mut FieldReader<'_>) -> Result<Self> {
        let magic = input.take_bytes("magic", MAGIC.len())?;
        if magic != MAGIC {
            return Err(SessionError::NotTagged);
        }
        let version = input.take_u16("version")?;
        if version != FORMAT_VERSION {
            return Err(SessionError::UnsupportedVersion(version));
        }
        let millis = input.take_i64("saved_at")?;
        let saved_at = DateTime::<Utc>::from_timestamp_millis(millis).ok_or_else(|| {
            DecodeError::malformed("saved_at", format!("timestamp {millis} out of range"))
        })?;
        let record_count = input.take_u32("record_count")?;
        Ok(Self {
            version,
            saved_at,
            record_count,
        })
    }
}

/// One kind-tagged record of a tagged stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<'a> {
    pub kind: String,
    pub payload: &'a [u8],
}

impl<'a> Record<'a> {
    pub fn write(kind: &str, payload: &[u8], out: &mut FieldWriter) -> Result<()> {
        out.put_short_str(kind)?;
        out.put_u32(payload.len() as u32);
        out.put_bytes(payload);
        Ok(())
    }

    pub fn read_from(input: &mut FieldReader<'a>) -> std::result::Result<Self, DecodeError> {
        let kind = input.take_short_str("record.kind")?;
        let len = input.take_u32("record.length")? as usize;
        let payload = input.take_bytes("record.payload", len)?;
        Ok(Self { kind, payload })
    }
}

/// Reads up to `count` records. A damaged record ends the list; the records
/// before it are still returned together with the error.
pub fn read_records<'a>(
    input: &mut FieldReader<'a>,
    count: u32,
) -> (Vec<Record<'a>>, Option<DecodeError>) {
    let mut records = Vec::new();
    for _ in 0..count {
        match Record::read_from(input) {
            Ok(record) => records.push(record),
            Err(err) => return (records, Some(err)),
        }
    }
    (records, None)
}
