//! Session snapshot orchestration
//!
//! Drives `save` and `read` across an ordered window list. The list must be
//! rebuilt in the same order on load; the stream is never used to decide which
//! windows exist. A window that fails is logged and skipped, the pass always
//! runs to the end.

use std::io::{Read, Write};

use boardpane_state::{FieldReader, FieldWriter};
use boardpane_window::PersistableHandle;

use crate::error::SessionError;
use crate::format::{read_records, Record, SnapshotFormat, SnapshotHeader};
use crate::report::{FailureReason, RestoreReport, SaveReport, WindowFailure};
use crate::Result;

/// Kind tag and payload size of one record, as listed by `inspect`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSummary {
    pub kind: String,
    pub payload_len: usize,
}

#[derive(Debug, Clone)]
pub struct SnapshotSummary {
    pub header: SnapshotHeader,
    pub records: Vec<RecordSummary>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SessionSnapshot {
    format: SnapshotFormat,
}

impl SessionSnapshot {
    pub fn new(format: SnapshotFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> SnapshotFormat {
        self.format
    }

    /// Saves every window in order. A window that fails to encode is left out of
    /// a tagged stream. An untagged stream gets its plan's default values in its
    /// place, so the windows after it stay aligned.
    pub fn write<W: Write>(
        &self,
        stream: &mut W,
        windows: &[PersistableHandle],
    ) -> Result<SaveReport> {
        let mut report = SaveReport::default();
        let mut payloads: Vec<(&'static str, Vec<u8>)> = Vec::with_capacity(windows.len());

        for (index, handle) in windows.iter().enumerate() {
            let window = handle.lock();
            let kind = window.kind();
            let mut out = FieldWriter::new();
            match window.save(&mut out) {
                Ok(()) => {
                    payloads.push((kind, out.into_bytes()));
                    report.written += 1;
                }
                Err(err) => {
                    tracing::warn!(kind, index, error = %err, "Failed to save window");
                    if self.format == SnapshotFormat::Untagged {
                        let mut defaults = FieldWriter::new();
                        window.wire_plan().encode_defaults(&mut defaults)?;
                        payloads.push((kind, defaults.into_bytes()));
                    }
                    report.failed.push(WindowFailure {
                        index,
                        kind,
                        reason: FailureReason::Encode(err),
                    });
                }
            }
        }

        let mut out = FieldWriter::new();
        match self.format {
            SnapshotFormat::Tagged => {
                SnapshotHeader::new(payloads.len() as u32).write_to(&mut out);
                for (kind, payload) in &payloads {
                    Record::write(kind, payload, &mut out)?;
                }
            }
            SnapshotFormat::Untagged => {
                for (_, payload) in &payloads {
                    out.put_bytes(payload);
                }
            }
        }

        stream.write_all(out.as_bytes())?;
        stream.flush()?;

        report.bytes = out.len();
        tracing::info!(
            format = %self.format,
            written = report.written,
            failed = report.failed.len(),
            bytes = report.bytes,
            "Saved session snapshot"
        );
        Ok(report)
    }

    /// Restores windows from a stream in either format, detected from its first
    /// bytes. Errors only for stream-level problems; windows that cannot be
    /// restored keep their state and are listed in the report.
    pub fn read<R: Read>(
        &self,
        stream: &mut R,
        windows: &[PersistableHandle],
    ) -> Result<RestoreReport> {
        let mut bytes = Vec::new();
        stream.read_to_end(&mut bytes)?;

        let report = match SnapshotFormat::detect(&bytes) {
            SnapshotFormat::Tagged => read_tagged(&bytes, windows)?,
            SnapshotFormat::Untagged => read_untagged(&bytes, windows),
        };

        tracing::info!(
            format = %report.format,
            restored = report.restored,
            defaulted = report.defaulted.len(),
            unclaimed = report.unclaimed,
            "Restored session snapshot"
        );
        Ok(report)
    }

    /// Lists the records of a tagged stream without touching any window.
    pub fn inspect(bytes: &[u8]) -> Result<SnapshotSummary> {
        let mut input = FieldReader::new(bytes);
        let header = SnapshotHeader::read_from(&mut input)?;
        let (records, damaged) = read_records(&mut input, header.record_count);
        if let Some(err) = damaged {
            return Err(SessionError::Header(err));
        }
        Ok(SnapshotSummary {
            header,
            records: records
                .into_iter()
                .map(|record| RecordSummary {
                    kind: record.kind,
                    payload_len: record.payload.len(),
                })
                .collect(),
        })
    }
}

/// Each window claims the first unclaimed record carrying its kind, so records
/// of the same kind are handed out in stream order.
fn read_tagged(bytes: &[u8], windows: &[PersistableHandle]) -> Result<RestoreReport> {
    let mut input = FieldReader::new(bytes);
    let header = SnapshotHeader::read_from(&mut input)?;
    let (records, damaged) = read_records(&mut input, header.record_count);
    if let Some(err) = damaged {
        tracing::warn!(
            error = %err,
            intact = records.len(),
            expected = header.record_count,
            "Session stream damaged, restoring intact records only"
        );
    }

    let mut report = RestoreReport::new(SnapshotFormat::Tagged);
    report.saved_at = Some(header.saved_at);
    let mut claimed = vec![false; records.len()];

    for (index, handle) in windows.iter().enumerate() {
        let mut window = handle.lock();
        let kind = window.kind();
        let found = (0..records.len()).find(|&slot| !claimed[slot] && records[slot].kind == kind);

        let Some(slot) = found else {
            tracing::warn!(kind, index, "No saved state for window, keeping defaults");
            report.defaulted.push(WindowFailure {
                index,
                kind,
                reason: FailureReason::MissingRecord,
            });
            continue;
        };
        claimed[slot] = true;

        let mut payload = FieldReader::new(records[slot].payload);
        if window.read(&mut payload) {
            if !payload.is_at_end() {
                tracing::debug!(
                    kind,
                    unread = payload.remaining(),
                    "Ignoring trailing record bytes"
                );
            }
            report.restored += 1;
        } else {
            report.defaulted.push(WindowFailure {
                index,
                kind,
                reason: FailureReason::Decode,
            });
        }
    }

    report.unclaimed = claimed.iter().filter(|&&taken| !taken).count();
    if report.unclaimed > 0 {
        tracing::debug!(unclaimed = report.unclaimed, "Session records without a window");
    }
    Ok(report)
}

/// Windows read consecutive field groups by position. Nothing in the stream
/// says where a window's fields end, so once one window fails the following
/// ones may read from the wrong offset.
fn read_untagged(bytes: &[u8], windows: &[PersistableHandle]) -> RestoreReport {
    let mut input = FieldReader::new(bytes);
    let mut report = RestoreReport::new(SnapshotFormat::Untagged);

    for (index, handle) in windows.iter().enumerate() {
        let mut window = handle.lock();
        if window.read(&mut input) {
            report.restored += 1;
        } else {
            report.defaulted.push(WindowFailure {
                index,
                kind: window.kind(),
                reason: FailureReason::Decode,
            });
        }
    }

    if !input.is_at_end() {
        tracing::debug!(unread = input.remaining(), "Untagged session has trailing bytes");
    }
    report
}
