//! Primitive field streams
//!
//! Every value is fixed-width or length-prefixed, big-endian, so a reader always
//! knows where a field ends without any type information in the stream.

use crate::error::{DecodeError, EncodeError};

/// Upper bound for length-prefixed strings, in bytes.
pub const MAX_TEXT_LEN: usize = 64 * 1024;
/// Upper bound for length-prefixed index lists.
pub const MAX_INDEX_COUNT: usize = 65_536;

/// Append-only buffer of encoded fields.
#[derive(Debug, Default, Clone)]
pub struct FieldWriter {
    buf: Vec<u8>,
}

impl FieldWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn put_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn put_u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn put_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn put_i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn put_i64(&mut self, value: i64) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn put_bool(&mut self, value: bool) {
        self.buf.push(u8::from(value));
    }

    pub fn put_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Writes a u32 byte length followed by the UTF-8 bytes.
    pub fn put_str(&mut self, value: &str) -> Result<(), EncodeError> {
        if value.len() > MAX_TEXT_LEN {
            return Err(EncodeError::TooLong {
                field: "text",
                len: value.len(),
                limit: MAX_TEXT_LEN,
            });
        }
        self.put_u32(value.len() as u32);
        self.buf.extend_from_slice(value.as_bytes());
        Ok(())
    }

    /// Writes a u16 byte length followed by the UTF-8 bytes. Used for record tags.
    pub fn put_short_str(&mut self, value: &str) -> Result<(), EncodeError> {
        let len = u16::try_from(value.len()).map_err(|_| EncodeError::TooLong {
            field: "tag",
            len: value.len(),
            limit: u16::MAX as usize,
        })?;
        self.put_u16(len);
        self.buf.extend_from_slice(value.as_bytes());
        Ok(())
    }

    /// Writes a u32 count followed by each index as u32.
    pub fn put_indices(&mut self, indices: &[u32]) -> Result<(), EncodeError> {
        if indices.len() > MAX_INDEX_COUNT {
            return Err(EncodeError::TooLong {
                field: "selected_indices",
                len: indices.len(),
                limit: MAX_INDEX_COUNT,
            });
        }
        self.put_u32(indices.len() as u32);
        for index in indices {
            self.put_u32(*index);
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// Cursor over encoded fields.
#[derive(Debug, Clone)]
pub struct FieldReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> FieldReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.remaining() == 0
    }

    fn take(&mut self, field: &'static str, len: usize) -> Result<&'a [u8], DecodeError> {
        let available = self.remaining();
        if len > available {
            return Err(DecodeError::Truncated {
                field,
                needed: len,
                available,
            });
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    fn take_array<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(field, N)?);
        Ok(out)
    }

    pub fn take_u8(&mut self, field: &'static str) -> Result<u8, DecodeError> {
        Ok(self.take_array::<1>(field)?[0])
    }

    pub fn take_u16(&mut self, field: &'static str) -> Result<u16, DecodeError> {
        Ok(u16::from_be_bytes(self.take_array(field)?))
    }

    pub fn take_u32(&mut self, field: &'static str) -> Result<u32, DecodeError> {
        Ok(u32::from_be_bytes(self.take_array(field)?))
    }

    pub fn take_i32(&mut self, field: &'static str) -> Result<i32, DecodeError> {
        Ok(i32::from_be_bytes(self.take_array(field)?))
    }

    pub fn take_i64(&mut self, field: &'static str) -> Result<i64, DecodeError> {
        Ok(i64::from_be_bytes(self.take_array(field)?))
    }

    pub fn take_bool(&mut self, field: &'static str) -> Result<bool, DecodeError> {
        match self.take_u8(field)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(DecodeError::malformed(
                field,
                format!("invalid boolean byte {other:#04x}"),
            )),
        }
    }

    pub fn take_bytes(&mut self, field: &'static str, len: usize) -> Result<&'a [u8], DecodeError> {
        self.take(field, len)
    }

    pub fn take_str(&mut self, field: &'static str) -> Result<String, DecodeError> {
        let len = self.take_u32(field)? as usize;
        if len > MAX_TEXT_LEN {
            return Err(DecodeError::malformed(
                field,
                format!("length {len} exceeds limit of {MAX_TEXT_LEN}"),
            ));
        }
        self.utf8(field, len)
    }

    pub fn take_short_str(&mut self, field: &'static str) -> Result<String, DecodeError> {
        let len = self.take_u16(field)? as usize;
        self.utf8(field, len)
    }

    fn utf8(&mut self, field: &'static str, len: usize) -> Result<String, DecodeError> {
        let bytes = self.take(field, len)?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|e| DecodeError::malformed(field, e.to_string()))
    }

    pub fn take_indices(&mut self, field: &'static str) -> Result<Vec<u32>, DecodeError> {
        let count = self.take_u32(field)? as usize;
        if count > MAX_INDEX_COUNT {
            return Err(DecodeError::malformed(
                field,
                format!("count {count} exceeds limit of {MAX_INDEX_COUNT}"),
            ));
        }
        // Check the whole block up front so a bad count never allocates.
        let available = self.remaining();
        if count * 4 > available {
            return Err(DecodeError::Truncated {
                field,
                needed: count * 4,
                available,
            });
        }
        let mut indices = Vec::with_capacity(count);
        for _ in 0..count {
            indices.push(self.take_u32(field)?);
        }
        Ok(indices)
    }
}
