//! Binary record codec for a single task.
//!
//! # Layout
//!
//! ```text
//! u8      title length
//! [u8]    title
//! u16 BE  description length
//! [u8]    description
//! u8      periodic (1 = true, anything else = false)
//! u8      priority (0..=2)
//! u8      status (3..=5)
//! u8      identifier length (1..=36)
//! [u8]    identifier
//! ```
//!
//! There is no header, version marker or checksum. Bytes after the
//! identifier are ignored.

use crate::error::{Error, Result};
use crate::task::{validate_identifier, Task};

/// Number of fixed-size bytes around the variable-length fields.
const FIXED_LEN: usize = 1 + 2 + 4;

/// Size in bytes of the encoded form of `task`.
pub fn encoded_len(task: &Task) -> usize {
    FIXED_LEN + task.title().len() + task.description().len() + task.identifier().len()
}

/// Encode a task. Field bounds are guaranteed by `Task` construction.
pub fn encode(task: &Task) -> Vec<u8> {
    let mut writer = RecordWriter::with_capacity(encoded_len(task));
    writer.put_u8(task.title().len() as u8);
    writer.put_bytes(task.title().as_bytes());
    writer.put_u16(task.description().len() as u16);
    writer.put_bytes(task.description().as_bytes());
    writer.put_u8(u8::from(task.is_periodic()));
    writer.put_u8(task.priority().as_byte());
    writer.put_u8(task.status().as_byte());
    writer.put_u8(task.identifier().len() as u8);
    writer.put_bytes(task.identifier().as_bytes());
    writer.finish()
}

/// Decode a record, validating it the same way as in-memory construction.
pub fn decode(data: &[u8]) -> Result<Task> {
    let mut reader = RecordReader::new(data);

    let title_len = reader.read_u8("title length")? as usize;
    let title = reader.read_str(title_len, "title")?;
    let description_len = reader.read_u16("description length")? as usize;
    let description = reader.read_str(description_len, "description")?;
    let is_periodic = reader.read_u8("periodicity")? == 1;
    let priority = reader.read_u8("priority")?;
    let status = reader.read_u8("status")?;
    let id_len = reader.read_u8("identifier length")? as usize;
    let identifier = reader.read_str(id_len, "identifier")?;
    validate_identifier(identifier)
        .map_err(|_| Error::InvalidRecordIdentifier(identifier.to_string()))?;

    let mut task = Task::new(title, description, is_periodic, priority, status)?;
    task.restore_identifier(identifier.to_string());
    Ok(task)
}

/// Append-only byte sink used by `encode`.
#[derive(Debug, Default)]
pub struct RecordWriter {
    buf: Vec<u8>,
}

impl RecordWriter {
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

    pub fn put_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

/// Bounds-checked cursor used by `decode`.
///
/// Every read names the field it is reading so truncation errors say where
/// the record ran short.
#[derive(Debug)]
pub struct RecordReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> RecordReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn take(&mut self, len: usize, field: &'static str) -> Result<&'a [u8]> {
        let remaining = self.remaining();
        if len > remaining {
            return Err(Error::TruncatedRecord {
                field,
                needed: len,
                remaining,
            });
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    pub fn read_u8(&mut self, field: &'static str) -> Result<u8> {
        Ok(self.take(1, field)?[0])
    }

    pub fn read_u16(&mut self, field: &'static str) -> Result<u16> {
        let bytes = self.take(2, field)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_str(&mut self, len: usize, field: &'static str) -> Result<&'a str> {
        let bytes = self.take(len, field)?;
        std::str::from_utf8(bytes).map_err(|_| Error::InvalidText { field })
    }
}
