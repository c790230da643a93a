//! Bounds-checked little-endian reads over an in-memory buffer

use byteorder::{ByteOrder, LittleEndian};
use thiserror::Error;

/// Failure while reading primitive values from a buffer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    /// Fewer bytes left than the read needs
    #[error("unexpected end of data at offset {position} (wanted {wanted} bytes, {available} left)")]
    UnexpectedEof {
        position: usize,
        wanted: usize,
        available: usize,
    },
    /// A UTF-16 string contained an unpaired surrogate
    #[error("invalid UTF-16 string at offset {position}")]
    InvalidString { position: usize },
}

/// Cursor over a borrowed byte slice.
///
/// Every read advances the position; a failed read leaves it untouched.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current offset from the start of the buffer
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of unread bytes
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// The unread tail without consuming it
    pub fn rest(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Borrow the next `len` bytes and advance past them
    pub fn bytes(&mut self, len: usize) -> Result<&'a [u8], ReadError> {
        if len > self.remaining() {
            return Err(ReadError::UnexpectedEof {
                position: self.pos,
                wanted: len,
                available: self.remaining(),
            });
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    pub fn skip(&mut self, len: usize) -> Result<(), ReadError> {
        self.bytes(len).map(|_| ())
    }

    /// Read a 4-character tag as raw bytes
    pub fn tag(&mut self) -> Result<[u8; 4], ReadError> {
        let b = self.bytes(4)?;
        Ok([b[0], b[1], b[2], b[3]])
    }

    pub fn u8(&mut self) -> Result<u8, ReadError> {
        Ok(self.bytes(1)?[0])
    }

    pub fn u16(&mut self) -> Result<u16, ReadError> {
        Ok(LittleEndian::read_u16(self.bytes(2)?))
    }

    pub fn i16(&mut self) -> Result<i16, ReadError> {
        Ok(LittleEndian::read_i16(self.bytes(2)?))
    }

    pub fn u32(&mut self) -> Result<u32, ReadError> {
        Ok(LittleEndian::read_u32(self.bytes(4)?))
    }

    pub fn i32(&mut self) -> Result<i32, ReadError> {
        Ok(LittleEndian::read_i32(self.bytes(4)?))
    }

    pub fn u64(&mut self) -> Result<u64, ReadError> {
        Ok(LittleEndian::read_u64(self.bytes(8)?))
    }

    pub fn f32(&mut self) -> Result<f32, ReadError> {
        Ok(LittleEndian::read_f32(self.bytes(4)?))
    }

    /// Read a `u32` character count followed by that many UTF-16LE code units
    pub fn utf16_string(&mut self) -> Result<String, ReadError> {
        let start = self.pos;
        let count = self.u32()? as usize;
        let raw = match count.checked_mul(2) {
            Some(len) => self.bytes(len),
            None => Err(ReadError::UnexpectedEof {
                position: self.pos,
                wanted: usize::MAX,
                available: self.remaining(),
            }),
        };
        let raw = match raw {
            Ok(raw) => raw,
            Err(e) => {
                self.pos = start;
                return Err(e);
            }
        };

        let units: Vec<u16> = raw.chunks_exact(2).map(LittleEndian::read_u16).collect();
        String::from_utf16(&units).map_err(|_| {
            self.pos = start;
            ReadError::InvalidString { position: start }
        })
    }
}
