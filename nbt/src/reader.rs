//! A bounds-checked little-endian byte reader.

use crate::error::{DecodeError, DecodeResult};

/// A position-tracking cursor over a byte slice.
///
/// Every read is bounds-checked and failed reads report the offset at
/// which they were attempted; the reader never panics on malformed input.
/// All multi-byte reads are little-endian, matching Bedrock's on-disk
/// byte order.
#[derive(Debug)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Creates a reader positioned at the first byte of `data`.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the current offset from the start of the input.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Returns the number of unread bytes.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Returns `true` if no unread bytes remain.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Reads `len` raw bytes.
    pub fn read_bytes(&mut self, len: usize) -> DecodeResult<&'a [u8]> {
        let available = self.remaining();
        if len > available {
            return Err(DecodeError::UnexpectedEof {
                offset: self.pos,
                needed: len,
                available,
            });
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    fn read_array<const N: usize>(&mut self) -> DecodeResult<[u8; N]> {
        let bytes = self.read_bytes(N)?;
        let mut array = [0u8; N];
        array.copy_from_slice(bytes);
        Ok(array)
    }

    /// Reads one unsigned byte.
    pub fn read_u8(&mut self) -> DecodeResult<u8> {
        Ok(u8::from_le_bytes(self.read_array::<1>()?))
    }

    /// Reads one signed byte.
    pub fn read_i8(&mut self) -> DecodeResult<i8> {
        Ok(i8::from_le_bytes(self.read_array::<1>()?))
    }

    /// Reads a little-endian `u16`.
    pub fn read_u16(&mut self) -> DecodeResult<u16> {
        Ok(u16::from_le_bytes(self.read_array::<2>()?))
    }

    /// Reads a little-endian `i16`.
    pub fn read_i16(&mut self) -> DecodeResult<i16> {
        Ok(i16::from_le_bytes(self.read_array::<2>()?))
    }

    /// Reads a little-endian `u32`.
    pub fn read_u32(&mut self) -> DecodeResult<u32> {
        Ok(u32::from_le_bytes(self.read_array::<4>()?))
    }

    /// Reads a little-endian `i32`.
    pub fn read_i32(&mut self) -> DecodeResult<i32> {
        Ok(i32::from_le_bytes(self.read_array::<4>()?))
    }

    /// Reads a little-endian `i64`.
    pub fn read_i64(&mut self) -> DecodeResult<i64> {
        Ok(i64::from_le_bytes(self.read_array::<8>()?))
    }

    /// Reads a little-endian `f32`.
    ///
    /// The bit pattern is preserved exactly, NaN payloads included.
    pub fn read_f32(&mut self) -> DecodeResult<f32> {
        Ok(f32::from_le_bytes(self.read_array::<4>()?))
    }

    /// Reads a little-endian `f64`.
    ///
    /// The bit pattern is preserved exactly, NaN payloads included.
    pub fn read_f64(&mut self) -> DecodeResult<f64> {
        Ok(f64::from_le_bytes(self.read_array::<8>()?))
    }
}
