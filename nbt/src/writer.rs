//! A growable little-endian byte writer.

/// An append-only byte buffer with little-endian write helpers.
///
/// Writes cannot fail; callers take the buffer with
/// [`finish`](Self::finish) when done. This is the mirror of
/// [`ByteReader`](crate::ByteReader): bytes written here read back as the
/// same values there.
#[derive(Debug, Default)]
pub struct ByteWriter {
    bytes: Vec<u8>,
}

impl ByteWriter {
    /// Creates an empty writer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty writer with `capacity` bytes preallocated.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Writes one unsigned byte.
    pub fn write_u8(&mut self, value: u8) {
        self.bytes.push(value);
    }

    /// Writes one signed byte.
    pub fn write_i8(&mut self, value: i8) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a little-endian `u16`.
    pub fn write_u16(&mut self, value: u16) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a little-endian `i16`.
    pub fn write_i16(&mut self, value: i16) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a little-endian `u32`.
    pub fn write_u32(&mut self, value: u32) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a little-endian `i32`.
    pub fn write_i32(&mut self, value: i32) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a little-endian `i64`.
    pub fn write_i64(&mut self, value: i64) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a little-endian `f32`, preserving the bit pattern exactly.
    pub fn write_f32(&mut self, value: f32) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a little-endian `f64`, preserving the bit pattern exactly.
    pub fn write_f64(&mut self, value: f64) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes raw bytes verbatim.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// Consumes the writer and returns the buffer.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::ByteReader;

    #[test]
    fn new_writer_is_empty() {
        let writer = ByteWriter::new();
        assert!(writer.is_empty());
        assert_eq!(writer.len(), 0);
        assert_eq!(writer.finish(), Vec::<u8>::new());
    }

    #[test]
    fn writes_are_little_endian() {
        let mut writer = ByteWriter::new();
        writer.write_i32(0x1234_5678);
        writer.write_u16(0xBEEF);
        assert_eq!(writer.finish(), [0x78, 0x56, 0x34, 0x12, 0xEF, 0xBE]);
    }

    #[test]
    fn written_values_read_back_unchanged() {
        let mut writer = ByteWriter::new();
        writer.write_u8(7);
        writer.write_i8(-7);
        writer.write_i16(-300);
        writer.write_i32(1_000_000);
        writer.write_i64(-9_000_000_000);
        writer.write_f32(1.5);
        writer.write_f64(-2.25);
        writer.write_bytes(b"tail");
        let bytes = writer.finish();

        let mut reader = ByteReader::new(&bytes);
        assert_eq!(reader.read_u8().unwrap(), 7);
        assert_eq!(reader.read_i8().unwrap(), -7);
        assert_eq!(reader.read_i16().unwrap(), -300);
        assert_eq!(reader.read_i32().unwrap(), 1_000_000);
        assert_eq!(reader.read_i64().unwrap(), -9_000_000_000);
        assert_eq!(reader.read_f32().unwrap().to_le_bytes(), 1.5f32.to_le_bytes());
        assert_eq!(reader.read_f64().unwrap().to_le_bytes(), (-2.25f64).to_le_bytes());
        assert_eq!(reader.read_bytes(4).unwrap(), b"tail");
        assert!(reader.is_empty());
    }

    #[test]
    fn with_capacity_starts_empty() {
        let writer = ByteWriter::with_capacity(64);
        assert!(writer.is_empty());
    }
}
