//! Detection and reconstruction of the optional level.dat header.
//!
//! See `FORMAT.md` in the repository root for the byte layout and the
//! exact detection rule.

/// Header size in bytes: a version field plus a payload length, both
/// 32-bit little-endian.
pub const HEADER_SIZE: usize = 8;

/// The version/length prelude some Bedrock level.dat files carry.
///
/// There is no magic number; presence is decided by [`detect_header`].
/// `payload_len` counts the NBT bytes that follow the header and must be
/// recomputed whenever that payload is rewritten. `version` is never
/// rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelDatHeader {
    /// Storage version; a small positive integer (8 and 9 in the wild).
    pub version: u32,
    /// Byte length of the NBT payload that follows the header.
    pub payload_len: u32,
}

impl LevelDatHeader {
    /// Creates a header record.
    #[must_use]
    pub const fn new(version: u32, payload_len: u32) -> Self {
        Self {
            version,
            payload_len,
        }
    }

    /// Returns the same header with the length field replaced.
    #[must_use]
    pub const fn with_payload_len(self, payload_len: u32) -> Self {
        Self {
            version: self.version,
            payload_len,
        }
    }

    /// Encodes the header to its 8-byte wire form.
    #[must_use]
    pub fn encode(self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[..4].copy_from_slice(&self.version.to_le_bytes());
        bytes[4..].copy_from_slice(&self.payload_len.to_le_bytes());
        bytes
    }
}

/// Splits raw level.dat bytes into an optional header and the NBT body.
///
/// A header is recognized when the input is longer than eight bytes, the
/// first field is a plausible version (`0 < v < 100`), and the second
/// field equals the byte count after the header exactly. Inputs of eight
/// bytes or fewer are always treated as headerless.
///
/// The rule is a heuristic: a headerless payload whose first eight bytes
/// happen to satisfy it is misread as headered. That ambiguity is
/// inherent to the format and accepted as-is.
#[must_use]
pub fn detect_header(bytes: &[u8]) -> (Option<LevelDatHeader>, &[u8]) {
    if bytes.len() <= HEADER_SIZE {
        return (None, bytes);
    }

    let version = i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    let declared_len = i32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    let body = &bytes[HEADER_SIZE..];

    let version_in_range = version > 0 && version < 100;
    let length_matches = usize::try_from(declared_len).is_ok_and(|len| len == body.len());
    if version_in_range && length_matches {
        let header = LevelDatHeader::new(version as u32, declared_len as u32);
        (Some(header), body)
    } else {
        (None, bytes)
    }
}
