//! Error types for world conversion.

use std::fmt;

use nbt::{DecodeError, EncodeError};

use crate::archive::ArchiveError;

/// Convenience alias for conversion results.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Errors that can occur while converting a world.
///
/// A conversion aborts on the first error; no partially converted output
/// is ever produced.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConvertError {
    /// The archive has no `level.dat` entry, so it is not a Bedrock
    /// world.
    MissingLevelData,
    /// The level.dat payload is not decodable NBT.
    Nbt(DecodeError),
    /// The pruned document could not be re-encoded.
    ///
    /// Cannot happen for documents that came out of the decoder; the
    /// variant exists because the encoder's signature is fallible.
    NbtEncode(EncodeError),
    /// The re-encoded payload is too long for the header's 32-bit length
    /// field.
    PayloadTooLarge {
        /// Byte length of the re-encoded payload.
        len: usize,
    },
    /// The archive backend failed.
    Archive(ArchiveError),
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingLevelData => write!(f, "invalid world file: level.dat not found"),
            Self::Nbt(err) => write!(f, "malformed level.dat: {err}"),
            Self::NbtEncode(err) => write!(f, "failed to re-encode level.dat: {err}"),
            Self::PayloadTooLarge { len } => write!(
                f,
                "re-encoded level.dat of {len} bytes does not fit the header length field"
            ),
            Self::Archive(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ConvertError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Nbt(err) => Some(err),
            Self::NbtEncode(err) => Some(err),
            Self::Archive(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DecodeError> for ConvertError {
    fn from(err: DecodeError) -> Self {
        Self::Nbt(err)
    }
}

impl From<EncodeError> for ConvertError {
    fn from(err: EncodeError) -> Self {
        Self::NbtEncode(err)
    }
}

impl From<ArchiveError> for ConvertError {
    fn from(err: ArchiveError) -> Self {
        Self::Archive(err)
    }
}
