//! Error types for NBT decoding and encoding.

use std::fmt;

/// Convenience alias for decoder results.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Errors that can occur while decoding NBT bytes.
///
/// Every variant carries the byte offset at which decoding failed, counted
/// from the start of the NBT payload (after any level.dat header).
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// The input ended before the current value was complete.
    UnexpectedEof {
        /// Offset at which the over-long read was attempted.
        offset: usize,
        /// Bytes the read needed.
        needed: usize,
        /// Bytes that were actually available.
        available: usize,
    },
    /// A tag id byte outside the defined range `0x00..=0x0C`.
    UnknownTagId {
        /// The raw id byte.
        id: u8,
        /// Offset of the id byte.
        offset: usize,
    },
    /// The document's root tag was not a compound.
    RootNotCompound {
        /// The raw id byte found instead.
        id: u8,
        /// Offset of the id byte.
        offset: usize,
    },
    /// A list or array declared a negative element count.
    NegativeLength {
        /// The declared count.
        len: i32,
        /// Offset of the count field.
        offset: usize,
    },
    /// A name or string value was not valid UTF-8.
    InvalidString {
        /// Offset of the string's length prefix.
        offset: usize,
    },
    /// A compound contained the same key twice.
    ///
    /// Duplicate keys cannot survive a decode/encode round trip, so they
    /// are rejected rather than silently collapsed.
    DuplicateKey {
        /// The repeated key.
        key: String,
        /// Offset of the second occurrence's length prefix.
        offset: usize,
    },
    /// A list declared element type `End` together with a nonzero count.
    ///
    /// `End` has no payload form, so such a list has no readable elements.
    InvalidEndList {
        /// The declared count.
        count: usize,
        /// Offset of the element type byte.
        offset: usize,
    },
    /// An `End` tag appeared where a value was required.
    ///
    /// `End` terminates a compound body and never carries a value; the
    /// decoder intercepts it before asking for one, so this variant is
    /// reserved for misuse of the lower-level entry points.
    UnexpectedEndTag {
        /// Offset at which the value was expected.
        offset: usize,
    },
    /// Containers were nested deeper than the decoder accepts.
    DepthLimitExceeded {
        /// The nesting limit that was exceeded.
        limit: usize,
    },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof {
                offset,
                needed,
                available,
            } => write!(
                f,
                "unexpected end of input at byte {offset}: need {needed} bytes, have {available}"
            ),
            Self::UnknownTagId { id, offset } => {
                write!(f, "unknown tag id 0x{id:02X} at byte {offset}")
            }
            Self::RootNotCompound { id, offset } => {
                write!(f, "root tag id 0x{id:02X} at byte {offset} is not a compound")
            }
            Self::NegativeLength { len, offset } => {
                write!(f, "negative element count {len} at byte {offset}")
            }
            Self::InvalidString { offset } => {
                write!(f, "string at byte {offset} is not valid UTF-8")
            }
            Self::DuplicateKey { key, offset } => {
                write!(f, "duplicate compound key {key:?} at byte {offset}")
            }
            Self::InvalidEndList { count, offset } => {
                write!(
                    f,
                    "list at byte {offset} declares element type End with {count} elements"
                )
            }
            Self::UnexpectedEndTag { offset } => {
                write!(f, "unexpected End tag at byte {offset}")
            }
            Self::DepthLimitExceeded { limit } => {
                write!(f, "containers nested deeper than the limit of {limit}")
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// Errors that can occur while encoding a tag tree.
///
/// Encoding fails only when the tree itself cannot be represented in the
/// wire format; any tree produced by the decoder encodes without error.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EncodeError {
    /// A name or string value longer than the `u16` length prefix allows.
    StringTooLong {
        /// Byte length of the offending string.
        len: usize,
        /// Maximum representable length.
        max: usize,
    },
    /// A list or array with more elements than the `i32` count allows.
    SeqTooLong {
        /// Element count of the offending sequence.
        len: usize,
        /// Maximum representable count.
        max: usize,
    },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StringTooLong { len, max } => {
                write!(f, "string of {len} bytes exceeds the maximum of {max}")
            }
            Self::SeqTooLong { len, max } => {
                write!(f, "sequence of {len} elements exceeds the maximum of {max}")
            }
        }
    }
}

impl std::error::Error for EncodeError {}
