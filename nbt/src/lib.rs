//! Byte-exact codec for the NBT variant Bedrock writes to disk.
//!
//! Bedrock stores `level.dat` as little-endian, uncompressed NBT. This
//! crate decodes those bytes into a schema-less [`Document`] and encodes
//! the document back, built around one law: any input the decoder accepts
//! re-encodes to the exact bytes it came from. Input that cannot honor
//! that law (unknown tag ids, duplicate compound keys, non-UTF-8 strings)
//! is rejected at decode time instead of being coerced.
//!
//! See `FORMAT.md` in the repository root for the byte-level grammar.
//!
//! # Design Principles
//!
//! - **Round-trip exactness** - `encode(decode(bytes))` reproduces the consumed input bytes.
//! - **No unsafe code** - Safety is paramount.
//! - **Bounded operations** - Reads are bounds-checked, counts are validated before
//!   allocation, and nesting is capped at [`MAX_DEPTH`].
//! - **Explicit errors** - Failures return structured errors with byte offsets, never panics.
//!
//! # Example
//!
//! ```
//! use nbt::{decode_document, encode_document, Tag};
//!
//! let bytes = [
//!     0x0A, 0x00, 0x00, // compound root with an empty name
//!     0x01, 0x03, 0x00, b'f', b'o', b'o', 0x2A, // Byte "foo" = 42
//!     0x00, // end of root
//! ];
//!
//! let (document, consumed) = decode_document(&bytes)?;
//! assert_eq!(consumed, bytes.len());
//! assert_eq!(document.root.get("foo"), Some(&Tag::Byte(42)));
//!
//! let encoded = encode_document(&document)?;
//! assert_eq!(encoded, bytes);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod decode;
mod encode;
mod error;
mod reader;
mod tag;
mod writer;

pub use decode::{decode_document, MAX_DEPTH};
pub use encode::{encode_document, encode_tag};
pub use error::{DecodeError, DecodeResult, EncodeError};
pub use reader::ByteReader;
pub use tag::{Compound, Document, List, Tag, TagId};
pub use writer::ByteWriter;
