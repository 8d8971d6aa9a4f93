//! Archive access: the storage side of a world.

use std::fmt;
use std::io;

use indexmap::IndexMap;
use nbt::{ByteReader, ByteWriter, DecodeError};

/// Errors raised by archive backends.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ArchiveError {
    /// The named entry does not exist.
    EntryNotFound {
        /// The requested entry name.
        name: String,
    },
    /// The bytes do not form a valid archive.
    Malformed {
        /// What was wrong with them.
        message: String,
    },
    /// An underlying I/O failure.
    Io {
        /// The rendered message of the source error.
        message: String,
    },
}

impl fmt::Display for ArchiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EntryNotFound { name } => write!(f, "archive entry not found: {name}"),
            Self::Malformed { message } => write!(f, "malformed archive: {message}"),
            Self::Io { message } => write!(f, "archive i/o error: {message}"),
        }
    }
}

impl std::error::Error for ArchiveError {}

impl From<io::Error> for ArchiveError {
    fn from(err: io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
        }
    }
}

/// Byte-level access to a world's files.
///
/// The conversion pipeline needs exactly three operations: read one
/// entry, replace one entry, and serialize the whole archive. Everything
/// the pipeline does not touch must pass through unchanged.
pub trait WorldArchive {
    /// Returns the raw bytes of the named entry.
    ///
    /// Takes `&mut self` because seekable backends reposition while
    /// reading.
    fn read_entry(&mut self, name: &str) -> Result<Vec<u8>, ArchiveError>;

    /// Replaces the named entry, or creates it if absent. Replacement
    /// keeps the entry's position; creation appends.
    fn write_entry(&mut self, name: &str, bytes: Vec<u8>) -> Result<(), ArchiveError>;

    /// Serializes the archive, consuming it.
    fn into_bytes(self) -> Result<Vec<u8>, ArchiveError>
    where
        Self: Sized;
}

/// An in-memory archive keyed by entry name.
///
/// Entries keep insertion order. The serialized form is deterministic:
/// a `u32` entry count, then per entry a `u16` name length, the name,
/// a `u32` data length, and the data, all little-endian.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryArchive {
    entries: IndexMap<String, Vec<u8>>,
}

impl MemoryArchive {
    /// Creates an empty archive.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses bytes produced by [`into_bytes`](WorldArchive::into_bytes).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ArchiveError> {
        let mut reader = ByteReader::new(bytes);
        let count = reader.read_u32().map_err(malformed)?;

        let mut entries = IndexMap::new();
        for _ in 0..count {
            let name_offset = reader.position();
            let name_len = reader.read_u16().map_err(malformed)?;
            let name_bytes = reader.read_bytes(usize::from(name_len)).map_err(malformed)?;
            let name = match std::str::from_utf8(name_bytes) {
                Ok(name) => name.to_owned(),
                Err(_) => {
                    return Err(ArchiveError::Malformed {
                        message: format!("entry name at byte {name_offset} is not valid UTF-8"),
                    });
                }
            };
            if entries.contains_key(&name) {
                return Err(ArchiveError::Malformed {
                    message: format!("duplicate entry name {name:?}"),
                });
            }

            let data_len = reader.read_u32().map_err(malformed)?;
            let data = reader.read_bytes(data_len as usize).map_err(malformed)?;
            entries.insert(name, data.to_vec());
        }

        if !reader.is_empty() {
            return Err(ArchiveError::Malformed {
                message: format!("{} trailing bytes after the last entry", reader.remaining()),
            });
        }
        Ok(Self { entries })
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the named entry exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Returns the named entry's bytes, if present.
    #[must_use]
    pub fn entry(&self, name: &str) -> Option<&[u8]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    /// Entry names in insertion order.
    pub fn entry_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

fn malformed(err: DecodeError) -> ArchiveError {
    // The reader error text already names the offset and byte counts.
    ArchiveError::Malformed {
        message: err.to_string(),
    }
}

fn too_large(what: &str, len: usize) -> ArchiveError {
    ArchiveError::Malformed {
        message: format!("{what} too large to serialize: {len}"),
    }
}

impl WorldArchive for MemoryArchive {
    fn read_entry(&mut self, name: &str) -> Result<Vec<u8>, ArchiveError> {
        self.entries
            .get(name)
            .cloned()
            .ok_or_else(|| ArchiveError::EntryNotFound {
                name: name.to_owned(),
            })
    }

    fn write_entry(&mut self, name: &str, bytes: Vec<u8>) -> Result<(), ArchiveError> {
        self.entries.insert(name.to_owned(), bytes);
        Ok(())
    }

    fn into_bytes(self) -> Result<Vec<u8>, ArchiveError> {
        let count =
            u32::try_from(self.entries.len()).map_err(|_| too_large("entry count", self.entries.len()))?;

        let mut writer = ByteWriter::new();
        writer.write_u32(count);
        for (name, data) in self.entries {
            let name_len =
                u16::try_from(name.len()).map_err(|_| too_large("entry name", name.len()))?;
            let data_len =
                u32::try_from(data.len()).map_err(|_| too_large("entry data", data.len()))?;
            writer.write_u16(name_len);
            writer.write_bytes(name.as_bytes());
            writer.write_u32(data_len);
            writer.write_bytes(&data);
        }
        Ok(writer.finish())
    }
}
