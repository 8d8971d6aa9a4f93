//! Zip-backed `.mcworld` archives.

use std::io::{Cursor, Read, Write};

use indexmap::IndexMap;
use world::{ArchiveError, WorldArchive};
use zip::result::ZipError;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Zip local-file-header magic. `.mcworld` files are plain zip archives.
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// Returns `true` if `bytes` start like a zip archive rather than a bare
/// level.dat payload.
#[must_use]
pub fn is_zip_payload(bytes: &[u8]) -> bool {
    bytes.len() >= ZIP_MAGIC.len() && bytes[..ZIP_MAGIC.len()] == ZIP_MAGIC
}

/// A `.mcworld` archive opened from bytes held in memory.
///
/// Replaced entries are kept aside and deflated during serialization;
/// every untouched entry is copied over raw, original compression and
/// metadata included.
#[derive(Debug)]
pub struct McworldArchive {
    archive: ZipArchive<Cursor<Vec<u8>>>,
    replacements: IndexMap<String, Vec<u8>>,
}

impl McworldArchive {
    /// Opens a zip archive from its raw bytes.
    pub fn open(bytes: Vec<u8>) -> Result<Self, ArchiveError> {
        let archive = ZipArchive::new(Cursor::new(bytes)).map_err(zip_error)?;
        Ok(Self {
            archive,
            replacements: IndexMap::new(),
        })
    }

    /// Number of entries in the original archive.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.archive.len()
    }
}

fn zip_error(err: ZipError) -> ArchiveError {
    match err {
        ZipError::Io(inner) => ArchiveError::Io {
            message: inner.to_string(),
        },
        other => ArchiveError::Malformed {
            message: other.to_string(),
        },
    }
}

fn deflated() -> FileOptions {
    FileOptions::default().compression_method(CompressionMethod::Deflated)
}

impl WorldArchive for McworldArchive {
    fn read_entry(&mut self, name: &str) -> Result<Vec<u8>, ArchiveError> {
        if let Some(bytes) = self.replacements.get(name) {
            return Ok(bytes.clone());
        }

        let mut entry = match self.archive.by_name(name) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => {
                return Err(ArchiveError::EntryNotFound {
                    name: name.to_owned(),
                });
            }
            Err(err) => return Err(zip_error(err)),
        };
        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes)?;
        Ok(bytes)
    }

    fn write_entry(&mut self, name: &str, bytes: Vec<u8>) -> Result<(), ArchiveError> {
        self.replacements.insert(name.to_owned(), bytes);
        Ok(())
    }

    fn into_bytes(self) -> Result<Vec<u8>, ArchiveError> {
        let Self {
            mut archive,
            mut replacements,
        } = self;

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

        // Walk the original entry order; replacements take the slot of
        // the entry they replace.
        for index in 0..archive.len() {
            let entry = archive.by_index_raw(index).map_err(zip_error)?;
            if let Some(bytes) = replacements.shift_remove(entry.name()) {
                let name = entry.name().to_owned();
                drop(entry);
                writer.start_file(name, deflated()).map_err(zip_error)?;
                writer.write_all(&bytes)?;
            } else {
                writer.raw_copy_file(entry).map_err(zip_error)?;
            }
        }
        // Entries that never existed in the input are appended at the end.
        for (name, bytes) in replacements {
            writer.start_file(name, deflated()).map_err(zip_error)?;
            writer.write_all(&bytes)?;
        }

        let cursor = writer.finish().map_err(zip_error)?;
        Ok(cursor.into_inner())
    }
}
