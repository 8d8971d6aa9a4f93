//! Converts Minecraft Education Edition worlds into standard Bedrock
//! worlds.
//!
//! Education Edition marks a world by writing three extra keys into the
//! root compound of `level.dat`: `eduOffer`, `eduSharedResource`, and
//! `educationFeaturesEnabled`. Regular Bedrock refuses to open a world
//! that carries them. This crate removes exactly those keys and leaves
//! every other byte of the world alone.
//!
//! The pipeline in [`convert_world`] reads `level.dat` out of an archive,
//! splits off the optional version/length header, decodes the NBT
//! document, strips the Education keys, re-encodes, reconciles the header
//! length, writes the entry back, and serializes the archive. Progress is
//! reported through a [`ProgressSink`]; errors abort the conversion
//! before any output is produced.
//!
//! # Design Principles
//!
//! - **Byte fidelity** - Untouched entries and untouched tags re-encode to their
//!   original bytes; only the Education keys and the header length change.
//! - **Fail closed** - Any decode or archive error aborts the conversion; there is
//!   no partially converted output.
//! - **Storage-agnostic** - The pipeline sees archives only through the
//!   [`WorldArchive`] trait.
//! - **Observable, not steerable** - The progress sink is a pure side channel the
//!   pipeline never branches on.
//!
//! # Example
//!
//! ```
//! use nbt::{encode_document, Compound, Document, Tag};
//! use world::{convert_world, MemoryArchive, NoProgress, WorldArchive, LEVEL_DAT_ENTRY};
//!
//! let mut root = Compound::new();
//! root.insert("LevelName".to_owned(), Tag::String("Classroom".to_owned()));
//! root.insert("eduOffer".to_owned(), Tag::Int(1));
//! let document = Document { name: String::new(), root };
//!
//! let mut archive = MemoryArchive::new();
//! archive.write_entry(LEVEL_DAT_ENTRY, encode_document(&document)?)?;
//!
//! let outcome = convert_world(archive, &mut NoProgress)?;
//! assert_eq!(outcome.removed, ["eduOffer"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod archive;
mod convert;
mod edu;
mod error;
mod header;
mod progress;

pub use archive::{ArchiveError, MemoryArchive, WorldArchive};
pub use convert::{convert_level_dat, convert_world, Converted, ConvertedLevelDat, LEVEL_DAT_ENTRY};
pub use edu::{has_education_keys, strip_education_keys, EDUCATION_KEYS};
pub use error::{ConvertError, ConvertResult};
pub use header::{detect_header, LevelDatHeader, HEADER_SIZE};
pub use progress::{NoProgress, ProgressSink, Stage};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_exports() {
        let _ = convert_world::<MemoryArchive>;
        let _ = convert_level_dat;
        let _ = detect_header;
        let _ = strip_education_keys;
        let _: Stage = Stage::Reading;
        let _: NoProgress = NoProgress;
        assert_eq!(LEVEL_DAT_ENTRY, "level.dat");
        assert_eq!(HEADER_SIZE, 8);
        assert_eq!(EDUCATION_KEYS.len(), 3);
    }
}
