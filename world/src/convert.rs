//! The conversion pipeline: read, detect, decode, prune, encode,
//! reconcile, write.

use nbt::{decode_document, encode_document};

use crate::archive::{ArchiveError, WorldArchive};
use crate::edu::strip_education_keys;
use crate::error::{ConvertError, ConvertResult};
use crate::header::{detect_header, LevelDatHeader, HEADER_SIZE};
use crate::progress::{ProgressSink, Stage};

/// Name of the level metadata entry every Bedrock world carries.
pub const LEVEL_DAT_ENTRY: &str = "level.dat";

/// Outcome of rewriting one level.dat payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedLevelDat {
    /// The rewritten payload, header included when one was detected.
    pub bytes: Vec<u8>,
    /// The Education keys that were present and removed, in removal
    /// order.
    pub removed: Vec<&'static str>,
    /// The header as detected on the input, if any. Carries the original
    /// length field, not the reconciled one.
    pub header: Option<LevelDatHeader>,
}

/// Outcome of converting a whole world archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Converted {
    /// The serialized output archive.
    pub bytes: Vec<u8>,
    /// The Education keys that were present and removed, in removal
    /// order.
    pub removed: Vec<&'static str>,
    /// The header as detected on the input level.dat, if any.
    pub header: Option<LevelDatHeader>,
}

/// Rewrites one level.dat payload: strips the Education Edition keys and
/// reconciles the optional header.
///
/// Emits [`Stage::Parsing`], [`Stage::Converting`] and
/// [`Stage::Repacking`] on `sink`, in that order. Headerless input stays
/// headerless; headered input keeps its version with the length field
/// recomputed from the re-encoded document. Bytes after the end of the
/// root tag are dropped.
pub fn convert_level_dat(
    bytes: &[u8],
    sink: &mut dyn ProgressSink,
) -> ConvertResult<ConvertedLevelDat> {
    sink.record_stage(Stage::Parsing);
    let (header, body) = detect_header(bytes);
    let (mut document, _consumed) = decode_document(body)?;

    sink.record_stage(Stage::Converting);
    let removed = strip_education_keys(&mut document.root);

    sink.record_stage(Stage::Repacking);
    let payload = encode_document(&document)?;
    let bytes = match header {
        Some(original) => {
            let payload_len = u32::try_from(payload.len())
                .map_err(|_| ConvertError::PayloadTooLarge { len: payload.len() })?;
            let reconciled = original.with_payload_len(payload_len);

            let mut out = Vec::with_capacity(HEADER_SIZE + payload.len());
            out.extend_from_slice(&reconciled.encode());
            out.extend_from_slice(&payload);
            out
        }
        None => payload,
    };

    Ok(ConvertedLevelDat {
        bytes,
        removed,
        header,
    })
}

/// Converts an Education Edition world archive into a standard Bedrock
/// world archive.
///
/// Reads `level.dat`, rewrites it via [`convert_level_dat`], writes it
/// back, and serializes the archive; all other entries pass through
/// untouched. Fails with [`ConvertError::MissingLevelData`] before
/// anything is written when the entry is absent. On success every stage
/// in [`Stage::ALL`] has been emitted exactly once, in order.
pub fn convert_world<A: WorldArchive>(
    mut archive: A,
    sink: &mut dyn ProgressSink,
) -> ConvertResult<Converted> {
    sink.record_stage(Stage::Reading);
    let level_dat = match archive.read_entry(LEVEL_DAT_ENTRY) {
        Ok(bytes) => bytes,
        Err(ArchiveError::EntryNotFound { .. }) => return Err(ConvertError::MissingLevelData),
        Err(err) => return Err(ConvertError::Archive(err)),
    };

    let outcome = convert_level_dat(&level_dat, sink)?;
    archive.write_entry(LEVEL_DAT_ENTRY, outcome.bytes)?;

    sink.record_stage(Stage::Generating);
    let bytes = archive.into_bytes()?;

    Ok(Converted {
        bytes,
        removed: outcome.removed,
        header: outcome.header,
    })
}
