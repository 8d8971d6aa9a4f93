//! Gathering a structural report over a level.dat payload.

use nbt::{decode_document, encode_tag, TagId};
use world::{detect_header, ConvertError, ConvertResult, LevelDatHeader, EDUCATION_KEYS};

/// What `edustrip inspect` reports about one level.dat payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectReport {
    /// The detected header, if any.
    pub header: Option<LevelDatHeader>,
    /// The root compound's name.
    pub root_name: String,
    /// One record per root-level entry, in document order.
    pub entries: Vec<EntryReport>,
    /// Education Edition keys present at the root.
    pub education_keys: Vec<&'static str>,
    /// Bytes after the end of the root tag. Conversion would drop them.
    pub trailing_bytes: usize,
}

/// One root-level entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryReport {
    /// The entry's key.
    pub name: String,
    /// The value's tag kind.
    pub kind: TagId,
    /// Encoded size of the value payload in bytes.
    pub payload_bytes: usize,
}

/// Decodes `bytes` and summarizes the document without modifying it.
pub fn inspect_level_dat(bytes: &[u8]) -> ConvertResult<InspectReport> {
    let (header, body) = detect_header(bytes);
    let (document, consumed) = decode_document(body).map_err(ConvertError::Nbt)?;

    let mut entries = Vec::with_capacity(document.root.len());
    for (name, tag) in &document.root {
        entries.push(EntryReport {
            name: name.clone(),
            kind: tag.id(),
            payload_bytes: encode_tag(tag).map_err(ConvertError::NbtEncode)?.len(),
        });
    }

    let education_keys = EDUCATION_KEYS
        .iter()
        .filter(|key| document.root.contains_key(**key))
        .copied()
        .collect();

    Ok(InspectReport {
        header,
        root_name: document.name,
        entries,
        education_keys,
        trailing_bytes: body.len() - consumed,
    })
}
