//! Schema-less decoding of Bedrock NBT bytes into a tag tree.

use crate::error::{DecodeError, DecodeResult};
use crate::reader::ByteReader;
use crate::tag::{Compound, Document, List, Tag, TagId};

/// Maximum container nesting the decoder accepts.
///
/// Real level.dat files stay in single digits. The cap is sized so the
/// recursion at the limit still fits a default 2 MiB thread stack and a
/// nesting bomb errors instead of overflowing it.
pub const MAX_DEPTH: usize = 128;

/// Decodes one document from the start of `bytes`.
///
/// The root tag must be a compound. Returns the document together with
/// the number of bytes consumed; callers decide what to make of any
/// trailing bytes.
///
/// # Errors
///
/// Returns a [`DecodeError`] carrying the byte offset of the failure when
/// the input is truncated, declares an unknown tag id or a negative
/// element count, contains a non-UTF-8 string or a duplicate compound
/// key, or nests containers deeper than [`MAX_DEPTH`].
pub fn decode_document(bytes: &[u8]) -> DecodeResult<(Document, usize)> {
    let mut reader = ByteReader::new(bytes);

    let root_offset = reader.position();
    let raw = reader.read_u8()?;
    match TagId::from_raw(raw) {
        Some(TagId::Compound) => {}
        Some(_) => {
            return Err(DecodeError::RootNotCompound {
                id: raw,
                offset: root_offset,
            });
        }
        None => {
            return Err(DecodeError::UnknownTagId {
                id: raw,
                offset: root_offset,
            });
        }
    }

    let name = read_string(&mut reader)?;
    let root = decode_compound_body(&mut reader, 1)?;
    let consumed = reader.position();
    Ok((Document { name, root }, consumed))
}

fn read_string(reader: &mut ByteReader<'_>) -> DecodeResult<String> {
    let offset = reader.position();
    let len = reader.read_u16()?;
    let bytes = reader.read_bytes(usize::from(len))?;
    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(text.to_owned()),
        Err(_) => Err(DecodeError::InvalidString { offset }),
    }
}

fn decode_compound_body(reader: &mut ByteReader<'_>, depth: usize) -> DecodeResult<Compound> {
    if depth > MAX_DEPTH {
        return Err(DecodeError::DepthLimitExceeded { limit: MAX_DEPTH });
    }

    let mut children = Compound::new();
    loop {
        let id_offset = reader.position();
        let raw = reader.read_u8()?;
        let Some(id) = TagId::from_raw(raw) else {
            return Err(DecodeError::UnknownTagId {
                id: raw,
                offset: id_offset,
            });
        };
        if id == TagId::End {
            return Ok(children);
        }

        let name_offset = reader.position();
        let name = read_string(reader)?;
        if children.contains_key(&name) {
            return Err(DecodeError::DuplicateKey {
                key: name,
                offset: name_offset,
            });
        }

        let value = decode_value(reader, id, depth)?;
        children.insert(name, value);
    }
}

fn decode_value(reader: &mut ByteReader<'_>, id: TagId, depth: usize) -> DecodeResult<Tag> {
    match id {
        // Both callers intercept End before asking for a value.
        TagId::End => Err(DecodeError::UnexpectedEndTag {
            offset: reader.position(),
        }),
        TagId::Byte => Ok(Tag::Byte(reader.read_i8()?)),
        TagId::Short => Ok(Tag::Short(reader.read_i16()?)),
        TagId::Int => Ok(Tag::Int(reader.read_i32()?)),
        TagId::Long => Ok(Tag::Long(reader.read_i64()?)),
        TagId::Float => Ok(Tag::Float(reader.read_f32()?)),
        TagId::Double => Ok(Tag::Double(reader.read_f64()?)),
        TagId::ByteArray => Ok(Tag::ByteArray(read_byte_array(reader)?)),
        TagId::String => Ok(Tag::String(read_string(reader)?)),
        TagId::List => Ok(Tag::List(decode_list(reader, depth + 1)?)),
        TagId::Compound => Ok(Tag::Compound(decode_compound_body(reader, depth + 1)?)),
        TagId::IntArray => Ok(Tag::IntArray(read_int_array(reader)?)),
        TagId::LongArray => Ok(Tag::LongArray(read_long_array(reader)?)),
    }
}

fn decode_list(reader: &mut ByteReader<'_>, depth: usize) -> DecodeResult<List> {
    if depth > MAX_DEPTH {
        return Err(DecodeError::DepthLimitExceeded { limit: MAX_DEPTH });
    }

    let elem_offset = reader.position();
    let raw = reader.read_u8()?;
    let Some(elem) = TagId::from_raw(raw) else {
        return Err(DecodeError::UnknownTagId {
            id: raw,
            offset: elem_offset,
        });
    };

    let count = read_count(reader)?;
    check_remaining(reader, count, min_payload_len(elem))?;

    match elem {
        TagId::End => {
            if count > 0 {
                Err(DecodeError::InvalidEndList {
                    count,
                    offset: elem_offset,
                })
            } else {
                Ok(List::End)
            }
        }
        TagId::Byte => Ok(List::Byte(read_elements(reader, count, ByteReader::read_i8)?)),
        TagId::Short => Ok(List::Short(read_elements(reader, count, ByteReader::read_i16)?)),
        TagId::Int => Ok(List::Int(read_elements(reader, count, ByteReader::read_i32)?)),
        TagId::Long => Ok(List::Long(read_elements(reader, count, ByteReader::read_i64)?)),
        TagId::Float => Ok(List::Float(read_elements(reader, count, ByteReader::read_f32)?)),
        TagId::Double => Ok(List::Double(read_elements(
            reader,
            count,
            ByteReader::read_f64,
        )?)),
        TagId::ByteArray => Ok(List::ByteArray(read_elements(reader, count, read_byte_array)?)),
        TagId::String => Ok(List::String(read_elements(reader, count, read_string)?)),
        TagId::List => Ok(List::List(read_elements(reader, count, |r| {
            decode_list(r, depth + 1)
        })?)),
        TagId::Compound => Ok(List::Compound(read_elements(reader, count, |r| {
            decode_compound_body(r, depth + 1)
        })?)),
        TagId::IntArray => Ok(List::IntArray(read_elements(reader, count, read_int_array)?)),
        TagId::LongArray => Ok(List::LongArray(read_elements(
            reader,
            count,
            read_long_array,
        )?)),
    }
}

fn read_byte_array(reader: &mut ByteReader<'_>) -> DecodeResult<Vec<i8>> {
    let count = read_count(reader)?;
    check_remaining(reader, count, 1)?;
    let bytes = reader.read_bytes(count)?;
    Ok(bytes.iter().map(|&byte| byte as i8).collect())
}

fn read_int_array(reader: &mut ByteReader<'_>) -> DecodeResult<Vec<i32>> {
    let count = read_count(reader)?;
    check_remaining(reader, count, 4)?;
    read_elements(reader, count, ByteReader::read_i32)
}

fn read_long_array(reader: &mut ByteReader<'_>) -> DecodeResult<Vec<i64>> {
    let count = read_count(reader)?;
    check_remaining(reader, count, 8)?;
    read_elements(reader, count, ByteReader::read_i64)
}

fn read_elements<'a, T>(
    reader: &mut ByteReader<'a>,
    count: usize,
    mut read_one: impl FnMut(&mut ByteReader<'a>) -> DecodeResult<T>,
) -> DecodeResult<Vec<T>> {
    let mut values = Vec::with_capacity(count);
    for _ in 0..count {
        values.push(read_one(reader)?);
    }
    Ok(values)
}

fn read_count(reader: &mut ByteReader<'_>) -> DecodeResult<usize> {
    let offset = reader.position();
    let raw = reader.read_i32()?;
    usize::try_from(raw).map_err(|_| DecodeError::NegativeLength { len: raw, offset })
}

/// Rejects declared counts that cannot possibly fit in the remaining
/// input, so a hostile count never drives a huge allocation.
fn check_remaining(reader: &ByteReader<'_>, count: usize, min_elem_len: usize) -> DecodeResult<()> {
    let needed = count.saturating_mul(min_elem_len);
    let available = reader.remaining();
    if needed > available {
        return Err(DecodeError::UnexpectedEof {
            offset: reader.position(),
            needed,
            available,
        });
    }
    Ok(())
}

/// Smallest possible encoded payload of a value with id `id`, used to
/// sanity-check declared element counts before allocating.
const fn min_payload_len(id: TagId) -> usize {
    match id {
        TagId::End => 0,
        TagId::Byte | TagId::Compound => 1,
        TagId::Short | TagId::String => 2,
        TagId::Int | TagId::Float | TagId::ByteArray | TagId::IntArray | TagId::LongArray => 4,
        TagId::Long | TagId::Double => 8,
        TagId::List => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `{"foo": Byte(42)}` with an anonymous root.
    const SMALL_DOC: [u8; 11] = [
        0x0A, 0x00, 0x00, // compound root, empty name
        0x01, 0x03, 0x00, b'f', b'o', b'o', 0x2A, // Byte "foo" = 42
        0x00, // end of root
    ];

    #[test]
    fn decodes_a_small_document() {
        let (document, consumed) = decode_document(&SMALL_DOC).unwrap();
        assert_eq!(consumed, SMALL_DOC.len());
        assert_eq!(document.name, "");
        assert_eq!(document.root.len(), 1);
        assert_eq!(document.root.get("foo"), Some(&Tag::Byte(42)));
    }

    #[test]
    fn decodes_a_named_root() {
        let bytes = [
            0x0A, 0x04, 0x00, b'r', b'o', b'o', b't', // compound root "root"
            0x00, // end of root
        ];
        let (document, consumed) = decode_document(&bytes).unwrap();
        assert_eq!(consumed, bytes.len());
        assert_eq!(document.name, "root");
        assert!(document.root.is_empty());
    }

    #[test]
    fn reports_consumed_bytes_and_ignores_trailing_data() {
        let mut bytes = SMALL_DOC.to_vec();
        bytes.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);

        let (document, consumed) = decode_document(&bytes).unwrap();
        assert_eq!(consumed, SMALL_DOC.len());
        assert_eq!(document.root.get("foo"), Some(&Tag::Byte(42)));
    }

    #[test]
    fn decodes_every_scalar_kind() {
        let bytes = [
            0x0A, 0x00, 0x00, // root
            0x02, 0x01, 0x00, b's', 0xFE, 0xFF, // Short "s" = -2
            0x03, 0x01, 0x00, b'i', 0x34, 0x00, 0x00, 0x00, // Int "i" = 52
            0x04, 0x01, 0x00, b'l', 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, // Long "l" = 1
            0x05, 0x01, 0x00, b'f', 0x00, 0x00, 0xC0, 0x3F, // Float "f" = 1.5
            0x06, 0x01, 0x00, b'd', 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x04,
            0x40, // Double "d" = 2.5
            0x08, 0x01, 0x00, b't', 0x02, 0x00, b'h', b'i', // String "t" = "hi"
            0x00, // end of root
        ];
        let (document, consumed) = decode_document(&bytes).unwrap();
        assert_eq!(consumed, bytes.len());
        assert_eq!(document.root.get("s"), Some(&Tag::Short(-2)));
        assert_eq!(document.root.get("i"), Some(&Tag::Int(52)));
        assert_eq!(document.root.get("l"), Some(&Tag::Long(1)));
        assert_eq!(document.root.get("f"), Some(&Tag::Float(1.5)));
        assert_eq!(document.root.get("d"), Some(&Tag::Double(2.5)));
        assert_eq!(document.root.get("t"), Some(&Tag::String("hi".to_owned())));
    }

    #[test]
    fn decodes_arrays() {
        let bytes = [
            0x0A, 0x00, 0x00, // root
            0x07, 0x01, 0x00, b'b', 0x03, 0x00, 0x00, 0x00, 0x01, 0xFF,
            0x02, // ByteArray "b" = [1, -1, 2]
            0x0B, 0x01, 0x00, b'i', 0x01, 0x00, 0x00, 0x00, 0x0A, 0x00, 0x00,
            0x00, // IntArray "i" = [10]
            0x0C, 0x01, 0x00, b'l', 0x01, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
            0xFF, 0xFF, // LongArray "l" = [-1]
            0x00, // end of root
        ];
        let (document, _) = decode_document(&bytes).unwrap();
        assert_eq!(
            document.root.get("b"),
            Some(&Tag::ByteArray(vec![1, -1, 2]))
        );
        assert_eq!(document.root.get("i"), Some(&Tag::IntArray(vec![10])));
        assert_eq!(document.root.get("l"), Some(&Tag::LongArray(vec![-1])));
    }

    #[test]
    fn decodes_typed_lists() {
        let bytes = [
            0x0A, 0x00, 0x00, // root
            0x09, 0x01, 0x00, b'n', 0x02, 0x02, 0x00, 0x00, 0x00, 0x0A, 0x00, 0x14,
            0x00, // List "n" of Short = [10, 20]
            0x09, 0x01, 0x00, b's', 0x08, 0x01, 0x00, 0x00, 0x00, 0x02, 0x00, b'h',
            b'i', // List "s" of String = ["hi"]
            0x09, 0x01, 0x00, b'x', 0x06, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0xE0, 0x3F, // List "x" of Double = [0.5]
            0x09, 0x01, 0x00, b'e', 0x00, 0x00, 0x00, 0x00, 0x00, // empty End-typed list "e"
            0x09, 0x01, 0x00, b'z', 0x03, 0x00, 0x00, 0x00,
            0x00, // empty Int-typed list "z"
            0x00, // end of root
        ];
        let (document, consumed) = decode_document(&bytes).unwrap();
        assert_eq!(consumed, bytes.len());
        assert_eq!(
            document.root.get("n"),
            Some(&Tag::List(List::Short(vec![10, 20])))
        );
        assert_eq!(
            document.root.get("s"),
            Some(&Tag::List(List::String(vec!["hi".to_owned()])))
        );
        assert_eq!(
            document.root.get("x"),
            Some(&Tag::List(List::Double(vec![0.5])))
        );
        assert_eq!(document.root.get("e"), Some(&Tag::List(List::End)));
        // The empty list keeps its declared element type.
        assert_eq!(document.root.get("z"), Some(&Tag::List(List::Int(vec![]))));
    }

    #[test]
    fn decodes_nested_compounds() {
        let bytes = [
            0x0A, 0x00, 0x00, // root
            0x0A, 0x05, 0x00, b'i', b'n', b'n', b'e', b'r', // Compound "inner"
            0x01, 0x01, 0x00, b'x', 0x07, // Byte "x" = 7
            0x00, // end of "inner"
            0x00, // end of root
        ];
        let (document, _) = decode_document(&bytes).unwrap();
        let Some(Tag::Compound(inner)) = document.root.get("inner") else {
            panic!("expected a compound");
        };
        assert_eq!(inner.get("x"), Some(&Tag::Byte(7)));
    }

    // Error cases

    #[test]
    fn empty_input_fails() {
        let err = decode_document(&[]).unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnexpectedEof {
                offset: 0,
                needed: 1,
                available: 0,
            }
        );
    }

    #[test]
    fn non_compound_root_fails() {
        let err = decode_document(&[0x08, 0x00, 0x00]).unwrap_err();
        assert_eq!(err, DecodeError::RootNotCompound { id: 0x08, offset: 0 });
    }

    #[test]
    fn unknown_root_id_fails() {
        let err = decode_document(&[0x42]).unwrap_err();
        assert_eq!(err, DecodeError::UnknownTagId { id: 0x42, offset: 0 });
    }

    #[test]
    fn unknown_child_id_reports_its_offset() {
        let bytes = [0x0A, 0x00, 0x00, 0x0D, 0x00, 0x00, 0x00];
        let err = decode_document(&bytes).unwrap_err();
        assert_eq!(err, DecodeError::UnknownTagId { id: 0x0D, offset: 3 });
    }

    #[test]
    fn truncated_value_reports_its_offset() {
        // Int "i" with only two payload bytes present.
        let bytes = [0x0A, 0x00, 0x00, 0x03, 0x01, 0x00, b'i', 0x34, 0x00];
        let err = decode_document(&bytes).unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnexpectedEof {
                offset: 7,
                needed: 4,
                available: 2,
            }
        );
    }

    #[test]
    fn missing_end_tag_fails() {
        let bytes = [0x0A, 0x00, 0x00, 0x01, 0x01, 0x00, b'x', 0x07];
        let err = decode_document(&bytes).unwrap_err();
        assert!(
            matches!(err, DecodeError::UnexpectedEof { offset: 8, .. }),
            "got: {err:?}"
        );
    }

    #[test]
    fn negative_list_count_fails() {
        let bytes = [
            0x0A, 0x00, 0x00, // root
            0x09, 0x01, 0x00, b'l', 0x01, 0xFF, 0xFF, 0xFF, 0xFF, // count -1
        ];
        let err = decode_document(&bytes).unwrap_err();
        assert_eq!(err, DecodeError::NegativeLength { len: -1, offset: 8 });
    }

    #[test]
    fn negative_array_count_fails() {
        let bytes = [
            0x0A, 0x00, 0x00, // root
            0x07, 0x01, 0x00, b'b', 0xFE, 0xFF, 0xFF, 0xFF, // count -2
        ];
        let err = decode_document(&bytes).unwrap_err();
        assert_eq!(err, DecodeError::NegativeLength { len: -2, offset: 7 });
    }

    #[test]
    fn oversized_count_fails_before_allocating() {
        // IntArray declaring ~500M elements in a 16-byte input.
        let bytes = [
            0x0A, 0x00, 0x00, // root
            0x0B, 0x01, 0x00, b'i', 0x00, 0x00, 0x00, 0x20, // count 0x20000000
            0x00, 0x00, 0x00, 0x00, 0x00,
        ];
        let err = decode_document(&bytes).unwrap_err();
        assert!(
            matches!(err, DecodeError::UnexpectedEof { offset: 11, .. }),
            "got: {err:?}"
        );
    }

    #[test]
    fn invalid_utf8_string_fails() {
        let bytes = [
            0x0A, 0x00, 0x00, // root
            0x08, 0x01, 0x00, b's', 0x02, 0x00, 0xFF, 0xFE, // invalid UTF-8 payload
            0x00,
        ];
        let err = decode_document(&bytes).unwrap_err();
        assert_eq!(err, DecodeError::InvalidString { offset: 7 });
    }

    #[test]
    fn invalid_utf8_name_fails() {
        let bytes = [
            0x0A, 0x00, 0x00, // root
            0x01, 0x01, 0x00, 0x80, 0x07, // name is a lone continuation byte
            0x00,
        ];
        let err = decode_document(&bytes).unwrap_err();
        assert_eq!(err, DecodeError::InvalidString { offset: 4 });
    }

    #[test]
    fn duplicate_keys_fail() {
        let bytes = [
            0x0A, 0x00, 0x00, // root
            0x01, 0x01, 0x00, b'k', 0x01, // Byte "k" = 1
            0x01, 0x01, 0x00, b'k', 0x02, // Byte "k" = 2
            0x00,
        ];
        let err = decode_document(&bytes).unwrap_err();
        assert_eq!(
            err,
            DecodeError::DuplicateKey {
                key: "k".to_owned(),
                offset: 9,
            }
        );
    }

    #[test]
    fn end_typed_list_with_elements_fails() {
        let bytes = [
            0x0A, 0x00, 0x00, // root
            0x09, 0x01, 0x00, b'e', 0x00, 0x03, 0x00, 0x00, 0x00, // End list, count 3
        ];
        let err = decode_document(&bytes).unwrap_err();
        assert_eq!(err, DecodeError::InvalidEndList { count: 3, offset: 7 });
    }

    #[test]
    fn unknown_list_element_id_fails() {
        let bytes = [
            0x0A, 0x00, 0x00, // root
            0x09, 0x01, 0x00, b'l', 0x7F, 0x00, 0x00, 0x00, 0x00, // element id 0x7F
        ];
        let err = decode_document(&bytes).unwrap_err();
        assert_eq!(err, DecodeError::UnknownTagId { id: 0x7F, offset: 7 });
    }

    #[test]
    fn deep_list_nesting_is_capped() {
        // Each level is a one-element list of lists; 600 levels exceeds the cap.
        let mut bytes = vec![0x0A, 0x00, 0x00, 0x09, 0x01, 0x00, b'd'];
        for _ in 0..600 {
            bytes.extend_from_slice(&[0x09, 0x01, 0x00, 0x00, 0x00]);
        }
        let err = decode_document(&bytes).unwrap_err();
        assert_eq!(err, DecodeError::DepthLimitExceeded { limit: MAX_DEPTH });
    }

    #[test]
    fn deep_compound_nesting_is_capped() {
        let mut bytes = vec![0x0A, 0x00, 0x00];
        for _ in 0..600 {
            bytes.extend_from_slice(&[0x0A, 0x01, 0x00, b'c']);
        }
        let err = decode_document(&bytes).unwrap_err();
        assert_eq!(err, DecodeError::DepthLimitExceeded { limit: MAX_DEPTH });
    }

    #[test]
    fn nesting_at_the_cap_decodes() {
        // MAX_DEPTH - 1 nested compounds put the innermost body exactly
        // at the cap.
        let mut bytes = vec![0x0A, 0x00, 0x00];
        for _ in 0..MAX_DEPTH - 1 {
            bytes.extend_from_slice(&[0x0A, 0x01, 0x00, b'c']);
        }
        for _ in 0..MAX_DEPTH {
            bytes.push(0x00);
        }
        let (document, consumed) = decode_document(&bytes).unwrap();
        assert_eq!(consumed, bytes.len());
        assert_eq!(document.root.len(), 1);
    }
}
