//! Encoding a tag tree back to Bedrock NBT bytes.

use crate::error::EncodeError;
use crate::tag::{Compound, Document, List, Tag, TagId};
use crate::writer::ByteWriter;

const MAX_STRING_LEN: usize = u16::MAX as usize;
const MAX_SEQ_LEN: usize = i32::MAX as usize;

/// Encodes a document to its wire form.
///
/// Compounds are walked in iteration order, so a document straight out of
/// [`decode_document`](crate::decode_document) re-encodes to the exact
/// bytes it was decoded from.
///
/// # Errors
///
/// Fails only when the tree itself is unrepresentable: a name or string
/// longer than 65535 bytes, or a sequence with more than `i32::MAX`
/// elements. Trees produced by the decoder always encode.
pub fn encode_document(document: &Document) -> Result<Vec<u8>, EncodeError> {
    let mut writer = ByteWriter::new();
    writer.write_u8(TagId::Compound.raw());
    write_string(&mut writer, &document.name)?;
    write_compound_body(&mut writer, &document.root)?;
    Ok(writer.finish())
}

/// Encodes a single value's payload, without its id byte or name.
///
/// This is the element form used inside lists. It is exposed so tooling
/// can report per-value encoded sizes.
pub fn encode_tag(tag: &Tag) -> Result<Vec<u8>, EncodeError> {
    let mut writer = ByteWriter::new();
    write_value(&mut writer, tag)?;
    Ok(writer.finish())
}

fn write_string(writer: &mut ByteWriter, text: &str) -> Result<(), EncodeError> {
    let len = text.len();
    if len > MAX_STRING_LEN {
        return Err(EncodeError::StringTooLong {
            len,
            max: MAX_STRING_LEN,
        });
    }
    writer.write_u16(len as u16);
    writer.write_bytes(text.as_bytes());
    Ok(())
}

fn write_count(writer: &mut ByteWriter, len: usize) -> Result<(), EncodeError> {
    if len > MAX_SEQ_LEN {
        return Err(EncodeError::SeqTooLong {
            len,
            max: MAX_SEQ_LEN,
        });
    }
    writer.write_i32(len as i32);
    Ok(())
}

fn write_compound_body(writer: &mut ByteWriter, compound: &Compound) -> Result<(), EncodeError> {
    for (name, tag) in compound {
        writer.write_u8(tag.id().raw());
        write_string(writer, name)?;
        write_value(writer, tag)?;
    }
    writer.write_u8(TagId::End.raw());
    Ok(())
}

fn write_value(writer: &mut ByteWriter, tag: &Tag) -> Result<(), EncodeError> {
    match tag {
        Tag::Byte(value) => {
            writer.write_i8(*value);
            Ok(())
        }
        Tag::Short(value) => {
            writer.write_i16(*value);
            Ok(())
        }
        Tag::Int(value) => {
            writer.write_i32(*value);
            Ok(())
        }
        Tag::Long(value) => {
            writer.write_i64(*value);
            Ok(())
        }
        Tag::Float(value) => {
            writer.write_f32(*value);
            Ok(())
        }
        Tag::Double(value) => {
            writer.write_f64(*value);
            Ok(())
        }
        Tag::ByteArray(values) => write_byte_array(writer, values),
        Tag::String(text) => write_string(writer, text),
        Tag::List(list) => write_list(writer, list),
        Tag::Compound(compound) => write_compound_body(writer, compound),
        Tag::IntArray(values) => write_int_array(writer, values),
        Tag::LongArray(values) => write_long_array(writer, values),
    }
}

fn write_list(writer: &mut ByteWriter, list: &List) -> Result<(), EncodeError> {
    writer.write_u8(list.element_id().raw());
    write_count(writer, list.len())?;
    match list {
        List::End => Ok(()),
        List::Byte(values) => {
            for value in values {
                writer.write_i8(*value);
            }
            Ok(())
        }
        List::Short(values) => {
            for value in values {
                writer.write_i16(*value);
            }
            Ok(())
        }
        List::Int(values) => {
            for value in values {
                writer.write_i32(*value);
            }
            Ok(())
        }
        List::Long(values) => {
            for value in values {
                writer.write_i64(*value);
            }
            Ok(())
        }
        List::Float(values) => {
            for value in values {
                writer.write_f32(*value);
            }
            Ok(())
        }
        List::Double(values) => {
            for value in values {
                writer.write_f64(*value);
            }
            Ok(())
        }
        List::ByteArray(values) => {
            for value in values {
                write_byte_array(writer, value)?;
            }
            Ok(())
        }
        List::String(values) => {
            for value in values {
                write_string(writer, value)?;
            }
            Ok(())
        }
        List::List(values) => {
            for value in values {
                write_list(writer, value)?;
            }
            Ok(())
        }
        List::Compound(values) => {
            for value in values {
                write_compound_body(writer, value)?;
            }
            Ok(())
        }
        List::IntArray(values) => {
            for value in values {
                write_int_array(writer, value)?;
            }
            Ok(())
        }
        List::LongArray(values) => {
            for value in values {
                write_long_array(writer, value)?;
            }
            Ok(())
        }
    }
}

fn write_byte_array(writer: &mut ByteWriter, values: &[i8]) -> Result<(), EncodeError> {
    write_count(writer, values.len())?;
    for value in values {
        writer.write_i8(*value);
    }
    Ok(())
}

fn write_int_array(writer: &mut ByteWriter, values: &[i32]) -> Result<(), EncodeError> {
    write_count(writer, values.len())?;
    for value in values {
        writer.write_i32(*value);
    }
    Ok(())
}

fn write_long_array(writer: &mut ByteWriter, values: &[i64]) -> Result<(), EncodeError> {
    write_count(writer, values.len())?;
    for value in values {
        writer.write_i64(*value);
    }
    Ok(())
}
