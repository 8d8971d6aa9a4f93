//! Rendering decoded tag trees for terminal output.
//!
//! Two renderings are offered: lossless-ish JSON for piping into other
//! tools, and an indented tree for reading by eye. JSON cannot carry
//! non-finite floats, so NaN and infinities come out as strings.

use nbt::{Compound, Document, List, Tag, TagId};
use serde_json::{Map, Number, Value};

/// Renders a document as a JSON object, one member per root entry.
///
/// Entry order follows the document. Numeric arrays become JSON arrays;
/// the distinction between, say, a byte array and an int array is lost.
#[must_use]
pub fn document_to_json(document: &Document) -> Value {
    compound_to_json(&document.root)
}

fn compound_to_json(compound: &Compound) -> Value {
    let mut members = Map::new();
    for (name, tag) in compound {
        members.insert(name.clone(), tag_to_json(tag));
    }
    Value::Object(members)
}

fn tag_to_json(tag: &Tag) -> Value {
    match tag {
        Tag::Byte(value) => Value::from(*value),
        Tag::Short(value) => Value::from(*value),
        Tag::Int(value) => Value::from(*value),
        Tag::Long(value) => Value::from(*value),
        Tag::Float(value) => float_to_json(f64::from(*value)),
        Tag::Double(value) => float_to_json(*value),
        Tag::ByteArray(values) => Value::from(values.clone()),
        Tag::String(value) => Value::String(value.clone()),
        Tag::List(list) => list_to_json(list),
        Tag::Compound(children) => compound_to_json(children),
        Tag::IntArray(values) => Value::from(values.clone()),
        Tag::LongArray(values) => Value::from(values.clone()),
    }
}

fn list_to_json(list: &List) -> Value {
    match list {
        List::End => Value::Array(Vec::new()),
        List::Byte(values) => Value::from(values.clone()),
        List::Short(values) => Value::from(values.clone()),
        List::Int(values) => Value::from(values.clone()),
        List::Long(values) => Value::from(values.clone()),
        List::Float(values) => values
            .iter()
            .map(|&value| float_to_json(f64::from(value)))
            .collect(),
        List::Double(values) => values.iter().map(|&value| float_to_json(value)).collect(),
        List::ByteArray(arrays) => arrays.iter().map(|array| Value::from(array.clone())).collect(),
        List::String(values) => values.iter().cloned().map(Value::String).collect(),
        List::List(lists) => lists.iter().map(list_to_json).collect(),
        List::Compound(compounds) => compounds.iter().map(compound_to_json).collect(),
        List::IntArray(arrays) => arrays.iter().map(|array| Value::from(array.clone())).collect(),
        List::LongArray(arrays) => arrays.iter().map(|array| Value::from(array.clone())).collect(),
    }
}

/// JSON numbers must be finite. Everything else falls back to the float's
/// display form, e.g. `"NaN"` or `"inf"`.
fn float_to_json(value: f64) -> Value {
    Number::from_f64(value).map_or_else(|| Value::String(value.to_string()), Value::Number)
}

/// Renders a document as an indented tree, two spaces per level.
///
/// Containers print a head line with their size; arrays are summarized
/// rather than expanded, since their contents rarely matter when eyeballing
/// a level.dat.
#[must_use]
pub fn render_document_pretty(document: &Document) -> String {
    let mut out = String::new();
    if document.name.is_empty() {
        out.push_str("compound:\n");
    } else {
        out.push_str(&format!("compound {:?}:\n", document.name));
    }
    render_compound(&mut out, 1, &document.root);
    out
}

fn render_compound(out: &mut String, indent: usize, compound: &Compound) {
    for (name, tag) in compound {
        push_line(out, indent, &format!("{name}: {}", tag_summary(tag)));
        match tag {
            Tag::Compound(children) => render_compound(out, indent + 1, children),
            Tag::List(list) => render_list(out, indent + 1, list),
            _ => {}
        }
    }
}

fn render_list(out: &mut String, indent: usize, list: &List) {
    match list {
        List::End => {}
        List::Byte(values) => render_scalars(out, indent, TagId::Byte, values),
        List::Short(values) => render_scalars(out, indent, TagId::Short, values),
        List::Int(values) => render_scalars(out, indent, TagId::Int, values),
        List::Long(values) => render_scalars(out, indent, TagId::Long, values),
        List::Float(values) => render_scalars(out, indent, TagId::Float, values),
        List::Double(values) => render_scalars(out, indent, TagId::Double, values),
        List::ByteArray(arrays) => render_arrays(out, indent, TagId::ByteArray, arrays),
        List::String(values) => {
            for (index, value) in values.iter().enumerate() {
                push_line(out, indent, &format!("[{index}]: string {value:?}"));
            }
        }
        List::List(lists) => {
            for (index, inner) in lists.iter().enumerate() {
                push_line(out, indent, &format!("[{index}]: {}", list_summary(inner)));
                render_list(out, indent + 1, inner);
            }
        }
        List::Compound(compounds) => {
            for (index, children) in compounds.iter().enumerate() {
                push_line(
                    out,
                    indent,
                    &format!("[{index}]: compound ({})", entries(children.len())),
                );
                render_compound(out, indent + 1, children);
            }
        }
        List::IntArray(arrays) => render_arrays(out, indent, TagId::IntArray, arrays),
        List::LongArray(arrays) => render_arrays(out, indent, TagId::LongArray, arrays),
    }
}

fn render_scalars<T: std::fmt::Display>(
    out: &mut String,
    indent: usize,
    kind: TagId,
    values: &[T],
) {
    for (index, value) in values.iter().enumerate() {
        push_line(out, indent, &format!("[{index}]: {kind} {value}"));
    }
}

fn render_arrays<T>(out: &mut String, indent: usize, kind: TagId, arrays: &[Vec<T>]) {
    for (index, array) in arrays.iter().enumerate() {
        push_line(
            out,
            indent,
            &format!("[{index}]: {kind} ({})", elements(array.len())),
        );
    }
}

fn tag_summary(tag: &Tag) -> String {
    match tag {
        Tag::Byte(value) => format!("byte {value}"),
        Tag::Short(value) => format!("short {value}"),
        Tag::Int(value) => format!("int {value}"),
        Tag::Long(value) => format!("long {value}"),
        Tag::Float(value) => format!("float {value}"),
        Tag::Double(value) => format!("double {value}"),
        Tag::ByteArray(values) => format!("byte array ({})", elements(values.len())),
        Tag::String(value) => format!("string {value:?}"),
        Tag::List(list) => list_summary(list),
        Tag::Compound(children) => format!("compound ({})", entries(children.len())),
        Tag::IntArray(values) => format!("int array ({})", elements(values.len())),
        Tag::LongArray(values) => format!("long array ({})", elements(values.len())),
    }
}

fn list_summary(list: &List) -> String {
    if matches!(list, List::End) {
        "empty list".to_owned()
    } else {
        format!(
            "list of {} ({})",
            list.element_id().name(),
            elements(list.len())
        )
    }
}

fn elements(count: usize) -> String {
    if count == 1 {
        "1 element".to_owned()
    } else {
        format!("{count} elements")
    }
}

fn entries(count: usize) -> String {
    if count == 1 {
        "1 entry".to_owned()
    } else {
        format!("{count} entries")
    }
}

fn push_line(out: &mut String, indent: usize, text: &str) {
    for _ in 0..indent {
        out.push_str("  ");
    }
    out.push_str(text);
    out.push('\n');
}
