//! The NBT tag model: wire ids, values, lists, and documents.

use std::fmt;

use indexmap::IndexMap;

/// Wire type ids, one per tag kind, as stored on disk by Bedrock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TagId {
    /// Terminates a compound body; also the declared element type of
    /// some empty lists. Never a value on its own.
    End = 0x00,
    /// Signed 8-bit integer.
    Byte = 0x01,
    /// Signed 16-bit little-endian integer.
    Short = 0x02,
    /// Signed 32-bit little-endian integer.
    Int = 0x03,
    /// Signed 64-bit little-endian integer.
    Long = 0x04,
    /// 32-bit little-endian IEEE 754 float.
    Float = 0x05,
    /// 64-bit little-endian IEEE 754 float.
    Double = 0x06,
    /// Length-prefixed array of signed bytes.
    ByteArray = 0x07,
    /// Length-prefixed UTF-8 string.
    String = 0x08,
    /// Homogeneous list with a declared element type.
    List = 0x09,
    /// Named children terminated by `End`.
    Compound = 0x0A,
    /// Length-prefixed array of 32-bit integers.
    IntArray = 0x0B,
    /// Length-prefixed array of 64-bit integers.
    LongArray = 0x0C,
}

impl TagId {
    /// All ids in ascending wire order.
    pub const ALL: [Self; 13] = [
        Self::End,
        Self::Byte,
        Self::Short,
        Self::Int,
        Self::Long,
        Self::Float,
        Self::Double,
        Self::ByteArray,
        Self::String,
        Self::List,
        Self::Compound,
        Self::IntArray,
        Self::LongArray,
    ];

    /// Converts a raw wire byte into a tag id.
    ///
    /// Returns `None` for bytes outside `0x00..=0x0C`.
    #[must_use]
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0x00 => Some(Self::End),
            0x01 => Some(Self::Byte),
            0x02 => Some(Self::Short),
            0x03 => Some(Self::Int),
            0x04 => Some(Self::Long),
            0x05 => Some(Self::Float),
            0x06 => Some(Self::Double),
            0x07 => Some(Self::ByteArray),
            0x08 => Some(Self::String),
            0x09 => Some(Self::List),
            0x0A => Some(Self::Compound),
            0x0B => Some(Self::IntArray),
            0x0C => Some(Self::LongArray),
            _ => None,
        }
    }

    /// Returns the raw wire byte for this id.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self as u8
    }

    /// Short lowercase name used in diagnostics and dumps.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::End => "end",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::ByteArray => "byte array",
            Self::String => "string",
            Self::List => "list",
            Self::Compound => "compound",
            Self::IntArray => "int array",
            Self::LongArray => "long array",
        }
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An order-preserving map from names to values, the payload of a
/// compound tag.
///
/// Iteration order is the order entries were decoded or inserted, and the
/// encoder walks that order. This is what lets an untouched document
/// re-encode to the exact bytes it was decoded from.
pub type Compound = IndexMap<String, Tag>;

/// A single NBT value.
///
/// There is no `End` variant: `End` appears on the wire only as a compound
/// terminator or as the element type of an empty [`List`].
#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    /// Signed 8-bit integer.
    Byte(i8),
    /// Signed 16-bit integer.
    Short(i16),
    /// Signed 32-bit integer.
    Int(i32),
    /// Signed 64-bit integer.
    Long(i64),
    /// 32-bit float.
    Float(f32),
    /// 64-bit float.
    Double(f64),
    /// Array of signed bytes.
    ByteArray(Vec<i8>),
    /// UTF-8 string.
    String(String),
    /// Homogeneous list.
    List(List),
    /// Named children.
    Compound(Compound),
    /// Array of 32-bit integers.
    IntArray(Vec<i32>),
    /// Array of 64-bit integers.
    LongArray(Vec<i64>),
}

impl Tag {
    /// Returns the wire id of this value's type.
    #[must_use]
    pub const fn id(&self) -> TagId {
        match self {
            Self::Byte(_) => TagId::Byte,
            Self::Short(_) => TagId::Short,
            Self::Int(_) => TagId::Int,
            Self::Long(_) => TagId::Long,
            Self::Float(_) => TagId::Float,
            Self::Double(_) => TagId::Double,
            Self::ByteArray(_) => TagId::ByteArray,
            Self::String(_) => TagId::String,
            Self::List(_) => TagId::List,
            Self::Compound(_) => TagId::Compound,
            Self::IntArray(_) => TagId::IntArray,
            Self::LongArray(_) => TagId::LongArray,
        }
    }
}

/// A homogeneous NBT list.
///
/// The element type is part of the value rather than a per-element
/// property, so an empty list remembers the element id it declared on the
/// wire and re-encodes with it unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum List {
    /// The empty list with declared element type `End`.
    End,
    /// Byte elements.
    Byte(Vec<i8>),
    /// Short elements.
    Short(Vec<i16>),
    /// Int elements.
    Int(Vec<i32>),
    /// Long elements.
    Long(Vec<i64>),
    /// Float elements.
    Float(Vec<f32>),
    /// Double elements.
    Double(Vec<f64>),
    /// Byte array elements.
    ByteArray(Vec<Vec<i8>>),
    /// String elements.
    String(Vec<String>),
    /// Nested list elements.
    List(Vec<List>),
    /// Compound elements.
    Compound(Vec<Compound>),
    /// Int array elements.
    IntArray(Vec<Vec<i32>>),
    /// Long array elements.
    LongArray(Vec<Vec<i64>>),
}

impl List {
    /// Returns the declared element type id.
    #[must_use]
    pub const fn element_id(&self) -> TagId {
        match self {
            Self::End => TagId::End,
            Self::Byte(_) => TagId::Byte,
            Self::Short(_) => TagId::Short,
            Self::Int(_) => TagId::Int,
            Self::Long(_) => TagId::Long,
            Self::Float(_) => TagId::Float,
            Self::Double(_) => TagId::Double,
            Self::ByteArray(_) => TagId::ByteArray,
            Self::String(_) => TagId::String,
            Self::List(_) => TagId::List,
            Self::Compound(_) => TagId::Compound,
            Self::IntArray(_) => TagId::IntArray,
            Self::LongArray(_) => TagId::LongArray,
        }
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::End => 0,
            Self::Byte(values) => values.len(),
            Self::Short(values) => values.len(),
            Self::Int(values) => values.len(),
            Self::Long(values) => values.len(),
            Self::Float(values) => values.len(),
            Self::Double(values) => values.len(),
            Self::ByteArray(values) => values.len(),
            Self::String(values) => values.len(),
            Self::List(values) => values.len(),
            Self::Compound(values) => values.len(),
            Self::IntArray(values) => values.len(),
            Self::LongArray(values) => values.len(),
        }
    }

    /// Returns `true` if the list has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A decoded document: a named root compound.
///
/// `level.dat` roots are almost always anonymous, so `name` is usually
/// empty, but the field round-trips whatever the file declared.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    /// The root compound's name.
    pub name: String,
    /// The root compound's children.
    pub root: Compound,
}
