mod compound;
mod list;

pub use self::compound::Compound;
pub use self::list::TagList;

use crate::error::StructureError;
use crate::kind::TagKind;

/// A single NBT value. Every numeric variant is a distinct Rust type even where the underlying
/// integer widths overlap: the kind a tag was decoded as is exactly the kind it is written back
/// as, never re-derived from the magnitude of the value it holds.
#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    /// A string whose bytes were not valid modified UTF-8 when decoded. Carried opaquely rather
    /// than lossily re-encoded, so a corrupt or unusual player name round-trips byte-for-byte
    /// instead of being mangled or dropped.
    RawString(Vec<u8>),
    List(TagList),
    Compound(Compound),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

impl Tag {
    /// Returns which of the 13 wire discriminants this tag would be encoded as.
    pub fn kind(&self) -> TagKind {
        match self {
            Self::Byte(_) => TagKind::Byte,
            Self::Short(_) => TagKind::Short,
            Self::Int(_) => TagKind::Int,
            Self::Long(_) => TagKind::Long,
            Self::Float(_) => TagKind::Float,
            Self::Double(_) => TagKind::Double,
            Self::ByteArray(_) => TagKind::ByteArray,
            Self::String(_) | Self::RawString(_) => TagKind::String,
            Self::List(_) => TagKind::List,
            Self::Compound(_) => TagKind::Compound,
            Self::IntArray(_) => TagKind::IntArray,
            Self::LongArray(_) => TagKind::LongArray,
        }
    }
}

/// Returns which of the 13 wire discriminants a tag would be encoded as.
pub fn kind_of(tag: &Tag) -> TagKind {
    tag.kind()
}

macro_rules! prim_from_tag {
    ($variant:ident, $ty:ty) => {
        impl From<$ty> for Tag {
            fn from(value: $ty) -> Self {
                Self::$variant(value)
            }
        }

        impl TryFrom<&Tag> for $ty {
            type Error = StructureError;

            fn try_from(tag: &Tag) -> Result<Self, Self::Error> {
                match tag {
                    Tag::$variant(value) => Ok(*value),
                    other => Err(StructureError::wrong_kind(TagKind::$variant, other.kind())),
                }
            }
        }
    };
}

prim_from_tag!(Byte, i8);
prim_from_tag!(Short, i16);
prim_from_tag!(Int, i32);
prim_from_tag!(Long, i64);
prim_from_tag!(Float, f32);
prim_from_tag!(Double, f64);

impl From<bool> for Tag {
    /// NBT has no boolean kind; Minecraft's own convention is a `Byte` of 0 or 1. Decoding is
    /// inherently lossy in the other direction: an intentionally-stored boolean and an integer
    /// 0 or 1 are indistinguishable once written.
    fn from(value: bool) -> Self {
        Self::Byte(i8::from(value))
    }
}

macro_rules! ref_from_tag {
    ($variant:ident, $ty:ty) => {
        impl From<$ty> for Tag {
            fn from(value: $ty) -> Self {
                Self::$variant(value)
            }
        }

        impl TryFrom<&Tag> for $ty {
            type Error = StructureError;

            fn try_from(tag: &Tag) -> Result<Self, Self::Error> {
                match tag {
                    Tag::$variant(value) => Ok(value.clone()),
                    other => Err(StructureError::wrong_kind(TagKind::$variant, other.kind())),
                }
            }
        }
    };
}

ref_from_tag!(ByteArray, Vec<i8>);
ref_from_tag!(String, String);
ref_from_tag!(IntArray, Vec<i32>);
ref_from_tag!(LongArray, Vec<i64>);
ref_from_tag!(List, TagList);
ref_from_tag!(Compound, Compound);

impl<'a> TryFrom<&'a Tag> for &'a str {
    type Error = StructureError;

    fn try_from(tag: &'a Tag) -> Result<Self, Self::Error> {
        match tag {
            Tag::String(value) => Ok(value.as_str()),
            other => Err(StructureError::wrong_kind(TagKind::String, other.kind())),
        }
    }
}

impl<'a> TryFrom<&'a Tag> for &'a TagList {
    type Error = StructureError;

    fn try_from(tag: &'a Tag) -> Result<Self, Self::Error> {
        match tag {
            Tag::List(value) => Ok(value),
            other => Err(StructureError::wrong_kind(TagKind::List, other.kind())),
        }
    }
}

impl<'a> TryFrom<&'a Tag> for &'a Compound {
    type Error = StructureError;

    fn try_from(tag: &'a Tag) -> Result<Self, Self::Error> {
        match tag {
            Tag::Compound(value) => Ok(value),
            other => Err(StructureError::wrong_kind(TagKind::Compound, other.kind())),
        }
    }
}

impl<'a> TryFrom<&'a mut Tag> for &'a mut Compound {
    type Error = StructureError;

    fn try_from(tag: &'a mut Tag) -> Result<Self, Self::Error> {
        let found = tag.kind();
        match tag {
            Tag::Compound(value) => Ok(value),
            _ => Err(StructureError::wrong_kind(TagKind::Compound, found)),
        }
    }
}

impl<'a> TryFrom<&'a mut Tag> for &'a mut TagList {
    type Error = StructureError;

    fn try_from(tag: &'a mut Tag) -> Result<Self, Self::Error> {
        let found = tag.kind();
        match tag {
            Tag::List(value) => Ok(value),
            _ => Err(StructureError::wrong_kind(TagKind::List, found)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_widths_are_distinct_types() {
        let short = Tag::Short(5);
        let int = Tag::Int(5);
        assert_ne!(short.kind(), int.kind());
        assert_eq!(i16::try_from(&short).unwrap(), 5);
        assert!(i32::try_from(&short).is_err());
    }

    #[test]
    fn bool_round_trips_through_byte() {
        let tag: Tag = true.into();
        assert_eq!(tag, Tag::Byte(1));
    }
}
