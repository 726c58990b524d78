//! The recursive, depth-limited reader and writer for the uncompressed binary NBT tree, one
//! level below the gzip framing handled by [`crate::io`].

use std::io::{Read, Write};

use crate::error::CodecError;
use crate::kind::TagKind;
use crate::raw;
use crate::tag::{Compound, Tag, TagList};

/// Minecraft's own recursion limit; re-used here so a crafted or corrupt file can't blow the
/// call stack.
pub const DEPTH_LIMIT: u32 = 512;

/// Decodes a root Compound tag (name, body) from an uncompressed NBT byte stream.
pub fn decode_root(r: &mut impl Read) -> Result<(String, Compound), CodecError> {
    let kind = read_kind(r)?;
    if kind != TagKind::Compound {
        return Err(CodecError::RootNotCompound);
    }
    let name = raw::read_string(r)?;
    let compound = decode_compound_body(r, 0)?;
    Ok((name, compound))
}

/// Encodes a root Compound tag (name, body) into an uncompressed NBT byte stream.
pub fn encode_root(w: &mut impl Write, name: &str, compound: &Compound) -> Result<(), CodecError> {
    write_kind(w, TagKind::Compound)?;
    raw::write_string(w, name)?;
    encode_compound_body(w, compound, 0)
}

fn check_depth(depth: u32) -> Result<(), CodecError> {
    if depth > DEPTH_LIMIT {
        log::warn!("NBT tree exceeded the {DEPTH_LIMIT}-level depth limit");
        return Err(CodecError::ExceededDepthLimit { limit: DEPTH_LIMIT });
    }
    Ok(())
}

fn read_kind(r: &mut impl Read) -> Result<TagKind, CodecError> {
    let id = raw::read_u8(r)?;
    TagKind::try_from(id).map_err(CodecError::InvalidTagKind)
}

fn write_kind(w: &mut impl Write, kind: TagKind) -> Result<(), CodecError> {
    raw::write_u8(w, kind.into())
}

fn decode_tag_body(r: &mut impl Read, kind: TagKind, depth: u32) -> Result<Tag, CodecError> {
    check_depth(depth)?;
    Ok(match kind {
        TagKind::End => return Err(CodecError::InvalidTagKind(TagKind::End.into())),
        TagKind::Byte => Tag::Byte(raw::read_i8(r)?),
        TagKind::Short => Tag::Short(raw::read_i16(r)?),
        TagKind::Int => Tag::Int(raw::read_i32(r)?),
        TagKind::Long => Tag::Long(raw::read_i64(r)?),
        TagKind::Float => Tag::Float(raw::read_f32(r)?),
        TagKind::Double => Tag::Double(raw::read_f64(r)?),
        TagKind::ByteArray => Tag::ByteArray(raw::read_byte_array(r)?),
        TagKind::String => match raw::read_string_or_raw(r)? {
            Ok(value) => Tag::String(value),
            Err(bytes) => Tag::RawString(bytes),
        },
        TagKind::List => Tag::List(decode_list_body(r, depth)?),
        TagKind::Compound => Tag::Compound(decode_compound_body(r, depth)?),
        TagKind::IntArray => Tag::IntArray(raw::read_int_array(r)?),
        TagKind::LongArray => Tag::LongArray(raw::read_long_array(r)?),
    })
}

fn encode_tag_body(w: &mut impl Write, tag: &Tag, depth: u32) -> Result<(), CodecError> {
    check_depth(depth)?;
    match tag {
        Tag::Byte(value) => raw::write_i8(w, *value),
        Tag::Short(value) => raw::write_i16(w, *value),
        Tag::Int(value) => raw::write_i32(w, *value),
        Tag::Long(value) => raw::write_i64(w, *value),
        Tag::Float(value) => raw::write_f32(w, *value),
        Tag::Double(value) => raw::write_f64(w, *value),
        Tag::ByteArray(values) => raw::write_byte_array(w, values),
        Tag::String(value) => raw::write_string(w, value),
        Tag::RawString(bytes) => raw::write_raw_string(w, bytes),
        Tag::List(list) => encode_list_body(w, list, depth),
        Tag::Compound(compound) => encode_compound_body(w, compound, depth),
        Tag::IntArray(values) => raw::write_int_array(w, values),
        Tag::LongArray(values) => raw::write_long_array(w, values),
    }
}

fn decode_list_body(r: &mut impl Read, depth: u32) -> Result<TagList, CodecError> {
    let element_kind = read_kind(r)?;
    let len = raw::read_i32(r)?;
    if len < 0 {
        return Err(CodecError::NegativeLength(len));
    }
    if len > 0 && element_kind == TagKind::End {
        return Err(CodecError::InvalidTagKind(TagKind::End.into()));
    }
    let mut list = TagList::with_kind(element_kind);
    for _ in 0..len {
        let element = decode_tag_body(r, element_kind, depth + 1)?;
        list.push_decoded(element);
    }
    Ok(list)
}

fn encode_list_body(w: &mut impl Write, list: &TagList, depth: u32) -> Result<(), CodecError> {
    write_kind(w, list.element_kind())?;
    raw::write_i32(w, list.len() as i32)?;
    for element in list.iter() {
        encode_tag_body(w, element, depth + 1)?;
    }
    Ok(())
}

fn decode_compound_body(r: &mut impl Read, depth: u32) -> Result<Compound, CodecError> {
    check_depth(depth)?;
    let mut compound = Compound::new();
    loop {
        let kind = read_kind(r)?;
        if kind == TagKind::End {
            break;
        }
        let name = raw::read_string(r)?;
        let value = decode_tag_body(r, kind, depth + 1)?;
        compound.insert(name, value);
    }
    Ok(compound)
}

fn encode_compound_body(w: &mut impl Write, compound: &Compound, depth: u32) -> Result<(), CodecError> {
    check_depth(depth)?;
    for (name, tag) in compound.iter() {
        write_kind(w, tag.kind())?;
        raw::write_string(w, name)?;
        encode_tag_body(w, tag, depth + 1)?;
    }
    write_kind(w, TagKind::End)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_a_small_tree() {
        let mut compound = Compound::new();
        compound.insert("health", Tag::Float(20.0));
        compound.insert("name", Tag::String("Steve".to_owned()));
        let mut list = TagList::new();
        list.push(Tag::Int(1)).unwrap();
        list.push(Tag::Int(2)).unwrap();
        compound.insert("values", Tag::List(list));

        let mut bytes = Vec::new();
        encode_root(&mut bytes, "", &compound).unwrap();
        let (name, decoded) = decode_root(&mut bytes.as_slice()).unwrap();
        assert_eq!(name, "");
        assert_eq!(decoded, compound);
    }

    #[test]
    fn rejects_non_compound_root() {
        let bytes = [TagKind::Int.into(), 0, 0, 0, 0, 1];
        assert!(matches!(
            decode_root(&mut bytes.as_slice()),
            Err(CodecError::RootNotCompound)
        ));
    }

    #[test]
    fn rejects_unknown_tag_kind() {
        let bytes = [99u8, 0, 0];
        assert!(matches!(
            decode_root(&mut bytes.as_slice()),
            Err(CodecError::InvalidTagKind(99))
        ));
    }
}
