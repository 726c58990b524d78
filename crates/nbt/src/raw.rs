//! Big-endian primitive reads and writes, plus the modified-UTF-8 (CESU-8-ish) string encoding
//! Java NBT uses for every `String` tag and every Compound key.
//!
//! Unlike the teacher crate this is adapted from, everything here is safe: array tags are
//! converted element-by-element rather than reinterpreted in place, since Java NBT is always
//! big-endian and there's no hot Bedrock/NetworkLittleEndian path to justify the unsafe casts.

use std::io::{Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::error::CodecError;

pub(crate) fn read_u8(r: &mut impl Read) -> Result<u8, CodecError> {
    r.read_u8().map_err(CodecError::from_read_error)
}

pub(crate) fn read_i8(r: &mut impl Read) -> Result<i8, CodecError> {
    r.read_i8().map_err(CodecError::from_read_error)
}

pub(crate) fn read_i16(r: &mut impl Read) -> Result<i16, CodecError> {
    r.read_i16::<BigEndian>().map_err(CodecError::from_read_error)
}

pub(crate) fn read_i32(r: &mut impl Read) -> Result<i32, CodecError> {
    r.read_i32::<BigEndian>().map_err(CodecError::from_read_error)
}

pub(crate) fn read_i64(r: &mut impl Read) -> Result<i64, CodecError> {
    r.read_i64::<BigEndian>().map_err(CodecError::from_read_error)
}

pub(crate) fn read_f32(r: &mut impl Read) -> Result<f32, CodecError> {
    r.read_f32::<BigEndian>().map_err(CodecError::from_read_error)
}

pub(crate) fn read_f64(r: &mut impl Read) -> Result<f64, CodecError> {
    r.read_f64::<BigEndian>().map_err(CodecError::from_read_error)
}

pub(crate) fn write_u8(w: &mut impl Write, value: u8) -> Result<(), CodecError> {
    w.write_u8(value).map_err(CodecError::from)
}

pub(crate) fn write_i8(w: &mut impl Write, value: i8) -> Result<(), CodecError> {
    w.write_i8(value).map_err(CodecError::from)
}

pub(crate) fn write_i16(w: &mut impl Write, value: i16) -> Result<(), CodecError> {
    w.write_i16::<BigEndian>(value).map_err(CodecError::from)
}

pub(crate) fn write_i32(w: &mut impl Write, value: i32) -> Result<(), CodecError> {
    w.write_i32::<BigEndian>(value).map_err(CodecError::from)
}

pub(crate) fn write_i64(w: &mut impl Write, value: i64) -> Result<(), CodecError> {
    w.write_i64::<BigEndian>(value).map_err(CodecError::from)
}

pub(crate) fn write_f32(w: &mut impl Write, value: f32) -> Result<(), CodecError> {
    w.write_f32::<BigEndian>(value).map_err(CodecError::from)
}

pub(crate) fn write_f64(w: &mut impl Write, value: f64) -> Result<(), CodecError> {
    w.write_f64::<BigEndian>(value).map_err(CodecError::from)
}

/// Reads a length-prefixed array of `i8`s (a `ByteArray` tag body).
pub(crate) fn read_byte_array(r: &mut impl Read) -> Result<Vec<i8>, CodecError> {
    let len = read_array_len(r)?;
    let mut buf = vec![0u8; len];
    r.read_exact(&mut buf).map_err(CodecError::from_read_error)?;
    Ok(buf.into_iter().map(|b| b as i8).collect())
}

pub(crate) fn write_byte_array(w: &mut impl Write, values: &[i8]) -> Result<(), CodecError> {
    write_i32(w, values.len() as i32)?;
    let buf: Vec<u8> = values.iter().map(|&b| b as u8).collect();
    w.write_all(&buf).map_err(CodecError::from)
}

/// Reads a length-prefixed array of `i32`s (an `IntArray` tag body).
pub(crate) fn read_int_array(r: &mut impl Read) -> Result<Vec<i32>, CodecError> {
    let len = read_array_len(r)?;
    (0..len).map(|_| read_i32(r)).collect()
}

pub(crate) fn write_int_array(w: &mut impl Write, values: &[i32]) -> Result<(), CodecError> {
    write_i32(w, values.len() as i32)?;
    values.iter().try_for_each(|&v| write_i32(w, v))
}

/// Reads a length-prefixed array of `i64`s (a `LongArray` tag body).
pub(crate) fn read_long_array(r: &mut impl Read) -> Result<Vec<i64>, CodecError> {
    let len = read_array_len(r)?;
    (0..len).map(|_| read_i64(r)).collect()
}

pub(crate) fn write_long_array(w: &mut impl Write, values: &[i64]) -> Result<(), CodecError> {
    write_i32(w, values.len() as i32)?;
    values.iter().try_for_each(|&v| write_i64(w, v))
}

fn read_array_len(r: &mut impl Read) -> Result<usize, CodecError> {
    let len = read_i32(r)?;
    usize::try_from(len).map_err(|_| CodecError::NegativeLength(len))
}

/// Reads a `u16`-length-prefixed modified-UTF-8 string, used for a Compound key or the root
/// tag's name. Unlike [`read_string_or_raw`], this fails outright on invalid modified UTF-8
/// rather than preserving the raw bytes: both of these names are fixed, game-chosen ASCII
/// identifiers in practice, never user-supplied text, and a `Compound` has nowhere to put a
/// non-`String` key.
pub(crate) fn read_string(r: &mut impl Read) -> Result<String, CodecError> {
    let len = r.read_u16::<BigEndian>().map_err(CodecError::from_read_error)?;
    let mut buf = vec![0u8; len as usize];
    r.read_exact(&mut buf).map_err(CodecError::from_read_error)?;
    cesu8::from_java_cesu8(&buf)
        .map(|cow| cow.into_owned())
        .map_err(|_| CodecError::InvalidUtf8)
}

pub(crate) fn write_string(w: &mut impl Write, value: &str) -> Result<(), CodecError> {
    let encoded = cesu8::to_java_cesu8(value);
    let len = u16::try_from(encoded.len())
        .map_err(|_| CodecError::NegativeLength(encoded.len() as i32))?;
    w.write_u16::<BigEndian>(len).map_err(CodecError::from)?;
    w.write_all(&encoded).map_err(CodecError::from)
}

/// Reads a `String` tag's body, falling back to the raw bytes (rather than failing outright or
/// lossily substituting replacement characters) when they aren't valid modified UTF-8.
pub(crate) fn read_string_or_raw(r: &mut impl Read) -> Result<Result<String, Vec<u8>>, CodecError> {
    let len = r.read_u16::<BigEndian>().map_err(CodecError::from_read_error)?;
    let mut buf = vec![0u8; len as usize];
    r.read_exact(&mut buf).map_err(CodecError::from_read_error)?;
    match cesu8::from_java_cesu8(&buf) {
        Ok(cow) => Ok(Ok(cow.into_owned())),
        Err(_) => Ok(Err(buf)),
    }
}

/// Writes the body of a `RawString` tag: the exact bytes captured at decode time, with no
/// re-encoding.
pub(crate) fn write_raw_string(w: &mut impl Write, bytes: &[u8]) -> Result<(), CodecError> {
    let len =
        u16::try_from(bytes.len()).map_err(|_| CodecError::NegativeLength(bytes.len() as i32))?;
    w.write_u16::<BigEndian>(len).map_err(CodecError::from)?;
    w.write_all(bytes).map_err(CodecError::from)
}
