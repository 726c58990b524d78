//! Gzip framing around the binary codec, matching the `.dat` file format Java Edition uses for
//! per-player state.

use std::io::{Read, Write};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::codec;
use crate::error::CodecError;
use crate::tag::Compound;

/// Decompresses and decodes a gzip-wrapped NBT file, returning the root tag's name (usually
/// empty for player files) and its Compound body.
pub fn read_gzip(bytes: &[u8]) -> Result<(String, Compound), CodecError> {
    let mut decoder = GzDecoder::new(bytes);
    let mut inflated = Vec::new();
    decoder.read_to_end(&mut inflated).map_err(|err| {
        if err.kind() == std::io::ErrorKind::InvalidInput {
            CodecError::BadMagic
        } else {
            CodecError::from_read_error(err)
        }
    })?;
    codec::decode_root(&mut inflated.as_slice())
}

/// Encodes and gzip-compresses a root Compound tag, the inverse of [`read_gzip`].
pub fn write_gzip(name: &str, compound: &Compound) -> Result<Vec<u8>, CodecError> {
    let mut inflated = Vec::new();
    codec::encode_root(&mut inflated, name, compound)?;

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&inflated).map_err(CodecError::from)?;
    encoder.finish().map_err(CodecError::from)
}
