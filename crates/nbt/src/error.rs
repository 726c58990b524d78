use std::io;

use thiserror::Error;

use crate::kind::TagKind;

/// An error produced while decoding or encoding the binary NBT format.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("unexpected end of input while decoding NBT data")]
    TruncatedInput,

    #[error("input is not a valid gzip stream")]
    BadMagic,

    #[error("invalid tag kind byte 0x{0:02X}")]
    InvalidTagKind(u8),

    #[error("negative length {0} encountered while decoding an array or list")]
    NegativeLength(i32),

    #[error("string contents are not valid modified UTF-8")]
    InvalidUtf8,

    #[error("root tag is not a Compound")]
    RootNotCompound,

    #[error("nesting depth exceeded the limit of {limit} levels")]
    ExceededDepthLimit { limit: u32 },

    #[error(
        "list declared with element kind {declared:?} cannot hold an element of kind {found:?}"
    )]
    ListKindMismatch { declared: TagKind, found: TagKind },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl CodecError {
    pub(crate) fn from_read_error(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::UnexpectedEof => Self::TruncatedInput,
            _ => Self::Io(err),
        }
    }
}

/// An error produced when the shape of an in-memory tag tree doesn't match what a caller
/// expected of it (wrong kind, missing key, out-of-range index).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StructureError {
    #[error("expected a tag of kind {expected:?}, found {found:?}")]
    WrongKind { expected: TagKind, found: TagKind },

    #[error("compound has no tag named {name:?}")]
    MissingTag { name: Box<str> },

    #[error("index {index} is out of bounds for a list of length {length}")]
    InvalidIndex { index: usize, length: usize },
}

impl StructureError {
    pub fn wrong_kind(expected: TagKind, found: TagKind) -> Self {
        Self::WrongKind { expected, found }
    }

    pub fn missing_tag(name: impl Into<Box<str>>) -> Self {
        Self::MissingTag { name: name.into() }
    }

    pub fn invalid_index(index: usize, length: usize) -> Self {
        Self::InvalidIndex { index, length }
    }
}
