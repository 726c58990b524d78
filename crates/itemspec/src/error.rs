use thiserror::Error;

/// A failure to parse an item-spec string, located by byte offset.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("at offset {at_offset}: expected {expected}")]
pub struct ParseError {
    pub at_offset: usize,
    pub expected: String,
}

impl ParseError {
    pub fn new(at_offset: usize, expected: impl Into<String>) -> Self {
        Self { at_offset, expected: expected.into() }
    }
}
