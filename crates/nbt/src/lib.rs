//! A typed in-memory tree model and binary codec for Minecraft's Named Binary Tag format,
//! scoped to the big-endian, gzip-wrapped encoding used by Java Edition player data files.

mod error;
mod kind;
mod raw;
mod tag;

pub mod codec;
pub mod io;

pub use self::error::{CodecError, StructureError};
pub use self::kind::TagKind;
pub use self::tag::{kind_of, Compound, Tag, TagList};
