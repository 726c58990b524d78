use std::io;

use playerdat_nbt::{CodecError, StructureError};
use thiserror::Error;

/// An error produced while locating, reading, or interpreting a player's data outside the
/// tag tree itself (missing file, directory walk failures, and so on).
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("failed to read player data at {path}: {source}")]
    Read { path: String, #[source] source: io::Error },

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Structure(#[from] StructureError),

    #[error(transparent)]
    SafeWrite(#[from] SafeWriteError),
}

/// An error produced by the rotate-backup-write pipeline used to persist a player file.
#[derive(Debug, Error)]
pub enum SafeWriteError {
    #[error("failed to rotate undo history for {path}: {source}")]
    BackupFailed { path: String, #[source] source: io::Error },

    #[error("failed to encode player data: {0}")]
    EncodeFailed(#[from] CodecError),

    #[error("failed to write player file {path}: {source}")]
    WriteFailed { path: String, #[source] source: io::Error },

    #[error("no undo snapshot is available at slot {0}")]
    NoUndoAvailable(u32),

    #[error("no backup is available for this file")]
    NoBackupAvailable,
}

/// An error produced by a domain-level operation over an inventory-shaped list.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error(transparent)]
    Structure(#[from] StructureError),

    #[error(transparent)]
    ListKind(#[from] CodecError),
}
