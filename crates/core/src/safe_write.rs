//! A rotate-backup-then-write pipeline for persisting a player file: before any byte of the
//! target is touched, the previous undo chain is rotated and a fresh `.bak` snapshot is taken,
//! and the new contents land via a temp file plus rename so a crash mid-write never leaves a
//! half-written `.dat` in place.

use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use playerdat_nbt::Compound;

use crate::error::SafeWriteError;

pub const DEFAULT_UNDO_LIMIT: u32 = 8;

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

fn undo_path(path: &Path, slot: u32) -> PathBuf {
    with_suffix(path, &format!(".undo{slot}"))
}

fn backup_path(path: &Path) -> PathBuf {
    with_suffix(path, ".bak")
}

fn tmp_path(path: &Path) -> PathBuf {
    with_suffix(path, ".tmp")
}

fn backup_failed(path: &Path) -> impl FnOnce(std::io::Error) -> SafeWriteError + '_ {
    move |source| SafeWriteError::BackupFailed { path: path.display().to_string(), source }
}

fn write_failed(path: &Path) -> impl FnOnce(std::io::Error) -> SafeWriteError + '_ {
    move |source| SafeWriteError::WriteFailed { path: path.display().to_string(), source }
}

/// Shifts `path.undo1..undo{N-1}` up one slot, dropping whatever previously sat at `undoN`, then
/// copies the current on-disk file into the now-vacant `undo1`. A no-op when `path` doesn't yet
/// exist, since there's nothing to preserve.
fn rotate_undo_chain(path: &Path, undo_limit: u32) -> Result<(), SafeWriteError> {
    if undo_limit == 0 || !path.is_file() {
        return Ok(());
    }

    for slot in (2..=undo_limit).rev() {
        let from = undo_path(path, slot - 1);
        let to = undo_path(path, slot);
        if !from.is_file() {
            continue;
        }
        if slot == undo_limit && to.is_file() {
            log::debug!("undo chain full for {}; dropping oldest snapshot", path.display());
        }
        fs::rename(&from, &to).map_err(backup_failed(path))?;
    }

    fs::copy(path, undo_path(path, 1)).map_err(backup_failed(path))?;
    Ok(())
}

fn write_backup(path: &Path) -> Result<(), SafeWriteError> {
    if path.is_file() {
        fs::copy(path, backup_path(path)).map_err(backup_failed(path))?;
    }
    Ok(())
}

fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), SafeWriteError> {
    let tmp = tmp_path(path);
    {
        let mut file = fs::File::create(&tmp).map_err(write_failed(path))?;
        file.write_all(bytes).map_err(write_failed(path))?;
        file.sync_all().map_err(write_failed(path))?;
    }
    fs::rename(&tmp, path).map_err(write_failed(path))
}

/// Persists `compound` to `path` under the root name `root_name`, rotating up to `undo_limit`
/// prior snapshots and refreshing the single-shot `.bak` before the new contents ever touch
/// `path` itself.
pub fn save(
    path: &Path,
    root_name: &str,
    compound: &Compound,
    undo_limit: u32,
) -> Result<(), SafeWriteError> {
    rotate_undo_chain(path, undo_limit)?;
    write_backup(path)?;
    let bytes = playerdat_nbt::io::write_gzip(root_name, compound)?;
    write_atomically(path, &bytes)
}

/// Overwrites `path` with the undo snapshot at `slot` (1 being the most recent).
pub fn restore_undo(path: &Path, slot: u32) -> Result<(), SafeWriteError> {
    let snapshot = undo_path(path, slot);
    if !snapshot.is_file() {
        return Err(SafeWriteError::NoUndoAvailable(slot));
    }
    fs::copy(&snapshot, path).map_err(write_failed(path))?;
    Ok(())
}

/// Overwrites `path` with its `.bak` snapshot.
pub fn restore_backup(path: &Path) -> Result<(), SafeWriteError> {
    let backup = backup_path(path);
    if !backup.is_file() {
        return Err(SafeWriteError::NoBackupAvailable);
    }
    fs::copy(&backup, path).map_err(write_failed(path))?;
    Ok(())
}
