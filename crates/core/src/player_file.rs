//! An open player file and its lifecycle: loaded clean, edited dirty, or discovered gone out
//! from under the editor.

use std::fs;
use std::path::{Path, PathBuf};

use playerdat_nbt::{Compound, Tag};

use crate::error::CoreError;
use crate::safe_write::{self, DEFAULT_UNDO_LIMIT};

/// Where a loaded file stands relative to what's on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// In-memory contents match the last-saved (or originally-loaded) bytes.
    Clean,
    /// In-memory contents have pending edits not yet written back.
    Dirty,
    /// The backing file no longer exists where it was loaded from.
    Gone,
}

/// An in-memory player file: its decoded root tag plus enough bookkeeping to save it back
/// safely and to present its fields without regard for the historical `Data` wrapper.
#[derive(Debug, Clone)]
pub struct PlayerFile {
    identifier: String,
    display_name: String,
    path: PathBuf,
    root_name: String,
    root: Compound,
    state: SessionState,
}

impl PlayerFile {
    /// Loads and decodes the gzip NBT file at `path`.
    pub fn load(
        path: impl Into<PathBuf>,
        identifier: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Result<Self, CoreError> {
        let path = path.into();
        let bytes = fs::read(&path)
            .map_err(|source| CoreError::Read { path: path.display().to_string(), source })?;
        let (root_name, root) = playerdat_nbt::io::read_gzip(&bytes)?;

        Ok(Self {
            identifier: identifier.into(),
            display_name: display_name.into(),
            path,
            root_name,
            root,
            state: SessionState::Clean,
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Marks the file as missing from disk; further saves will recreate it from the in-memory
    /// state rather than failing.
    pub fn mark_gone(&mut self) {
        self.state = SessionState::Gone;
    }

    pub fn root(&self) -> &Compound {
        &self.root
    }

    /// A view of the player's own fields, unwrapping the legacy `{"": {"Data": {...}}}` layout
    /// some tools still emit so callers always see player fields at the top level.
    pub fn data(&self) -> &Compound {
        match self.root.get_tag("Data") {
            Some(Tag::Compound(inner)) => inner,
            _ => &self.root,
        }
    }

    pub fn data_mut(&mut self) -> &mut Compound {
        self.state = SessionState::Dirty;
        let wrapped = matches!(self.root.get_tag("Data"), Some(Tag::Compound(_)));
        if wrapped {
            match self.root.get_tag_mut("Data") {
                Some(Tag::Compound(inner)) => inner,
                _ => unreachable!("checked immediately above that Data is a Compound"),
            }
        } else {
            &mut self.root
        }
    }

    /// Runs the rotate-backup-write pipeline against this file's path and marks it clean again.
    pub fn save(&mut self) -> Result<(), CoreError> {
        safe_write::save(&self.path, &self.root_name, &self.root, DEFAULT_UNDO_LIMIT)?;
        self.state = SessionState::Clean;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_sample(path: &Path, wrapped: bool) {
        let mut inner = Compound::new();
        inner.insert("Score", Tag::Int(7));
        let mut root = Compound::new();
        if wrapped {
            root.insert("Data", Tag::Compound(inner));
        } else {
            root = inner;
        }
        let bytes = playerdat_nbt::io::write_gzip("", &root).unwrap();
        fs::write(path, bytes).unwrap();
    }

    #[test]
    fn loads_clean_and_unwraps_data_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("player.dat");
        write_sample(&path, true);

        let file = PlayerFile::load(&path, "id", "name").unwrap();
        assert_eq!(file.state(), SessionState::Clean);
        assert_eq!(file.data().get::<i32>("Score").unwrap(), 7);
    }

    #[test]
    fn unwrapped_file_exposes_root_directly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("player.dat");
        write_sample(&path, false);

        let file = PlayerFile::load(&path, "id", "name").unwrap();
        assert_eq!(file.data().get::<i32>("Score").unwrap(), 7);
    }

    #[test]
    fn editing_marks_dirty_and_saving_marks_clean() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("player.dat");
        write_sample(&path, false);

        let mut file = PlayerFile::load(&path, "id", "name").unwrap();
        file.data_mut().insert("Score", Tag::Int(9));
        assert_eq!(file.state(), SessionState::Dirty);

        file.save().unwrap();
        assert_eq!(file.state(), SessionState::Clean);

        let reloaded = PlayerFile::load(&path, "id", "name").unwrap();
        assert_eq!(reloaded.data().get::<i32>("Score").unwrap(), 9);
    }
}
