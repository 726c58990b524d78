//! Locates player data files on a server install and resolves loose player queries (a UUID, a
//! dashless UUID, or a display name) to a concrete `.dat` path.

use std::fs;
use std::path::{Path, PathBuf};

use crate::usercache::{self, normalize_id};

/// A player entry surfaced by [`PlayerDataRepository::list_players`]: the best-known display
/// name, the raw filename identifier, and the file's path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerEntry {
    pub display_name: String,
    pub identifier: String,
    pub path: PathBuf,
}

/// Knows where a server's player data and usercache live, without holding any of it open.
#[derive(Debug, Clone)]
pub struct PlayerDataRepository {
    playerdata_dir: PathBuf,
    usercache_path: PathBuf,
}

impl PlayerDataRepository {
    pub fn new(playerdata_dir: impl Into<PathBuf>, usercache_path: impl Into<PathBuf>) -> Self {
        Self { playerdata_dir: playerdata_dir.into(), usercache_path: usercache_path.into() }
    }

    /// Builds a repository from a server's root directory, assuming the conventional
    /// `world/playerdata` layout and checking both the server root and the world directory for
    /// `usercache.json`.
    pub fn with_defaults(server_root: impl AsRef<Path>) -> Self {
        let server_root = server_root.as_ref();
        let world_dir = server_root.join("world");
        let playerdata_dir = world_dir.join("playerdata");

        let top_level_cache = server_root.join("usercache.json");
        let usercache_path =
            if top_level_cache.is_file() { top_level_cache } else { world_dir.join("usercache.json") };

        Self::new(playerdata_dir, usercache_path)
    }

    pub fn playerdata_dir(&self) -> &Path {
        &self.playerdata_dir
    }

    pub fn read_user_cache(&self) -> std::collections::HashMap<String, String> {
        usercache::read_user_cache(&self.usercache_path)
    }

    /// Lists every `.dat` file under the player data directory, paired with its best-known
    /// display name, sorted by that name.
    pub fn list_players(&self) -> std::io::Result<Vec<PlayerEntry>> {
        let cache = self.read_user_cache();
        let mut players = Vec::new();

        for entry in fs::read_dir(&self.playerdata_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("dat") {
                continue;
            }
            let Some(identifier) = path.file_stem().and_then(|s| s.to_str()) else { continue };
            let display_name = cache
                .get(&normalize_id(identifier))
                .cloned()
                .unwrap_or_else(|| identifier.to_owned());
            players.push(PlayerEntry { display_name, identifier: identifier.to_owned(), path });
        }

        players.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        Ok(players)
    }

    /// Resolves a loose query to a player file: a literal filename, a UUID (with or without
    /// dashes, case-insensitively), or a display name known to the usercache. Returns `None`
    /// when nothing matches.
    pub fn resolve(&self, query: &str) -> Option<PathBuf> {
        if query.ends_with(".dat") {
            let candidate = self.playerdata_dir.join(query);
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        let cache = self.read_user_cache();
        let normalized_query = normalize_id(query);
        let lower_query = query.to_lowercase();

        let entries = fs::read_dir(&self.playerdata_dir).ok()?;
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("dat") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else { continue };
            let normalized_stem = normalize_id(stem);

            if normalized_stem == normalized_query {
                return Some(path);
            }
            if cache.get(&normalized_stem).is_some_and(|name| name.to_lowercase() == lower_query) {
                return Some(path);
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn write_dat(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"\x0a\x00\x00\x00").unwrap();
    }

    #[test]
    fn resolves_by_dashless_id_and_by_name() {
        let dir = tempfile::tempdir().unwrap();
        write_dat(dir.path(), "aa11bb22-cc33-dd44-ee55-ff6677889900.dat");
        fs::write(
            dir.path().join("usercache.json"),
            br#"[{"uuid":"aa11bb22-cc33-dd44-ee55-ff6677889900","name":"Steve"}]"#,
        )
        .unwrap();

        let repo = PlayerDataRepository::new(dir.path(), dir.path().join("usercache.json"));

        assert!(repo.resolve("AA11BB22CC33DD44EE55FF6677889900").is_some());
        assert!(repo.resolve("steve").is_some());
        assert!(repo.resolve("nobody").is_none());
    }

    #[test]
    fn list_players_falls_back_to_identifier_without_a_cache_hit() {
        let dir = tempfile::tempdir().unwrap();
        write_dat(dir.path(), "11111111-1111-1111-1111-111111111111.dat");

        let repo = PlayerDataRepository::new(dir.path(), dir.path().join("usercache.json"));
        let players = repo.list_players().unwrap();

        assert_eq!(players.len(), 1);
        assert_eq!(players[0].display_name, "11111111-1111-1111-1111-111111111111");
    }
}
