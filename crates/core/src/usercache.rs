//! Reads a server's `usercache.json`, the sidecar mapping player UUIDs to their last-known
//! display name. The file is optional and frequently missing or stale; callers fall back to
//! showing raw identifiers when a lookup misses.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct CacheEntry {
    #[serde(alias = "id")]
    uuid: String,
    name: String,
}

/// Strips dashes and lowercases an identifier so `"Aa11-Bb22"` and `"aa11bb22"` compare equal,
/// matching how Minecraft's own UUID formatting is inconsistent across files.
pub fn normalize_id(id: &str) -> String {
    id.chars().filter(|ch| *ch != '-').flat_map(char::to_lowercase).collect()
}

/// Loads `path` as a usercache, mapping normalized id to display name. A missing file or a file
/// that fails to parse is treated as an empty cache rather than an error: the cache is a
/// convenience lookup, not a source of truth for which players exist.
pub fn read_user_cache(path: &Path) -> HashMap<String, String> {
    let Ok(contents) = fs::read_to_string(path) else {
        log::debug!("no usercache at {}; falling back to raw identifiers", path.display());
        return HashMap::new();
    };

    match serde_json::from_str::<Vec<CacheEntry>>(&contents) {
        Ok(entries) => {
            entries.into_iter().map(|entry| (normalize_id(&entry.uuid), entry.name)).collect()
        }
        Err(err) => {
            log::warn!("usercache at {} is malformed ({err}); treating as empty", path.display());
            HashMap::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    #[test]
    fn normalizes_dashes_and_case() {
        assert_eq!(normalize_id("AA11-BB22"), normalize_id("aa11bb22"));
    }

    #[test]
    fn missing_file_is_an_empty_cache() {
        let cache = read_user_cache(Path::new("/nonexistent/usercache.json"));
        assert!(cache.is_empty());
    }

    #[test]
    fn malformed_file_is_an_empty_cache() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not json").unwrap();
        let cache = read_user_cache(file.path());
        assert!(cache.is_empty());
    }

    #[test]
    fn parses_uuid_and_name_pairs() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"[{"uuid":"AA11-BB22","name":"Steve","expiresOn":"2030-01-01"}]"#)
            .unwrap();
        let cache = read_user_cache(file.path());
        assert_eq!(cache.get(&normalize_id("aa11bb22")), Some(&"Steve".to_owned()));
    }
}
