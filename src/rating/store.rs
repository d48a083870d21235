//! Key-value persistence backing the leaderboard

use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

/// Errors raised while writing persisted data
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize value: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A string-to-string store, one record per key
pub trait KeyValueStore {
    /// Value stored under `key`, `None` when absent or unreadable
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Volatile store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store keeping one `<key>.json` file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// The directory is created on the first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File backing `key`. Bytes outside `[A-Za-z0-9_-]` are written as
    /// `%XX`, so distinct keys never share a file.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let mut name = String::with_capacity(key.len());
        for byte in key.bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' {
                name.push(byte as char);
            } else {
                name.push_str(&format!("%{byte:02X}"));
            }
        }
        self.dir.join(format!("{name}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(contents) => Some(contents),
            Err(err) => {
                debug!(path = %path.display(), error = %err, "no stored value");
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.path_for(key);
        std::fs::write(&path, value).map_err(|source| StoreError::Io { path, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("a"), None);

        store.set("a", "1").unwrap();
        store.set("a", "2").unwrap();
        assert_eq!(store.get("a").as_deref(), Some("2"));
    }

    #[test]
    fn test_file_store_creates_directory() {
        let tmp = TempDir::new().unwrap();
        let mut store = FileStore::new(tmp.path().join("nested").join("ratings"));
        assert_eq!(store.get("snake_rating_Easy"), None);

        store.set("snake_rating_Easy", "[]").unwrap();

        assert_eq!(store.get("snake_rating_Easy").as_deref(), Some("[]"));
        assert!(store.path_for("snake_rating_Easy").exists());
    }

    #[test]
    fn test_file_store_escapes_keys() {
        let store = FileStore::new("ratings");
        assert_eq!(
            store.path_for("snake_rating_Very Hard/../x"),
            Path::new("ratings").join("snake_rating_Very%20Hard%2F%2E%2E%2Fx.json")
        );
        assert_eq!(
            store.path_for("snake_rating_Très"),
            Path::new("ratings").join("snake_rating_Tr%C3%A8s.json")
        );
    }

    #[test]
    fn test_file_store_keeps_similar_keys_apart() {
        let tmp = TempDir::new().unwrap();
        let mut store = FileStore::new(tmp.path());
        assert_ne!(
            store.path_for("snake_rating_Very Hard"),
            store.path_for("snake_rating_Very_Hard")
        );
        assert_ne!(store.path_for("a%20b"), store.path_for("a b"));

        store.set("snake_rating_Very Hard", "[1]").unwrap();
        store.set("snake_rating_Very_Hard", "[2]").unwrap();
        assert_eq!(store.get("snake_rating_Very Hard").as_deref(), Some("[1]"));
        assert_eq!(store.get("snake_rating_Very_Hard").as_deref(), Some("[2]"));
    }

    #[test]
    fn test_file_store_write_failure() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let mut store = FileStore::new(blocker.join("ratings"));
        let err = store.set("k", "v").unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }
}
