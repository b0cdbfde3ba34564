//! File-backed key-value store.
//!
//! Persists each key as a single file under a base directory, used for
//! the durable metric backlog that survives process restarts.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::ports::{KeyValueStore, StoreError};

/// Key-value store writing one file per key.
pub struct FileKeyValueStore {
    base_dir: PathBuf,
}

impl FileKeyValueStore {
    /// Creates a store rooted at the given directory.
    ///
    /// The directory is created lazily on first write.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", key))
    }

    fn ensure_dir(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.base_dir).map_err(|e| StoreError::Backend(e.to_string()))
    }

    /// Returns the directory this store writes into.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Backend(e.to_string())),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.ensure_dir()?;
        fs::write(self.key_path(key), value).map_err(|e| StoreError::Backend(e.to_string()))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Backend(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn get_returns_none_for_missing_key() {
        let dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(dir.path());

        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn set_then_get_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(dir.path());

        store.set("backlog", r#"[{"score":42}]"#).unwrap();

        assert_eq!(
            store.get("backlog").unwrap(),
            Some(r#"[{"score":42}]"#.to_string())
        );
    }

    #[test]
    fn set_overwrites_existing_value() {
        let dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(dir.path());

        store.set("backlog", "first").unwrap();
        store.set("backlog", "second").unwrap();

        assert_eq!(store.get("backlog").unwrap(), Some("second".to_string()));
    }

    #[test]
    fn remove_deletes_key() {
        let dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(dir.path());

        store.set("backlog", "value").unwrap();
        store.remove("backlog").unwrap();

        assert_eq!(store.get("backlog").unwrap(), None);
    }

    #[test]
    fn remove_of_missing_key_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(dir.path());

        assert!(store.remove("missing").is_ok());
    }

    #[test]
    fn creates_base_dir_on_first_write() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("praxis").join("analytics");
        let store = FileKeyValueStore::new(&nested);

        store.set("backlog", "value").unwrap();

        assert!(nested.exists());
        assert_eq!(store.get("backlog").unwrap(), Some("value".to_string()));
    }
}
