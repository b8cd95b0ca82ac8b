//! JSON-file backed secure store.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{SecureStore, StorageError, StorageResult};

/// Store that keeps every key in a single JSON object on disk.
///
/// The file is rewritten whole on every `set`/`delete`.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: Arc<PathBuf>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> StorageResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw = std::fs::read_to_string(self.path.as_path())?;
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw).map_err(|error| StorageError::Corrupt {
            key: self.path.display().to_string(),
            reason: error.to_string(),
        })
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let serialized =
            serde_json::to_string_pretty(entries).map_err(|error| StorageError::Serialize {
                key: self.path.display().to_string(),
                reason: error.to_string(),
            })?;
        std::fs::write(self.path.as_path(), serialized)?;
        Ok(())
    }
}

impl SecureStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        let mut entries = self.read_entries()?;
        if entries.remove(key).is_some() {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("store.json"));
        assert_eq!(store.get("pets_data").unwrap(), None);
        store.delete("pets_data").unwrap();
    }

    #[test]
    fn set_creates_parent_dirs_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");
        let store = FileStore::new(&path);

        store.set("user_token", "secret").unwrap();
        store.set("pets_data", "[]").unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("user_token").unwrap().as_deref(), Some("secret"));
        assert_eq!(reopened.get("pets_data").unwrap().as_deref(), Some("[]"));

        reopened.delete("user_token").unwrap();
        assert_eq!(store.get("user_token").unwrap(), None);
        assert_eq!(store.get("pets_data").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn garbage_file_is_reported_as_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "not json").unwrap();

        let error = FileStore::new(&path).get("pets_data").unwrap_err();
        assert!(matches!(error, StorageError::Corrupt { .. }));
    }
}
