//! In-process secure store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::{SecureStore, StorageError, StorageResult};

/// Map-backed store. Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> StorageResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|error| StorageError::Backend(error.to_string()))
    }
}

impl SecureStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_entries() {
        let store = MemoryStore::new();
        let other = store.clone();

        store.set("user_token", "abc").unwrap();
        assert_eq!(other.get("user_token").unwrap().as_deref(), Some("abc"));

        other.delete("user_token").unwrap();
        assert_eq!(store.get("user_token").unwrap(), None);
        other.delete("user_token").unwrap();
    }
}
