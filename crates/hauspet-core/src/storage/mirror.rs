//! On-device mirror of the pet collection.
//!
//! The whole collection lives under a single key as a JSON array. There is no
//! partial-update API: callers read everything, change it in memory, and write
//! everything back.

use serde_json::Value;

use super::{SecureStore, StorageError, StorageResult, PETS_DATA_KEY};
use crate::models::Pet;

#[derive(Debug, Clone)]
pub struct LocalMirror<S: SecureStore> {
    store: S,
    key: String,
}

impl<S: SecureStore> LocalMirror<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, PETS_DATA_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Load the stored collection. A missing key is an empty collection.
    pub fn load(&self) -> StorageResult<Vec<Pet>> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(Vec::new());
        };

        let value: Value = serde_json::from_str(&raw).map_err(|error| self.corrupt(error))?;
        if !value.is_array() {
            return Err(StorageError::Corrupt {
                key: self.key.clone(),
                reason: "expected a JSON array".to_string(),
            });
        }
        serde_json::from_value(value).map_err(|error| self.corrupt(error))
    }

    /// Serialize and persist the full collection, replacing prior contents.
    pub fn save(&self, pets: &[Pet]) -> StorageResult<()> {
        let raw = serde_json::to_string(pets).map_err(|error| StorageError::Serialize {
            key: self.key.clone(),
            reason: error.to_string(),
        })?;
        self.store.set(&self.key, &raw)
    }

    /// Best-effort read: any storage or decoding failure yields an empty list.
    pub fn read_all(&self) -> Vec<Pet> {
        self.load().unwrap_or_else(|error| {
            tracing::warn!("Ignoring unreadable local pet mirror: {}", error);
            Vec::new()
        })
    }

    /// Best-effort write: failures are logged and otherwise ignored.
    pub fn write_all(&self, pets: &[Pet]) {
        if let Err(error) = self.save(pets) {
            tracing::warn!("Failed to persist local pet mirror: {}", error);
        }
    }

    fn corrupt(&self, error: serde_json::Error) -> StorageError {
        StorageError::Corrupt {
            key: self.key.clone(),
            reason: error.to_string(),
        }
    }
}
