//! OS keychain backed secure store for the API token.

use hauspet_core::storage::{SecureStore, StorageError, StorageResult};
use keyring::Entry;

const KEYRING_SERVICE_NAME: &str = "hauspet";

/// Keeps each key as a separate keychain entry under the `hauspet` service.
#[derive(Debug, Clone)]
pub struct KeyringStore {
    service_name: String,
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self {
            service_name: KEYRING_SERVICE_NAME.to_string(),
        }
    }
}

impl KeyringStore {
    fn entry(&self, key: &str) -> StorageResult<Entry> {
        Entry::new(&self.service_name, key).map_err(map_keyring_error)
    }
}

impl SecureStore for KeyringStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(error) => Err(map_keyring_error(error)),
        }
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.entry(key)?
            .set_password(value)
            .map_err(map_keyring_error)
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(error) => Err(map_keyring_error(error)),
        }
    }
}

fn map_keyring_error(error: keyring::Error) -> StorageError {
    StorageError::Backend(error.to_string())
}
