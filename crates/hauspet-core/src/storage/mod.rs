//! Secure key/value storage and the on-device pet mirror built on top of it.

mod file;
mod memory;
mod mirror;

use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use mirror::LocalMirror;

/// Key holding the bearer credential attached to API requests.
pub const USER_TOKEN_KEY: &str = "user_token";
/// Key holding the JSON-serialized pet collection.
pub const PETS_DATA_KEY: &str = "pets_data";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Secure storage error: {0}")]
    Backend(String),
    #[error("Storage IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Stored value under '{key}' is corrupt: {reason}")]
    Corrupt { key: String, reason: String },
    #[error("Failed to serialize value for '{key}': {reason}")]
    Serialize { key: String, reason: String },
}

pub type StorageResult<T> = Result<T, StorageError>;

/// String key/value store for credentials and cached data.
///
/// Mirrors the device secure-storage contract: reading a missing key yields
/// `None`, and deleting a missing key succeeds.
pub trait SecureStore: Clone + Send + Sync + 'static {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
    fn delete(&self, key: &str) -> StorageResult<()>;
}
