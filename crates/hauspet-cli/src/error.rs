use std::io;

use hauspet_core::config::ConfigError;
use hauspet_core::storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] hauspet_core::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    ClientConfig(#[from] ConfigError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Pet ID cannot be empty")]
    EmptyPetId,
    #[error("Pet name cannot be empty")]
    EmptyPetName,
    #[error("Nothing to update; pass at least one field flag")]
    NothingToUpdate,
    #[error("Pet not found: {0}")]
    PetNotFound(String),
    #[error("API token cannot be empty")]
    EmptyToken,
    #[error("Configuration error: {0}")]
    Config(String),
}
