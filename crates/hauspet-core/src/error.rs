//! Error types for hauspet-core

use thiserror::Error;

use crate::config::ConfigError;
use crate::http::ApiError;

/// Result type alias using hauspet-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Failures while setting up a client; per-request failures stay `ApiError`.
#[derive(Error, Debug)]
pub enum Error {
    /// Base URL could not be resolved or validated
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// HTTP client could not be built
    #[error(transparent)]
    Api(#[from] ApiError),
}
