//! hauspet-core - Core library for HausPet
//!
//! This crate contains the pet models, the on-device mirror of the pet
//! collection, the HTTP transport, and the offline-aware repository that the
//! HausPet clients use to manage pet records whether or not the backend is
//! reachable.

pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod remote;
pub mod repository;
pub mod storage;
pub mod util;

pub use config::{ClientConfig, RetryPolicy};
pub use error::{Error, Result};
pub use models::{Pet, PetDraft, PetPatch};
pub use repository::{OfflinePetRepository, Origin, Outcome};
