//! Persistence of the drawing block's attributes.

mod attrs;
mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use attrs::{PersistedAttrs, PersistedStroke, WirePoint, load, save};
pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("No document stored")]
    NotFound,
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Sink the engine writes its attributes to after every committed change.
///
/// Writes are synchronous and fire-and-forget: the host document owns
/// durability, and the engine never retries.
pub trait Storage {
    /// Persist the attributes.
    fn save(&self, attrs: &PersistedAttrs) -> StorageResult<()>;

    /// Load the last persisted attributes.
    fn load(&self) -> StorageResult<PersistedAttrs>;
}
