//! In-memory storage implementation.

use super::{PersistedAttrs, Storage, StorageError, StorageResult};
use std::sync::RwLock;

/// In-memory storage for testing and for hosts that own the document model.
///
/// Records every write so callers can observe persistence granularity.
#[derive(Default)]
pub struct MemoryStorage {
    writes: RwLock<Vec<PersistedAttrs>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage whose latest write is `attrs`.
    pub fn with_attrs(attrs: PersistedAttrs) -> Self {
        Self {
            writes: RwLock::new(vec![attrs]),
        }
    }

    /// Number of writes received.
    pub fn write_count(&self) -> usize {
        self.writes.read().map(|w| w.len()).unwrap_or(0)
    }

    /// The most recent write.
    pub fn latest(&self) -> Option<PersistedAttrs> {
        self.writes.read().ok().and_then(|w| w.last().cloned())
    }
}

impl Storage for MemoryStorage {
    fn save(&self, attrs: &PersistedAttrs) -> StorageResult<()> {
        let mut writes = self
            .writes
            .write()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        writes.push(attrs.clone());
        Ok(())
    }

    fn load(&self) -> StorageResult<PersistedAttrs> {
        let writes = self
            .writes
            .read()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        writes.last().cloned().ok_or(StorageError::NotFound)
    }
}

/// Lets the engine write into storage the caller keeps a handle to.
impl<S: Storage + ?Sized> Storage for std::sync::Arc<S> {
    fn save(&self, attrs: &PersistedAttrs) -> StorageResult<()> {
        (**self).save(attrs)
    }

    fn load(&self) -> StorageResult<PersistedAttrs> {
        (**self).load()
    }
}
