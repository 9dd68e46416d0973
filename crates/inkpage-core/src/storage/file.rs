//! File-based storage implementation for native platforms.

use super::{PersistedAttrs, Storage, StorageError, StorageResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Stores the attributes of one drawing block as a JSON file.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Create a file storage writing to `path`.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    StorageError::Io(format!("Failed to create storage directory: {}", e))
                })?;
            }
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for FileStorage {
    fn save(&self, attrs: &PersistedAttrs) -> StorageResult<()> {
        let json = attrs.to_json_pretty()?;
        fs::write(&self.path, json).map_err(|e| {
            StorageError::Io(format!("Failed to write {}: {}", self.path.display(), e))
        })
    }

    fn load(&self) -> StorageResult<PersistedAttrs> {
        if !self.path.exists() {
            return Err(StorageError::NotFound);
        }

        let json = fs::read_to_string(&self.path).map_err(|e| {
            StorageError::Io(format!("Failed to read {}: {}", self.path.display(), e))
        })?;

        PersistedAttrs::from_json(&json).map_err(|e| {
            StorageError::Serialization(format!("Failed to parse {}: {}", self.path.display(), e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paper::{PaperColor, PaperType};
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("notes").join("block.json")).unwrap();
        let attrs = PersistedAttrs {
            lines: Vec::new(),
            paper_type: PaperType::Isometric,
            paper_color: PaperColor::Dark,
        };

        storage.save(&attrs).unwrap();
        assert!(storage.path().exists());
        assert_eq!(storage.load().unwrap(), attrs);
    }

    #[test]
    fn test_not_found() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("missing.json")).unwrap();
        assert!(matches!(storage.load(), Err(StorageError::NotFound)));
    }

    #[test]
    fn test_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        let storage = FileStorage::new(&path).unwrap();
        assert!(matches!(storage.load(), Err(StorageError::Serialization(_))));
    }
}
