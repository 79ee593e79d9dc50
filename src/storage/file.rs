//! JSON file store

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::errors::{StorageError, StorageResult};
use super::store::{DatasetStore, StoredDocument};

/// Store keeping the dataset in a single JSON file.
///
/// Writes go to a sibling temp file which is then renamed over the target,
/// so a reader in this process never observes a half-written document.
/// Nothing coordinates separate processes writing the same file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "data.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl DatasetStore for JsonFileStore {
    fn read(&self) -> StorageResult<StoredDocument> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(StoredDocument::Bytes(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(StoredDocument::Missing),
            Err(e) => Err(StorageError::read_failed(
                self.path.display().to_string(),
                e,
            )),
        }
    }

    fn write(&self, bytes: &[u8]) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    StorageError::write_failed(parent.display().to_string(), e)
                })?;
            }
        }

        let temp_path = self.temp_path();
        fs::write(&temp_path, bytes)
            .map_err(|e| StorageError::write_failed(temp_path.display().to_string(), e))?;
        fs::rename(&temp_path, &self.path)
            .map_err(|e| StorageError::write_failed(self.path.display().to_string(), e))?;

        tracing::debug!(path = %self.path.display(), bytes = bytes.len(), "dataset written");
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_as_missing() {
        let tmp = TempDir::new().unwrap();
        let store = JsonFileStore::new(tmp.path().join("data.json"));
        assert_eq!(store.read().unwrap(), StoredDocument::Missing);
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("dir").join("data.json");
        let store = JsonFileStore::new(&path);

        store.write(b"{}").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"{}");
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn test_unreadable_path_is_an_error() {
        let tmp = TempDir::new().unwrap();
        // A directory cannot be read as a file
        let store = JsonFileStore::new(tmp.path());
        let err = store.read().unwrap_err();
        assert_eq!(err.code().code(), "CRM_STORAGE_READ_FAILED");
    }
}
