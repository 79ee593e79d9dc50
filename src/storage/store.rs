//! Backing stores for the dataset document
//!
//! A store only moves a whole `Dataset` in and out of its medium. Seeding and
//! lenient decoding live in the accessor.

use std::sync::RwLock;

use super::errors::{StorageError, StorageResult};
use super::record::Dataset;

/// Raw contents of a backing medium
#[derive(Debug, Clone, PartialEq)]
pub enum StoredDocument {
    /// Nothing has been persisted yet
    Missing,
    /// Persisted bytes, not yet decoded
    Bytes(Vec<u8>),
}

/// Medium holding the serialized dataset
pub trait DatasetStore: Send + Sync {
    /// Read the persisted document
    fn read(&self) -> StorageResult<StoredDocument>;

    /// Overwrite the persisted document
    fn write(&self, bytes: &[u8]) -> StorageResult<()>;

    /// Human-readable location, for logs
    fn describe(&self) -> String;
}

/// In-process store for tests and ephemeral runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: RwLock<Option<Vec<u8>>>,
}

impl MemoryStore {
    /// Create an empty store; the first load seeds it
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding `dataset`
    pub fn with_dataset(dataset: &Dataset) -> StorageResult<Self> {
        let bytes = super::encode(dataset)?;
        Ok(Self {
            document: RwLock::new(Some(bytes)),
        })
    }

    /// Create a store holding arbitrary raw bytes
    pub fn with_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            document: RwLock::new(Some(bytes.into())),
        }
    }
}

impl DatasetStore for MemoryStore {
    fn read(&self) -> StorageResult<StoredDocument> {
        let document = self
            .document
            .read()
            .map_err(|_| StorageError::lock_poisoned())?;
        Ok(match document.as_ref() {
            Some(bytes) => StoredDocument::Bytes(bytes.clone()),
            None => StoredDocument::Missing,
        })
    }

    fn write(&self, bytes: &[u8]) -> StorageResult<()> {
        let mut document = self
            .document
            .write()
            .map_err(|_| StorageError::lock_poisoned())?;
        *document = Some(bytes.to_vec());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
