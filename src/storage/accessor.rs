//! Storage accessor: whole-dataset load and save over a backing store

use std::sync::Arc;

use serde_json::Value;

use super::errors::{StorageError, StorageResult};
use super::record::Dataset;
use super::seed::seed_dataset;
use super::store::{DatasetStore, StoredDocument};

/// Single entry point to the persisted dataset.
///
/// Every operation reads the full document and every mutation writes it back
/// in full. Concurrent load/mutate/save cycles are not coordinated; the last
/// save wins.
#[derive(Clone)]
pub struct StorageAccessor {
    store: Arc<dyn DatasetStore>,
}

impl StorageAccessor {
    pub fn new(store: Arc<dyn DatasetStore>) -> Self {
        Self { store }
    }

    /// Accessor over a fresh in-memory store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(super::MemoryStore::new()))
    }

    /// Location of the backing store, for logs
    pub fn location(&self) -> String {
        self.store.describe()
    }

    /// Load the dataset, seeding the store first if nothing was persisted.
    ///
    /// Bytes that are not a JSON object load as an empty dataset. A JSON
    /// object that is not a map of record arrays is an error, so the next save
    /// cannot overwrite it.
    pub fn load(&self) -> StorageResult<Dataset> {
        match self.store.read()? {
            StoredDocument::Missing => {
                let dataset = seed_dataset();
                self.save(&dataset)?;
                tracing::info!(location = %self.store.describe(), "seeded empty dataset store");
                Ok(dataset)
            }
            StoredDocument::Bytes(bytes) => self.decode(&bytes),
        }
    }

    fn decode(&self, bytes: &[u8]) -> StorageResult<Dataset> {
        let document = match serde_json::from_slice::<Value>(bytes) {
            Ok(document @ Value::Object(_)) => document,
            Ok(_) => {
                tracing::warn!(
                    location = %self.store.describe(),
                    "dataset document is not a JSON object, treating as empty"
                );
                return Ok(Dataset::new());
            }
            Err(e) => {
                tracing::warn!(
                    location = %self.store.describe(),
                    error = %e,
                    "dataset document is not JSON, treating as empty"
                );
                return Ok(Dataset::new());
            }
        };

        serde_json::from_value(document).map_err(|e| {
            StorageError::decode_failed(format!("{}: {}", self.store.describe(), e))
        })
    }

    /// Serialize and overwrite the persisted dataset
    pub fn save(&self, dataset: &Dataset) -> StorageResult<()> {
        let bytes = super::encode(dataset)?;
        self.store.write(&bytes)
    }

    /// Write the seed dataset unless something is already persisted.
    ///
    /// Returns whether the seed was written. With `force` the seed replaces
    /// any existing document.
    pub fn initialize(&self, force: bool) -> StorageResult<bool> {
        if !force && self.store.read()? != StoredDocument::Missing {
            return Ok(false);
        }
        self.save(&seed_dataset())?;
        Ok(true)
    }
}

impl std::fmt::Debug for StorageAccessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageAccessor")
            .field("store", &self.store.describe())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, Record, StorageErrorCode};

    #[test]
    fn test_first_load_seeds_and_persists() {
        let store = Arc::new(MemoryStore::new());
        let accessor = StorageAccessor::new(store.clone());

        let dataset = accessor.load().unwrap();
        assert_eq!(dataset, seed_dataset());
        assert_ne!(store.read().unwrap(), StoredDocument::Missing);
    }

    #[test]
    fn test_save_then_load() {
        let accessor = StorageAccessor::in_memory();
        let mut dataset = accessor.load().unwrap();
        dataset
            .collection_mut("companies")
            .push(Record::with_id(1).field("name", "Acme"));

        accessor.save(&dataset).unwrap();

        assert_eq!(accessor.load().unwrap(), dataset);
    }

    #[test]
    fn test_undecodable_document_loads_empty() {
        let accessor = StorageAccessor::new(Arc::new(MemoryStore::with_bytes(b"not json".to_vec())));
        assert_eq!(accessor.load().unwrap(), Dataset::new());

        let accessor = StorageAccessor::new(Arc::new(MemoryStore::with_bytes(b"[1, 2]".to_vec())));
        assert_eq!(accessor.load().unwrap(), Dataset::new());
    }

    #[test]
    fn test_nested_values_are_kept() {
        let store = Arc::new(MemoryStore::with_bytes(
            br#"{"users":[{"id":1,"name":"A","tags":["vip"]}],"deals":[{"id":1},{"id":2}]}"#.to_vec(),
        ));
        let accessor = StorageAccessor::new(store);

        let dataset = accessor.load().unwrap();
        assert_eq!(dataset.collection("users").len(), 1);
        assert_eq!(dataset.collection("deals").len(), 2);
    }

    #[test]
    fn test_object_of_wrong_shape_is_an_error() {
        for bytes in [&br#"{"deals": {"id": 1}}"#[..], &br#"{"deals": [1, 2]}"#[..]] {
            let accessor = StorageAccessor::new(Arc::new(MemoryStore::with_bytes(bytes.to_vec())));
            let err = accessor.load().unwrap_err();
            assert_eq!(err.code(), StorageErrorCode::CrmStorageDecodeFailed);
        }
    }

    #[test]
    fn test_initialize_respects_existing_document() {
        let accessor = StorageAccessor::new(Arc::new(MemoryStore::with_bytes(b"{}".to_vec())));
        assert!(!accessor.initialize(false).unwrap());
        assert_eq!(accessor.load().unwrap(), Dataset::new());

        assert!(accessor.initialize(true).unwrap());
        assert_eq!(accessor.load().unwrap(), seed_dataset());
    }
}
