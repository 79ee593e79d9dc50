//! Dataset storage
//!
//! The whole CRM dataset lives in one JSON document. It is read in full
//! before every operation and written in full after every mutation; there is
//! no partial I/O and no cross-request locking.
//!
//! # Layout
//!
//! - `record`: `Dataset`, `Record` and the scalar `FieldValue`
//! - `store`: the `DatasetStore` medium trait and the in-memory store
//! - `file`: the JSON file store
//! - `seed`: the sample dataset used to initialize an empty store
//! - `accessor`: `StorageAccessor`, the only way callers reach a store

mod accessor;
mod errors;
mod file;
mod record;
mod seed;
mod store;

pub use accessor::StorageAccessor;
pub use errors::{StorageError, StorageErrorCode, StorageResult};
pub use file::JsonFileStore;
pub use record::{Dataset, FieldValue, Record, ID_FIELD};
pub use seed::seed_dataset;
pub use store::{DatasetStore, MemoryStore, StoredDocument};

/// Serialize a dataset the way it is persisted: pretty-printed UTF-8 JSON
/// with non-ASCII characters left unescaped.
pub fn encode(dataset: &Dataset) -> StorageResult<Vec<u8>> {
    serde_json::to_vec_pretty(dataset).map_err(|e| StorageError::encode_failed(e.to_string()))
}
