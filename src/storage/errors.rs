//! Storage error types
//!
//! Error codes:
//! - CRM_STORAGE_READ_FAILED
//! - CRM_STORAGE_WRITE_FAILED
//! - CRM_STORAGE_DECODE_FAILED
//! - CRM_STORAGE_ENCODE_FAILED
//! - CRM_STORAGE_LOCK_POISONED
//!
//! Every storage error reaches HTTP clients as a 500 `Storage unavailable`;
//! the code and message stay in the server log.

use std::fmt;
use std::io;

/// Storage-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorCode {
    /// The dataset document could not be read
    CrmStorageReadFailed,
    /// The dataset document could not be written
    CrmStorageWriteFailed,
    /// The document is a JSON object but not a resource map of records
    CrmStorageDecodeFailed,
    /// The dataset could not be serialized
    CrmStorageEncodeFailed,
    /// An in-process store lock was poisoned by a panicking holder
    CrmStorageLockPoisoned,
}

impl StorageErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            StorageErrorCode::CrmStorageReadFailed => "CRM_STORAGE_READ_FAILED",
            StorageErrorCode::CrmStorageWriteFailed => "CRM_STORAGE_WRITE_FAILED",
            StorageErrorCode::CrmStorageDecodeFailed => "CRM_STORAGE_DECODE_FAILED",
            StorageErrorCode::CrmStorageEncodeFailed => "CRM_STORAGE_ENCODE_FAILED",
            StorageErrorCode::CrmStorageLockPoisoned => "CRM_STORAGE_LOCK_POISONED",
        }
    }
}

impl fmt::Display for StorageErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Storage error with the offending location and the underlying cause
#[derive(Debug)]
pub struct StorageError {
    code: StorageErrorCode,
    message: String,
    source: Option<io::Error>,
}

impl StorageError {
    /// Reading the backing medium failed
    pub fn read_failed(message: impl Into<String>, source: io::Error) -> Self {
        Self {
            code: StorageErrorCode::CrmStorageReadFailed,
            message: message.into(),
            source: Some(source),
        }
    }

    /// Writing the backing medium failed
    pub fn write_failed(message: impl Into<String>, source: io::Error) -> Self {
        Self {
            code: StorageErrorCode::CrmStorageWriteFailed,
            message: message.into(),
            source: Some(source),
        }
    }

    /// The persisted document does not fit the dataset shape
    pub fn decode_failed(message: impl Into<String>) -> Self {
        Self {
            code: StorageErrorCode::CrmStorageDecodeFailed,
            message: message.into(),
            source: None,
        }
    }

    /// Serializing the dataset failed
    pub fn encode_failed(message: impl Into<String>) -> Self {
        Self {
            code: StorageErrorCode::CrmStorageEncodeFailed,
            message: message.into(),
            source: None,
        }
    }

    /// A store lock was poisoned
    pub fn lock_poisoned() -> Self {
        Self {
            code: StorageErrorCode::CrmStorageLockPoisoned,
            message: "dataset lock was poisoned".into(),
            source: None,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> StorageErrorCode {
        self.code
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)?;
        if let Some(ref source) = self.source {
            write!(f, " ({})", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(StorageErrorCode::CrmStorageReadFailed.code(), "CRM_STORAGE_READ_FAILED");
        assert_eq!(StorageErrorCode::CrmStorageWriteFailed.code(), "CRM_STORAGE_WRITE_FAILED");
        assert_eq!(StorageErrorCode::CrmStorageDecodeFailed.code(), "CRM_STORAGE_DECODE_FAILED");
        assert_eq!(StorageErrorCode::CrmStorageEncodeFailed.code(), "CRM_STORAGE_ENCODE_FAILED");
        assert_eq!(StorageErrorCode::CrmStorageLockPoisoned.code(), "CRM_STORAGE_LOCK_POISONED");
    }

    #[test]
    fn test_display_includes_source() {
        let err = StorageError::write_failed(
            "data/data.json",
            io::Error::new(io::ErrorKind::PermissionDenied, "read-only filesystem"),
        );
        let display = err.to_string();
        assert!(display.starts_with("CRM_STORAGE_WRITE_FAILED"));
        assert!(display.contains("data/data.json"));
        assert!(display.contains("read-only filesystem"));
    }

    #[test]
    fn test_source_is_exposed() {
        use std::error::Error;

        let err = StorageError::read_failed("x", io::Error::new(io::ErrorKind::Other, "boom"));
        assert!(err.source().is_some());
        assert!(StorageError::lock_poisoned().source().is_none());
    }
}
