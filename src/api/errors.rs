//! # CRM API Errors
//!
//! Every failure is detected at one point and turned into a terminal
//! `{"error": "<message>"}` response there. Nothing is retried.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::storage::StorageError;

use super::response::fail;

/// Result type for CRM operations
pub type CrmResult<T> = Result<T, CrmError>;

/// CRM API errors
#[derive(Debug, Error)]
pub enum CrmError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Unknown resource, missing record or unknown path
    #[error("{0}")]
    NotFound(String),

    /// Create payload lacks required fields or carries a non-scalar value
    #[error("{0}")]
    BadRequest(String),

    /// Unsupported method and id combination
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Login rejected
    #[error("Invalid credentials")]
    Unauthorized,

    // ==================
    // Server Errors (5xx)
    // ==================
    /// The dataset could not be read or written
    #[error("Storage unavailable")]
    StorageUnavailable(#[from] StorageError),
}

impl CrmError {
    /// Resource name not present in the schema registry
    pub fn unknown_resource() -> Self {
        CrmError::NotFound("Unknown resource".to_string())
    }

    /// No record with the requested id
    pub fn record_not_found() -> Self {
        CrmError::NotFound("Record not found".to_string())
    }

    /// Path outside the API surface
    pub fn route_not_found() -> Self {
        CrmError::NotFound("Not found".to_string())
    }

    /// Required fields absent from a create payload
    pub fn missing_fields(fields: &[&str]) -> Self {
        CrmError::BadRequest(format!("Missing required fields: {}", fields.join(", ")))
    }

    /// A declared field was sent as an array or object
    pub fn non_scalar_field(field: &str) -> Self {
        CrmError::BadRequest(format!("Field '{}' must be a scalar value", field))
    }

    /// The largest id of a collection is already `i64::MAX`
    pub fn id_space_exhausted() -> Self {
        CrmError::BadRequest("Identifier space exhausted".to_string())
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            CrmError::NotFound(_) => StatusCode::NOT_FOUND,
            CrmError::BadRequest(_) => StatusCode::BAD_REQUEST,
            CrmError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            CrmError::Unauthorized => StatusCode::UNAUTHORIZED,
            CrmError::StorageUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CrmError {
    fn into_response(self) -> Response {
        if let CrmError::StorageUnavailable(ref source) = self {
            tracing::error!(error = %source, code = source.code().code(), "storage failure");
        }
        fail(&self.to_string(), self.status_code())
    }
}
