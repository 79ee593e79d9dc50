//! Response emitter
//!
//! All bodies are pretty-printed JSON with `Content-Type:
//! application/json; charset=utf-8`. Non-ASCII text is written as-is.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::Value;

/// Content type of every API response
pub const JSON_UTF8: &str = "application/json; charset=utf-8";

const SERIALIZATION_FAILURE_BODY: &str = "{\n    \"error\": \"Internal error\"\n}";

/// Error body
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody<'a> {
    pub error: &'a str,
}

/// `{"status": "..."}` body used by health and delete
#[derive(Debug, Clone, Serialize)]
pub struct StatusBody {
    pub status: &'static str,
}

impl StatusBody {
    pub fn ok() -> Self {
        Self { status: "ok" }
    }

    pub fn deleted() -> Self {
        Self { status: "deleted" }
    }
}

impl From<StatusBody> for Value {
    fn from(body: StatusBody) -> Self {
        let mut map = serde_json::Map::new();
        map.insert("status".to_string(), Value::String(body.status.to_string()));
        Value::Object(map)
    }
}

/// Serialize `payload` and end the exchange with `status`
pub fn respond<T: Serialize + ?Sized>(payload: &T, status: StatusCode) -> Response {
    match serde_json::to_vec_pretty(payload) {
        Ok(bytes) => (status, [(header::CONTENT_TYPE, JSON_UTF8)], bytes).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize response body");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, JSON_UTF8)],
                SERIALIZATION_FAILURE_BODY,
            )
                .into_response()
        }
    }
}

/// End the exchange with `{"error": message}` and `status`
pub fn fail(message: &str, status: StatusCode) -> Response {
    respond(&ErrorBody { error: message }, status)
}

/// A successful outcome of a CRUD operation
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: StatusCode,
    pub body: Value,
}

impl Reply {
    /// 200 with `body`
    pub fn ok(body: impl Into<Value>) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.into(),
        }
    }

    /// 201 with `body`
    pub fn created(body: impl Into<Value>) -> Self {
        Self {
            status: StatusCode::CREATED,
            body: body.into(),
        }
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        respond(&self.body, self.status)
    }
}
