//! Resource HTTP Routes
//!
//! Generic CRUD endpoints for every registered resource. Any method reaches
//! the handlers; the dispatcher decides between an operation and 405. A
//! trailing slash is ignored, and `/api` alone names no resource.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::Method,
    routing::any,
    Router,
};

use crate::api::{CrmError, CrmResult, Reply};
use crate::crud::CrudDispatcher;
use crate::storage::StorageAccessor;

// ==================
// Shared State
// ==================

/// Resource state shared across handlers
#[derive(Debug)]
pub struct ResourceState {
    pub dispatcher: CrudDispatcher,
}

impl ResourceState {
    pub fn new(storage: StorageAccessor) -> Self {
        Self {
            dispatcher: CrudDispatcher::with_builtin_schemas(storage),
        }
    }
}

/// Resource routes with shared state
pub fn resource_routes(state: Arc<ResourceState>) -> Router {
    Router::new()
        .route("/api", any(root_handler))
        .route("/api/", any(root_handler))
        .route("/api/:resource", any(collection_handler))
        .route("/api/:resource/", any(collection_handler))
        .route("/api/:resource/:id", any(record_handler))
        .route("/api/:resource/:id/", any(record_handler))
        .with_state(state)
}

// ==================
// Handlers
// ==================

async fn root_handler() -> CrmError {
    CrmError::unknown_resource()
}

async fn collection_handler(
    State(state): State<Arc<ResourceState>>,
    method: Method,
    Path(resource): Path<String>,
    body: Bytes,
) -> CrmResult<Reply> {
    state.dispatcher.dispatch(&method, &resource, None, &body)
}

async fn record_handler(
    State(state): State<Arc<ResourceState>>,
    method: Method,
    Path((resource, id)): Path<(String, String)>,
    body: Bytes,
) -> CrmResult<Reply> {
    state.dispatcher.dispatch(&method, &resource, Some(&id), &body)
}
