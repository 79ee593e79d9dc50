//! Auth HTTP Routes
//!
//! `/api/auth/login` accepts any method and reads credentials from the body.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::Response,
    routing::any,
    Router,
};

use crate::api::{respond, CrmResult};
use crate::auth::{LoginRequest, LoginService};
use crate::crud::parse_payload;
use crate::storage::StorageAccessor;

/// Shared auth state
#[derive(Debug)]
pub struct AuthState {
    pub service: LoginService,
}

impl AuthState {
    pub fn new(storage: StorageAccessor, default_password: impl Into<String>) -> Self {
        Self {
            service: LoginService::new(storage, default_password),
        }
    }
}

/// Auth routes with shared state
pub fn auth_routes(state: Arc<AuthState>) -> Router {
    Router::new()
        .route("/api/auth/login", any(login_handler))
        .route("/api/auth/login/", any(login_handler))
        .with_state(state)
}

async fn login_handler(State(state): State<Arc<AuthState>>, body: Bytes) -> CrmResult<Response> {
    let request = LoginRequest::from_payload(&parse_payload(&body));
    let response = state.service.login(&request)?;
    Ok(respond(&response, StatusCode::OK))
}
