//! Health HTTP Route

use axum::{routing::any, Router};

use crate::api::{Reply, StatusBody};

/// Health check route; answers any method
pub fn health_routes() -> Router {
    Router::new()
        .route("/api/health", any(health_handler))
        .route("/api/health/", any(health_handler))
}

async fn health_handler() -> Reply {
    Reply::ok(StatusBody::ok())
}
