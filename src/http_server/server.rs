//! # HTTP Server
//!
//! Combines the resource, auth and health routers into one Axum app with a
//! JSON 404 fallback, CORS and request tracing.

use std::sync::Arc;

use axum::http::Method;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::CrmError;
use crate::storage::StorageAccessor;

use super::auth_routes::{auth_routes, AuthState};
use super::config::ServerConfig;
use super::health_routes::health_routes;
use super::resource_routes::{resource_routes, ResourceState};

/// HTTP server for the CRM API
pub struct CrmServer {
    config: ServerConfig,
    storage: StorageAccessor,
    router: Router,
}

impl CrmServer {
    /// Create a server over the storage the config selects
    pub fn with_config(config: ServerConfig) -> Self {
        let storage = config.storage_accessor();
        Self::with_storage(config, storage)
    }

    /// Create a server over an explicit storage accessor
    pub fn with_storage(config: ServerConfig, storage: StorageAccessor) -> Self {
        let router = Self::build_router(&config, storage.clone());
        Self {
            config,
            storage,
            router,
        }
    }

    fn build_router(config: &ServerConfig, storage: StorageAccessor) -> Router {
        let auth_state = Arc::new(AuthState::new(
            storage.clone(),
            config.default_password.clone(),
        ));
        let resource_state = Arc::new(ResourceState::new(storage));

        let methods = [
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ];

        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(methods.clone())
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(methods)
                .allow_headers(Any)
        };

        Router::new()
            .merge(health_routes())
            .merge(auth_routes(auth_state))
            .merge(resource_routes(resource_state))
            .fallback(|| async { CrmError::route_not_found() })
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    pub fn storage(&self) -> &StorageAccessor {
        &self.storage
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process is stopped
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr = self.config.socket_addr();
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!(
            addr = %listener.local_addr()?,
            storage = %self.storage.location(),
            "CRM API listening"
        );

        axum::serve(listener, self.router).await
    }
}
