//! # CRM HTTP Server Module
//!
//! Axum server exposing the CRM API.
//!
//! # Endpoints
//!
//! - `/api/health` - Health check
//! - `/api/auth/login` - Login
//! - `/api/:resource` and `/api/:resource/:id` - Generic resource CRUD
//!
//! Every other path answers 404 `{"error": "Not found"}`.

pub mod auth_routes;
pub mod config;
pub mod health_routes;
pub mod resource_routes;
pub mod server;

pub use config::{ConfigError, ServerConfig, StorageKind};
pub use server::CrmServer;
