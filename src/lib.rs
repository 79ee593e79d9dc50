//! opencrm - JSON-backed CRM API
//!
//! Generic CRUD over a fixed set of CRM resources, persisted as one JSON
//! document, plus an illustrative login.

pub mod api;
pub mod auth;
pub mod cli;
pub mod crud;
pub mod http_server;
pub mod schema;
pub mod storage;
