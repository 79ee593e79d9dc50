//! # CRM Auth Module
//!
//! Illustrative login only: one shared plaintext password and an unsigned
//! token. Nothing downstream checks the token.

pub mod api;
pub mod token;

pub use api::{LoginRequest, LoginResponse, LoginService, DEFAULT_PASSWORD};
pub use token::issue_token;
