//! # Login Service
//!
//! Matches an email against the `users` collection (ASCII case-insensitive,
//! first match wins) and checks the password against one shared default.

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

use crate::api::{CrmError, CrmResult};
use crate::crud::Payload;
use crate::storage::{Record, StorageAccessor};

use super::token::issue_token;

/// Resource holding login candidates
pub const USERS_RESOURCE: &str = "users";

/// Password accepted when none is configured
pub const DEFAULT_PASSWORD: &str = "password";

/// Credentials extracted from a login payload
#[derive(Debug, Clone, PartialEq)]
pub struct LoginRequest {
    pub email: String,
    /// `None` when the payload's password is missing or not a string
    pub password: Option<String>,
}

impl LoginRequest {
    /// Read credentials from a free-form payload.
    ///
    /// A missing email reads as empty; numeric emails read as their text.
    pub fn from_payload(payload: &Payload) -> Self {
        let email = match payload.get("email") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(true)) => "1".to_string(),
            _ => String::new(),
        };
        let password = match payload.get("password") {
            Some(Value::String(s)) => Some(s.clone()),
            _ => None,
        };
        Self { email, password }
    }
}

/// Successful login
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: Record,
}

/// Login against the stored users
#[derive(Debug, Clone)]
pub struct LoginService {
    storage: StorageAccessor,
    default_password: String,
}

impl LoginService {
    pub fn new(storage: StorageAccessor, default_password: impl Into<String>) -> Self {
        Self {
            storage,
            default_password: default_password.into(),
        }
    }

    /// Authenticate and issue a token stamped with the current time
    pub fn login(&self, request: &LoginRequest) -> CrmResult<LoginResponse> {
        self.login_at(request, Utc::now().timestamp())
    }

    /// Authenticate and issue a token stamped with `issued_at`
    pub fn login_at(&self, request: &LoginRequest, issued_at: i64) -> CrmResult<LoginResponse> {
        let dataset = self.storage.load()?;
        let user = dataset
            .collection(USERS_RESOURCE)
            .iter()
            .find(|candidate| email_matches(candidate, &request.email))
            .cloned();

        let password_ok = request.password.as_deref() == Some(self.default_password.as_str());

        let user = match user {
            Some(user) if password_ok => user,
            _ => {
                tracing::warn!(email = %request.email, "login rejected");
                return Err(CrmError::Unauthorized);
            }
        };

        let stored_email = user
            .get("email")
            .map(|email| email.as_text().into_owned())
            .unwrap_or_default();

        tracing::info!(email = %stored_email, "login accepted");
        Ok(LoginResponse {
            token: issue_token(&stored_email, issued_at),
            user,
        })
    }
}

fn email_matches(candidate: &Record, email: &str) -> bool {
    candidate
        .get("email")
        .map(|stored| stored.as_text().eq_ignore_ascii_case(email))
        .unwrap_or(false)
}
