//! HTTP Server Configuration
//!
//! Sources, lowest to highest precedence: built-in defaults, an optional JSON
//! config file, environment variables, then command-line flags (applied by
//! the CLI).
//!
//! Environment variables:
//! - `CRM_HOST`
//! - `CRM_PORT` (falls back to `PORT`)
//! - `CRM_DATA_FILE`
//! - `CRM_STORAGE` (`file` or `memory`)
//! - `CRM_DEFAULT_PASSWORD`
//! - `CRM_CORS_ORIGINS` (comma-separated)

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::DEFAULT_PASSWORD;
use crate::storage::{JsonFileStore, MemoryStore, StorageAccessor};

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid value for {key}: '{value}'")]
    InvalidEnv { key: &'static str, value: String },
}

/// Backing medium for the dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// One JSON file at `data_file`
    File,
    /// Process memory; lost on exit
    Memory,
}

impl FromStr for StorageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(StorageKind::File),
            "memory" => Ok(StorageKind::Memory),
            other => Err(other.to_string()),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 3001)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Dataset file used by the file store (default: "data/data.json")
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Dataset medium (default: file)
    #[serde(default = "default_storage")]
    pub storage: StorageKind,

    /// Shared login password (default: "password")
    #[serde(default = "default_password")]
    pub default_password: String,

    /// CORS allowed origins; empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_data_file() -> PathBuf {
    PathBuf::from("data").join("data.json")
}

fn default_storage() -> StorageKind {
    StorageKind::File
}

fn default_password() -> String {
    DEFAULT_PASSWORD.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_file: default_data_file(),
            storage: default_storage(),
            default_password: default_password(),
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Load a JSON config file; absent keys take their defaults
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Defaults, then the optional file, then the process environment
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Override fields from environment-style lookups
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("CRM_HOST") {
            self.host = host;
        }

        let port_var = lookup("CRM_PORT")
            .map(|v| ("CRM_PORT", v))
            .or_else(|| lookup("PORT").map(|v| ("PORT", v)));
        if let Some((key, value)) = port_var {
            self.port = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidEnv { key, value })?;
        }

        if let Some(data_file) = lookup("CRM_DATA_FILE") {
            self.data_file = PathBuf::from(data_file);
        }

        if let Some(value) = lookup("CRM_STORAGE") {
            self.storage = value.parse().map_err(|_| ConfigError::InvalidEnv {
                key: "CRM_STORAGE",
                value,
            })?;
        }

        if let Some(password) = lookup("CRM_DEFAULT_PASSWORD") {
            self.default_password = password;
        }

        if let Some(origins) = lookup("CRM_CORS_ORIGINS") {
            self.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }

        Ok(())
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Storage accessor over the configured medium
    pub fn storage_accessor(&self) -> StorageAccessor {
        match self.storage {
            StorageKind::File => StorageAccessor::new(Arc::new(JsonFileStore::new(&self.data_file))),
            StorageKind::Memory => StorageAccessor::new(Arc::new(MemoryStore::new())),
        }
    }
}
