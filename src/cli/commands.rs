//! CLI command implementations

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::http_server::{CrmServer, ServerConfig};
use crate::storage::{JsonFileStore, StorageAccessor};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    // .env is optional
    let _ = dotenvy::dotenv();
    init_logging();

    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve {
            config,
            host,
            port,
            data_file,
        } => {
            let mut config = ServerConfig::load(config.as_deref())?;
            apply_overrides(&mut config, host, port, data_file);
            serve(config)
        }
        Command::Init {
            config,
            data_file,
            force,
        } => {
            let mut config = ServerConfig::load(config.as_deref())?;
            apply_overrides(&mut config, None, None, data_file);
            init(&config.data_file, force)
        }
    }
}

fn apply_overrides(
    config: &mut ServerConfig,
    host: Option<String>,
    port: Option<u16>,
    data_file: Option<PathBuf>,
) {
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(data_file) = data_file {
        config.data_file = data_file;
    }
}

/// Write the seed dataset to `data_file`.
///
/// Refuses to replace an existing document unless `force` is set.
pub fn init(data_file: &Path, force: bool) -> CliResult<()> {
    let accessor = StorageAccessor::new(Arc::new(JsonFileStore::new(data_file)));

    if !accessor.initialize(force)? {
        return Err(CliError::already_initialized(&accessor.location()));
    }

    tracing::info!(location = %accessor.location(), force, "dataset initialized");
    Ok(())
}

/// Start the HTTP API and block until it stops
pub fn serve(config: ServerConfig) -> CliResult<()> {
    let server = CrmServer::with_config(config);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Install the stderr subscriber; `RUST_LOG` overrides the `info` default
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_seed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("data.json");

        init(&path, false).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("deal-statuses"));
        assert!(text.contains("Иван Иванов"));
    }

    #[test]
    fn test_init_refuses_existing_without_force() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("data.json");
        std::fs::write(&path, "{}").unwrap();

        let err = init(&path, false).unwrap_err();
        assert_eq!(err.code_str(), "CRM_CLI_ALREADY_INITIALIZED");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");

        init(&path, true).unwrap();
        assert_ne!(std::fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_flag_overrides_win() {
        let mut config = ServerConfig::default();
        apply_overrides(
            &mut config,
            Some("127.0.0.1".to_string()),
            Some(9999),
            Some(PathBuf::from("crm.json")),
        );
        assert_eq!(config.socket_addr(), "127.0.0.1:9999");
        assert_eq!(config.data_file, PathBuf::from("crm.json"));
    }
}
