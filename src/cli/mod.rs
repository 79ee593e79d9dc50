//! CLI module for OpenCRM
//!
//! Provides command-line interface for:
//! - serve: Start the HTTP API
//! - init: Write the sample dataset

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
