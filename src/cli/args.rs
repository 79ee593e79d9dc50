//! CLI argument definitions using clap
//!
//! Commands:
//! - opencrm serve [--config <path>] [--host <host>] [--port <port>] [--data-file <path>]
//! - opencrm init [--config <path>] [--data-file <path>] [--force]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// OpenCRM - JSON-backed CRM API server
#[derive(Parser, Debug)]
#[command(name = "opencrm")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP API
    Serve {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long)]
        port: Option<u16>,

        /// Dataset file
        #[arg(long)]
        data_file: Option<PathBuf>,
    },

    /// Write the sample dataset to the data file
    Init {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Dataset file
        #[arg(long)]
        data_file: Option<PathBuf>,

        /// Overwrite an existing dataset
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
