//! OpenCRM CLI entry point
//!
//! Delegates everything to `cli::run`, prints errors to stderr and exits
//! with a non-zero status on failure.

use opencrm::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
