//! CLI module for studentdb
//!
//! Provides command-line interface for:
//! - init: Create an empty data file
//! - serve: Serve the HTTP API

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, run, run_command, serve, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
