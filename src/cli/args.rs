//! CLI argument definitions using clap
//!
//! Commands:
//! - studentdb init --config <path>
//! - studentdb serve --config <path> [--port <port>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// studentdb - A validated student record store served over HTTP
#[derive(Parser, Debug)]
#[command(name = "studentdb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an empty data file
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./studentdb.json")]
        config: PathBuf,
    },

    /// Serve the HTTP API
    Serve {
        /// Path to configuration file (defaults apply if it does not exist)
        #[arg(long, default_value = "./studentdb.json")]
        config: PathBuf,

        /// Port to bind, overriding the configuration file
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
