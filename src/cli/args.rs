//! CLI argument definitions using clap
//!
//! Commands:
//! - userdir serve [--config <path>] [--host <host>] [--port <port>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// userdir - An in-memory user directory service
#[derive(Parser, Debug)]
#[command(name = "userdir")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP API server
    Serve {
        /// Path to a JSON configuration file (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the bind host
        #[arg(long)]
        host: Option<String>,

        /// Override the bind port
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
