//! CLI module for userdir
//!
//! Provides command-line interface for:
//! - serve: Load configuration, install logging and run the HTTP server

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{run, run_command, serve, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
