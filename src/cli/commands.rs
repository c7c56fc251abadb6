//! CLI command implementations

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::directory::DirectoryEngine;
use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability::{init_tracing, LogFormat};

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Log output format (default "text")
    #[serde(default)]
    pub log_format: LogFormat,

    /// Default filter directive when RUST_LOG is unset (default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// HTTP listener settings
    #[serde(default)]
    pub http: HttpServerConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            http: HttpServerConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;

        Ok(config)
    }

    /// Load from `path` when given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Apply command-line overrides, then re-validate
    pub fn with_overrides(mut self, host: Option<String>, port: Option<u16>) -> CliResult<Self> {
        if let Some(host) = host {
            self.http.host = host;
        }
        if let Some(port) = port {
            self.http.port = port;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> CliResult<()> {
        if self.http.host.trim().is_empty() {
            return Err(CliError::config_error("http.host must not be empty"));
        }

        if self.http.port == 0 {
            return Err(CliError::config_error("http.port must be > 0"));
        }

        if self.http.service_name.trim().is_empty() {
            return Err(CliError::config_error("http.service_name must not be empty"));
        }

        EnvFilter::try_new(&self.log_level).map_err(|e| {
            CliError::config_error(format!("Invalid log_level '{}': {}", self.log_level, e))
        })?;

        Ok(())
    }
}

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, host, port } => serve(config.as_deref(), host, port),
    }
}

/// Start the HTTP server and block until shutdown
pub fn serve(config_path: Option<&Path>, host: Option<String>, port: Option<u16>) -> CliResult<()> {
    let config = Config::load_or_default(config_path)?.with_overrides(host, port)?;

    init_tracing(config.log_format, &config.log_level);
    let engine = Arc::new(DirectoryEngine::new());
    info!(
        records = engine.len().unwrap_or_default(),
        "directory loaded with seed data"
    );

    let server = HttpServer::with_engine(config.http, engine);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}
