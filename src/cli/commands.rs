//! CLI command implementations

use std::io::{self, Write};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::logging::init_logging;
use crate::config::AppConfig;
use crate::diagnostics::DiagnosticReport;
use crate::http_server::{AppState, HttpServer};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    init_logging(cli.json_logs);

    let config = AppConfig::from_env()?;
    run_command(cli.command, config)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command, config: AppConfig) -> CliResult<()> {
    match cmd {
        Command::Serve { host, port } => serve(apply_overrides(config, host, port)),
        Command::Check => check(&config, &mut io::stdout()),
    }
}

/// CLI flags take precedence over the environment
fn apply_overrides(mut config: AppConfig, host: Option<String>, port: Option<u16>) -> AppConfig {
    if let Some(host) = host {
        config.http.host = host;
    }
    if let Some(port) = port {
        config.http.port = port;
    }
    config
}

/// Start the HTTP server and block until it shuts down
pub fn serve(config: AppConfig) -> CliResult<()> {
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        let state = AppState::from_settings(config.store);
        let server = HttpServer::new(config.http, state);

        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Print the diagnostic report for the configured store
pub fn check<W: Write>(config: &AppConfig, out: &mut W) -> CliResult<()> {
    let state = AppState::from_settings(config.store.clone());
    let report = DiagnosticReport::build(&state.database, &state.store_settings);

    let json = serde_json::to_string_pretty(&report).map_err(|e| CliError::Io(e.to_string()))?;
    writeln!(out, "{}", json).map_err(|e| CliError::Io(e.to_string()))
}
