//! CLI module for WeebTours
//!
//! Provides command-line interface for:
//! - serve: start the HTTP API
//! - check: print store diagnostics and exit

mod args;
mod commands;
mod errors;
mod logging;

pub use args::{Cli, Command};
pub use commands::{check, run, run_command, serve};
pub use errors::{CliError, CliResult};
pub use logging::init_logging;
