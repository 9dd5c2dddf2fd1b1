//! CLI argument definitions using clap
//!
//! Commands:
//! - weebtours serve [--host <host>] [--port <port>] [--json-logs]
//! - weebtours check

use clap::{Parser, Subcommand};

/// WeebTours - booking and content API
#[derive(Parser, Debug)]
#[command(name = "weebtours")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Host to bind to (overrides HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides PORT)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Connect to the configured store and print the diagnostic report
    Check,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
