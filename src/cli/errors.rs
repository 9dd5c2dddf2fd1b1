//! CLI-specific error types
//!
//! All CLI errors end the process with a non-zero exit code.

use thiserror::Error;

use crate::config::ConfigError;

/// Result type for CLI commands
pub type CliResult<T> = Result<T, CliError>;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    /// Environment could not be turned into a configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Runtime or listener could not be started
    #[error("Boot failed: {0}")]
    BootFailed(String),

    /// Output could not be written
    #[error("I/O error: {0}")]
    Io(String),
}

impl CliError {
    /// Boot failed
    pub fn boot_failed(msg: impl Into<String>) -> Self {
        CliError::BootFailed(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boot_failed_display() {
        let err = CliError::boot_failed("address in use");
        assert_eq!(err.to_string(), "Boot failed: address in use");
    }
}
