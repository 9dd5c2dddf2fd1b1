//! Process configuration
//!
//! Read once from the environment at start-up:
//!
//! | Variable        | Default   |
//! |-----------------|-----------|
//! | `DATABASE_URL`  | unset     |
//! | `DATABASE_NAME` | unset     |
//! | `HOST`          | `0.0.0.0` |
//! | `PORT`          | `8000`    |
//! | `CORS_ORIGINS`  | empty     |
//!
//! Store settings are optional: their absence is reported by the diagnostics
//! endpoint, not enforced here.

use std::env;
use std::num::ParseIntError;

use thiserror::Error;
use tracing::info;

use crate::http_server::HttpServerConfig;

pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
pub const DATABASE_NAME_VAR: &str = "DATABASE_NAME";
pub const HOST_VAR: &str = "HOST";
pub const PORT_VAR: &str = "PORT";
pub const CORS_ORIGINS_VAR: &str = "CORS_ORIGINS";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid PORT value '{value}': {source}")]
    InvalidPort {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

/// Document store settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreConfig {
    /// Store URL, e.g. `memory://` or `file:///var/lib/weebtours`
    pub url: Option<String>,
    /// Database name within the store
    pub name: Option<String>,
}

/// Complete process configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    pub http: HttpServerConfig,
    pub store: StoreConfig,
}

impl AppConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut http = HttpServerConfig::default();

        if let Some(host) = var(HOST_VAR) {
            http.host = host;
        }

        if let Some(port) = var(PORT_VAR) {
            http.port = port
                .trim()
                .parse()
                .map_err(|source| ConfigError::InvalidPort {
                    value: port.clone(),
                    source,
                })?;
        } else {
            info!("{PORT_VAR} not set, using default: {}", http.port);
        }

        if let Some(origins) = var(CORS_ORIGINS_VAR) {
            http.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }

        let store = StoreConfig {
            url: var(DATABASE_URL_VAR),
            name: var(DATABASE_NAME_VAR),
        };

        Ok(Self { http, store })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.http, HttpServerConfig::default());
        assert_eq!(config.store, StoreConfig::default());
    }

    #[test]
    fn test_reads_all_variables() {
        let config = load(&[
            ("DATABASE_URL", "memory://"),
            ("DATABASE_NAME", "weebtours"),
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("CORS_ORIGINS", "http://localhost:5173, https://weebtours.com"),
        ])
        .unwrap();

        assert_eq!(config.store.url.as_deref(), Some("memory://"));
        assert_eq!(config.store.name.as_deref(), Some("weebtours"));
        assert_eq!(config.http.socket_addr(), "127.0.0.1:9000");
        assert_eq!(
            config.http.cors_origins,
            vec!["http://localhost:5173", "https://weebtours.com"]
        );
    }

    #[test]
    fn test_blank_values_count_as_unset() {
        let config = load(&[("DATABASE_URL", "  "), ("PORT", "")]).unwrap();
        assert_eq!(config.store.url, None);
        assert_eq!(config.http.port, 8000);
    }

    #[test]
    fn test_invalid_port_is_error() {
        let err = load(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("eighty"));
    }
}
