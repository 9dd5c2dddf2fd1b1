//! # Diagnostics
//!
//! Builds the connectivity report served at `/test` and printed by
//! `weebtours check`. Building a report never fails: store problems are
//! captured in an explicit [`StoreProbe`] and rendered as status strings.

use serde::Serialize;

use crate::config::StoreConfig;
use crate::storage::Database;

/// Collections listed in the report at most
pub const MAX_LISTED_COLLECTIONS: usize = 10;

/// Characters of a store error kept in the `database` status line
const ERROR_EXCERPT_CHARS: usize = 50;

/// Outcome of probing the store handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreProbe {
    /// No handle was constructed at start-up
    Uninitialized,
    /// The store answered; holds its non-empty collections
    Working {
        database: String,
        collections: Vec<String>,
    },
    /// A handle exists but the store call failed
    Failing { database: String, error: String },
}

impl StoreProbe {
    /// Probe the store with a collection listing
    pub fn run(db: &Database) -> Self {
        let Some(database) = db.name().map(String::from) else {
            return StoreProbe::Uninitialized;
        };

        match db.list_collection_names() {
            Ok(collections) => StoreProbe::Working {
                database,
                collections,
            },
            Err(e) => StoreProbe::Failing {
                database,
                error: e.to_string(),
            },
        }
    }

    /// Collapse into the `{available, detail}` summary
    pub fn status(&self) -> StoreStatus {
        match self {
            StoreProbe::Uninitialized => StoreStatus {
                available: false,
                detail: "store handle not initialized".to_string(),
            },
            StoreProbe::Working {
                database,
                collections,
            } => StoreStatus {
                available: true,
                detail: format!(
                    "connected to '{}' ({} collections)",
                    database,
                    collections.len()
                ),
            },
            StoreProbe::Failing { database, error } => StoreStatus {
                available: false,
                detail: format!("'{}': {}", database, error),
            },
        }
    }
}

/// Whether the store can serve requests, and why
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreStatus {
    pub available: bool,
    pub detail: String,
}

/// Body of `GET /test`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticReport {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
    pub store: StoreStatus,
}

impl DiagnosticReport {
    /// Probe `db` and describe the configured settings
    pub fn build(db: &Database, settings: &StoreConfig) -> Self {
        Self::from_probe(&StoreProbe::run(db), settings)
    }

    /// Render an existing probe result
    pub fn from_probe(probe: &StoreProbe, settings: &StoreConfig) -> Self {
        let (database, connection_status, collections) = match probe {
            StoreProbe::Uninitialized => (
                "⚠️  Available but not initialized".to_string(),
                "Not Connected",
                Vec::new(),
            ),
            StoreProbe::Working { collections, .. } => (
                "✅ Connected & Working".to_string(),
                "Connected",
                collections
                    .iter()
                    .take(MAX_LISTED_COLLECTIONS)
                    .cloned()
                    .collect(),
            ),
            StoreProbe::Failing { error, .. } => (
                format!("⚠️  Connected but Error: {}", excerpt(error)),
                "Connected",
                Vec::new(),
            ),
        };

        Self {
            backend: "✅ Running".to_string(),
            database,
            database_url: set_marker(settings.url.is_some()),
            database_name: set_marker(settings.name.is_some()),
            connection_status: connection_status.to_string(),
            collections,
            store: probe.status(),
        }
    }
}

fn set_marker(present: bool) -> String {
    let marker = if present { "✅ Set" } else { "❌ Not Set" };
    marker.to_string()
}

fn excerpt(message: &str) -> String {
    message.chars().take(ERROR_EXCERPT_CHARS).collect()
}
