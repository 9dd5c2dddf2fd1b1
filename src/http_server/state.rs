//! Shared handler state

use std::sync::Arc;

use crate::config::StoreConfig;
use crate::storage::Database;

/// State shared across handlers
pub struct AppState {
    /// Store handle, possibly unset
    pub database: Database,
    /// Settings the handle was built from, reported by diagnostics
    pub store_settings: StoreConfig,
}

impl AppState {
    pub fn new(database: Database, store_settings: StoreConfig) -> Arc<Self> {
        Arc::new(Self {
            database,
            store_settings,
        })
    }

    /// Build the store handle from settings; failures leave it unset
    pub fn from_settings(store_settings: StoreConfig) -> Arc<Self> {
        let database =
            Database::from_settings(store_settings.url.as_deref(), store_settings.name.as_deref());
        Self::new(database, store_settings)
    }
}
