//! # Database handle
//!
//! [`Database`] is the single store handle of the process. It is constructed
//! once from configuration and cloned into the HTTP state. When the store
//! cannot be constructed the handle is left unset, and every operation
//! reports [`StoreError::Unavailable`] instead of failing at start-up.

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;
use uuid::Uuid;

use super::collection::{Collection, Entity};
use super::errors::{StoreError, StoreResult};
use super::file::FileStore;
use super::filter::Filter;
use super::memory::MemoryStore;
use super::{Document, DocumentStore, CREATED_AT_FIELD, ID_FIELD, UPDATED_AT_FIELD};

/// Shared, possibly-unset handle to the document store
#[derive(Clone, Default)]
pub struct Database {
    store: Option<Arc<dyn DocumentStore>>,
}

impl Database {
    /// Handle with no store behind it
    pub fn unavailable() -> Self {
        Self { store: None }
    }

    /// Wrap an already constructed store
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store: Some(store) }
    }

    /// Connect to the store named by `url`.
    ///
    /// Supported schemes: `memory://` and `file:///<dir>`.
    pub fn connect(url: &str, database: &str) -> StoreResult<Self> {
        validate_database_name(database)?;

        let parsed = Url::parse(url)
            .map_err(|e| StoreError::Connection(format!("Invalid store URL '{}': {}", url, e)))?;

        let store: Arc<dyn DocumentStore> = match parsed.scheme() {
            "memory" => Arc::new(MemoryStore::new(database)),
            "file" => {
                let root = parsed.to_file_path().map_err(|_| {
                    StoreError::Connection(format!("Store URL '{}' is not a local path", url))
                })?;
                Arc::new(FileStore::open(&root, database)?)
            }
            other => return Err(StoreError::UnsupportedScheme(other.to_string())),
        };

        info!(scheme = parsed.scheme(), database, "Connected to document store");
        Ok(Self::new(store))
    }

    /// Build the handle from optional settings, leaving it unset on failure.
    pub fn from_settings(url: Option<&str>, database: Option<&str>) -> Self {
        let (Some(url), Some(database)) = (url, database) else {
            warn!("DATABASE_URL or DATABASE_NAME not set, running without a database");
            return Self::unavailable();
        };

        match Self::connect(url, database) {
            Ok(db) => db,
            Err(e) => {
                warn!(error = %e, "Database initialization failed, running without a database");
                Self::unavailable()
            }
        }
    }

    /// Whether a store handle was constructed
    pub fn is_available(&self) -> bool {
        self.store.is_some()
    }

    /// Name of the connected database
    pub fn name(&self) -> Option<&str> {
        self.store.as_deref().map(|store| store.name())
    }

    fn store(&self) -> StoreResult<&dyn DocumentStore> {
        self.store.as_deref().ok_or(StoreError::Unavailable)
    }

    /// Insert `record` into `collection` and return its new identifier.
    ///
    /// The store stamps `_id`, `created_at` and `updated_at`, replacing any
    /// caller-supplied values for those keys.
    pub fn create_document(&self, collection: &str, record: Value) -> StoreResult<String> {
        let store = self.store()?;

        let Value::Object(mut document) = record else {
            return Err(StoreError::InvalidDocument(
                "record must be a JSON object".to_string(),
            ));
        };

        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        document.insert(ID_FIELD.to_string(), Value::String(id.clone()));
        document.insert(CREATED_AT_FIELD.to_string(), Value::String(now.clone()));
        document.insert(UPDATED_AT_FIELD.to_string(), Value::String(now));

        store.insert(collection, document)?;
        debug!(collection, id = %id, "Created document");

        Ok(id)
    }

    /// Up to `limit` documents of `collection` matching `filter`, in
    /// insertion order. `None` returns every match.
    pub fn get_documents(
        &self,
        collection: &str,
        filter: &Filter,
        limit: Option<usize>,
    ) -> StoreResult<Vec<Document>> {
        self.store()?.find(collection, filter, limit)
    }

    /// Names of the non-empty collections
    pub fn list_collection_names(&self) -> StoreResult<Vec<String>> {
        self.store()?.list_collection_names()
    }

    /// Typed view of the collection that stores `T`
    pub fn collection<T: Entity>(&self) -> Collection<'_, T> {
        Collection::new(self)
    }
}

fn validate_database_name(database: &str) -> StoreResult<()> {
    if database.is_empty()
        || database == "."
        || database == ".."
        || database.contains(['/', '\\'])
    {
        return Err(StoreError::Connection(format!(
            "Invalid database name '{}'",
            database
        )));
    }
    Ok(())
}
