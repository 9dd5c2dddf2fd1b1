//! Document access layer
//!
//! A schema-flexible store of JSON documents grouped into named collections.
//! Handlers talk to it through [`Database`], which owns the single store
//! handle of the process, or through a typed [`Collection`].
//!
//! # Backends
//!
//! - `memory://` - process-local [`MemoryStore`]
//! - `file:///<dir>` - append-only, checksummed [`FileStore`]
//!
//! # Invariants
//!
//! - Every document carries a store-assigned `_id` distinct from user fields
//! - Reads return documents in insertion order
//! - A record that fails its checksum is never returned

mod checksum;
mod collection;
mod database;
mod errors;
mod file;
mod filter;
mod memory;
mod reader;
mod record;
mod writer;

pub use checksum::compute_checksum;
pub use collection::{Collection, Entity, Stored};
pub use database::Database;
pub use errors::{StoreError, StoreResult};
pub use file::{FileStore, LOG_FILE_NAME};
pub use filter::Filter;
pub use memory::MemoryStore;
pub use reader::LogReader;
pub use record::LogRecord;
pub use writer::LogWriter;

/// A stored document: a JSON object
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Key of the store-assigned identifier inside a document
pub const ID_FIELD: &str = "_id";
/// Key of the creation timestamp stamped by the store
pub const CREATED_AT_FIELD: &str = "created_at";
/// Key of the last-update timestamp stamped by the store
pub const UPDATED_AT_FIELD: &str = "updated_at";

/// A backend holding collections of documents.
///
/// Implementations synchronize internally; one instance is shared by every
/// request handler.
pub trait DocumentStore: Send + Sync {
    /// Database name this store serves
    fn name(&self) -> &str;

    /// Append a fully stamped document to `collection`
    fn insert(&self, collection: &str, document: Document) -> StoreResult<()>;

    /// Up to `limit` documents matching `filter`, in insertion order
    fn find(
        &self,
        collection: &str,
        filter: &Filter,
        limit: Option<usize>,
    ) -> StoreResult<Vec<Document>>;

    /// Sorted names of collections holding at least one document
    fn list_collection_names(&self) -> StoreResult<Vec<String>>;
}
