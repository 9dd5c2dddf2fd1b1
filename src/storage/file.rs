//! Durable document store
//!
//! Backs `file://` URLs. Each database is one append-only log at
//! `<root>/<database>/documents.dat`; reads are served from an in-memory
//! index rebuilt by a full, checksum-verified scan when the store is opened.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::info;

use super::errors::{StoreError, StoreResult};
use super::filter::Filter;
use super::memory::MemoryStore;
use super::reader::LogReader;
use super::record::LogRecord;
use super::writer::LogWriter;
use super::{Document, DocumentStore};

/// File name of the document log inside a database directory
pub const LOG_FILE_NAME: &str = "documents.dat";

/// Append-only, file-backed document store
pub struct FileStore {
    index: MemoryStore,
    writer: Mutex<LogWriter>,
}

impl FileStore {
    /// Opens (or creates) the named database below `root`.
    ///
    /// Fails with a corruption error if any existing record does not verify.
    pub fn open(root: &Path, database: &str) -> StoreResult<Self> {
        let path = Self::log_path(root, database);
        let index = MemoryStore::new(database);

        let mut replayed = 0usize;
        if path.exists() {
            let mut reader = LogReader::open(&path)?;
            while let Some(record) = reader.read_next()? {
                index.insert(&record.collection, record.to_document()?)?;
                replayed += 1;
            }
        }

        let writer = LogWriter::open(&path)?;
        info!(path = %path.display(), documents = replayed, "Opened document log");

        Ok(Self {
            index,
            writer: Mutex::new(writer),
        })
    }

    /// Location of the log for `database` below `root`
    pub fn log_path(root: &Path, database: &str) -> PathBuf {
        root.join(database).join(LOG_FILE_NAME)
    }
}

impl DocumentStore for FileStore {
    fn name(&self) -> &str {
        self.index.name()
    }

    fn insert(&self, collection: &str, document: Document) -> StoreResult<()> {
        let record = LogRecord::from_document(collection, &document)?;

        // Holding the writer lock across both steps keeps index order equal
        // to log order.
        let mut writer = self.writer.lock().map_err(|_| StoreError::poisoned())?;
        writer.append(&record)?;
        self.index.insert(collection, document)
    }

    fn find(
        &self,
        collection: &str,
        filter: &Filter,
        limit: Option<usize>,
    ) -> StoreResult<Vec<Document>> {
        self.index.find(collection, filter, limit)
    }

    fn list_collection_names(&self) -> StoreResult<Vec<String>> {
        self.index.list_collection_names()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_open_creates_log() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::open(temp_dir.path(), "weebtours").unwrap();

        assert_eq!(store.name(), "weebtours");
        assert!(FileStore::log_path(temp_dir.path(), "weebtours").exists());
        assert!(store.list_collection_names().unwrap().is_empty());
    }

    #[test]
    fn test_insert_without_id_is_rejected_before_write() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::open(temp_dir.path(), "weebtours").unwrap();

        let err = store.insert("tour", doc(json!({"name": "x"}))).unwrap_err();
        assert!(matches!(err, StoreError::InvalidDocument(_)));
        assert!(store.find("tour", &Filter::all(), None).unwrap().is_empty());
    }

    #[test]
    fn test_databases_are_isolated() {
        let temp_dir = TempDir::new().unwrap();
        let a = FileStore::open(temp_dir.path(), "a").unwrap();
        a.insert("tour", doc(json!({"_id": "1"}))).unwrap();

        let b = FileStore::open(temp_dir.path(), "b").unwrap();
        assert!(b.find("tour", &Filter::all(), None).unwrap().is_empty());
    }
}
