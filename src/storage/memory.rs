//! In-memory document store
//!
//! Backs `memory://` URLs and serves as the read index of the file store.
//! Collections are kept in insertion order.

use std::collections::HashMap;
use std::sync::RwLock;

use super::errors::{StoreError, StoreResult};
use super::filter::Filter;
use super::{Document, DocumentStore};

/// Process-local document store
pub struct MemoryStore {
    name: String,
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    /// Create an empty store for the named database
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            collections: RwLock::new(HashMap::new()),
        }
    }
}

impl DocumentStore for MemoryStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn insert(&self, collection: &str, document: Document) -> StoreResult<()> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::poisoned())?;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(document);
        Ok(())
    }

    fn find(
        &self,
        collection: &str,
        filter: &Filter,
        limit: Option<usize>,
    ) -> StoreResult<Vec<Document>> {
        let collections = self.collections.read().map_err(|_| StoreError::poisoned())?;

        let Some(documents) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        Ok(documents
            .iter()
            .filter(|doc| filter.matches(doc))
            .take(limit.unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    fn list_collection_names(&self) -> StoreResult<Vec<String>> {
        let collections = self.collections.read().map_err(|_| StoreError::poisoned())?;
        let mut names: Vec<String> = collections
            .iter()
            .filter(|(_, docs)| !docs.is_empty())
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_find_returns_insertion_order() {
        let store = MemoryStore::new("weebtours");
        for i in 0..5 {
            store.insert("tour", doc(json!({"_id": i.to_string()}))).unwrap();
        }

        let found = store.find("tour", &Filter::all(), None).unwrap();
        let ids: Vec<_> = found.iter().map(|d| d["_id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["0", "1", "2", "3", "4"]);
    }

    #[test]
    fn test_limit_caps_results() {
        let store = MemoryStore::new("weebtours");
        for i in 0..5 {
            store.insert("tour", doc(json!({"n": i}))).unwrap();
        }

        assert_eq!(store.find("tour", &Filter::all(), Some(2)).unwrap().len(), 2);
        assert_eq!(store.find("tour", &Filter::all(), Some(50)).unwrap().len(), 5);
        assert_eq!(store.find("tour", &Filter::all(), Some(0)).unwrap().len(), 0);
    }

    #[test]
    fn test_filter_applied_before_limit() {
        let store = MemoryStore::new("weebtours");
        for city in ["Tokyo", "Osaka", "Tokyo", "Kyoto", "Tokyo"] {
            store.insert("tour", doc(json!({"destination": city}))).unwrap();
        }

        let filter = Filter::all().eq("destination", "Tokyo");
        assert_eq!(store.find("tour", &filter, Some(2)).unwrap().len(), 2);
        assert_eq!(store.find("tour", &filter, None).unwrap().len(), 3);
    }

    #[test]
    fn test_unknown_collection_is_empty() {
        let store = MemoryStore::new("weebtours");
        assert!(store.find("missing", &Filter::all(), None).unwrap().is_empty());
    }

    #[test]
    fn test_collection_names_sorted() {
        let store = MemoryStore::new("weebtours");
        store.insert("tour", Document::new()).unwrap();
        store.insert("booking", Document::new()).unwrap();

        assert_eq!(store.list_collection_names().unwrap(), vec!["booking", "tour"]);
        assert_eq!(store.name(), "weebtours");
    }
}
