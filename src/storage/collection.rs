//! # Typed collections
//!
//! [`Collection`] puts a record type on top of the schema-flexible store:
//! records are serialized on insert, and stored documents are decoded back
//! into [`Stored<T>`] on read, with the store-assigned `_id` exposed as `id`.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::database::Database;
use super::errors::{StoreError, StoreResult};
use super::filter::Filter;
use super::{Document, CREATED_AT_FIELD, ID_FIELD, UPDATED_AT_FIELD};

/// A record type persisted in its own collection
pub trait Entity: Serialize + DeserializeOwned {
    /// Collection name in the store
    const COLLECTION: &'static str;
}

/// A record as read back from the store
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stored<T> {
    /// Store-assigned identifier, rendered as text
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    #[serde(flatten)]
    pub record: T,
}

impl<T: DeserializeOwned> Stored<T> {
    /// Decode a raw store document.
    ///
    /// Non-string identifiers are rendered with their JSON text.
    pub fn from_document(mut document: Document) -> StoreResult<Self> {
        let id = match document.remove(ID_FIELD) {
            Some(Value::String(id)) => id,
            Some(other) => other.to_string(),
            None => {
                return Err(StoreError::InvalidDocument(
                    "stored document has no _id".to_string(),
                ))
            }
        };

        let created_at = take_string(&mut document, CREATED_AT_FIELD);
        let updated_at = take_string(&mut document, UPDATED_AT_FIELD);

        let record = serde_json::from_value(Value::Object(document))
            .map_err(|source| StoreError::Decode {
                id: id.clone(),
                source,
            })?;

        Ok(Self {
            id,
            created_at,
            updated_at,
            record,
        })
    }
}

fn take_string(document: &mut Document, field: &str) -> Option<String> {
    match document.remove(field) {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

/// Typed access to the collection holding `T`
pub struct Collection<'a, T> {
    db: &'a Database,
    _record: PhantomData<T>,
}

impl<'a, T: Entity> Collection<'a, T> {
    pub(crate) fn new(db: &'a Database) -> Self {
        Self {
            db,
            _record: PhantomData,
        }
    }

    /// Persist `record`, returning its identifier
    pub fn insert(&self, record: &T) -> StoreResult<String> {
        let value = serde_json::to_value(record)
            .map_err(|e| StoreError::InvalidDocument(e.to_string()))?;
        self.db.create_document(T::COLLECTION, value)
    }

    /// Up to `limit` records matching `filter`, in insertion order
    pub fn find(&self, filter: &Filter, limit: Option<usize>) -> StoreResult<Vec<Stored<T>>> {
        self.db
            .get_documents(T::COLLECTION, filter, limit)?
            .into_iter()
            .map(Stored::from_document)
            .collect()
    }
}
