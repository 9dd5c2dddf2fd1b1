//! Store error types
//!
//! Every failure of the document access layer surfaces as a [`StoreError`].
//! The HTTP layer renders all of them as `500 Internal Server Error` with the
//! error's display text as the message.

use std::io;

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Document store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// No store handle was constructed at start-up
    #[error("Database not available. Check DATABASE_URL and DATABASE_NAME environment variables")]
    Unavailable,

    /// The store could not be reached or refused the operation
    #[error("Connection error: {0}")]
    Connection(String),

    /// The store URL names a backend this build does not provide
    #[error("Unsupported store URL scheme: {0}")]
    UnsupportedScheme(String),

    /// The record handed to the store is not a JSON object
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Disk I/O failure in a durable backend
    #[error("{message}: {source}")]
    Io {
        message: String,
        #[source]
        source: io::Error,
    },

    /// Checksum mismatch or truncated record in the document log
    #[error("Data corruption at byte offset {offset}: {reason}")]
    Corruption { offset: u64, reason: String },

    /// A stored document does not match the requested record type
    #[error("Failed to decode document {id}: {source}")]
    Decode {
        id: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    /// Wrap an I/O error with context
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        StoreError::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a corruption error at the given log offset
    pub fn corruption_at_offset(offset: u64, reason: impl Into<String>) -> Self {
        StoreError::Corruption {
            offset,
            reason: reason.into(),
        }
    }

    /// Lock poisoning means a writer panicked mid-operation; the handle is
    /// treated as a lost connection.
    pub(crate) fn poisoned() -> Self {
        StoreError::Connection("store lock poisoned".to_string())
    }

    /// Whether the on-disk state can no longer be trusted
    pub fn is_corruption(&self) -> bool {
        matches!(self, StoreError::Corruption { .. })
    }
}
