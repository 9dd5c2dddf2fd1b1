//! Append-only document log writer
//!
//! Each record is written in a single `write_all` followed by an fsync; a
//! write is not acknowledged until both succeed. A failed append truncates
//! the file back to the last acknowledged record, so a torn tail never sits
//! in front of later records. If that truncation fails too, the writer
//! refuses all further appends.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use tracing::error;

use super::errors::{StoreError, StoreResult};
use super::record::LogRecord;

/// Writer for `documents.dat`.
pub struct LogWriter {
    file: File,
    current_offset: u64,
    failed: bool,
    #[cfg(test)]
    fail_next_write_after: Option<usize>,
}

impl LogWriter {
    /// Opens or creates the log file, creating parent directories if needed.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                StoreError::io(
                    format!("Failed to create data directory {}", parent.display()),
                    e,
                )
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                StoreError::io(format!("Failed to open document log {}", path.display()), e)
            })?;

        let current_offset = file
            .metadata()
            .map_err(|e| StoreError::io("Failed to read document log metadata", e))?
            .len();

        Ok(Self {
            file,
            current_offset,
            failed: false,
            #[cfg(test)]
            fail_next_write_after: None,
        })
    }

    /// Appends a record and fsyncs. Returns the offset it was written at.
    pub fn append(&mut self, record: &LogRecord) -> StoreResult<u64> {
        let offset = self.current_offset;
        if self.failed {
            return Err(StoreError::corruption_at_offset(
                offset,
                "document log has an unrecoverable partial write; reopen the store",
            ));
        }

        let serialized = record.serialize();
        if let Err(e) = self.write_durably(&serialized) {
            self.rollback(offset);
            return Err(StoreError::io(
                format!("Failed to persist document {}", record.document_id),
                e,
            ));
        }

        self.current_offset += serialized.len() as u64;
        Ok(offset)
    }

    fn write_durably(&mut self, bytes: &[u8]) -> io::Result<()> {
        #[cfg(test)]
        if let Some(written) = self.fail_next_write_after.take() {
            self.file.write_all(&bytes[..written.min(bytes.len())])?;
            return Err(io::Error::new(io::ErrorKind::Other, "injected write failure"));
        }

        self.file.write_all(bytes)?;
        self.file.sync_data()
    }

    /// Drop whatever a failed append left past `offset`.
    fn rollback(&mut self, offset: u64) {
        let truncated = self
            .file
            .set_len(offset)
            .and_then(|()| self.file.sync_data());
        if let Err(e) = truncated {
            error!(offset, error = %e, "Failed to roll back partial write");
            self.failed = true;
        }
    }
}
