//! Sequential document log reader
//!
//! Validates the checksum of every record. Any corruption is reported with
//! the byte offset of the failing record and aborts the scan.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::errors::{StoreError, StoreResult};
use super::record::{LogRecord, MIN_RECORD_SIZE};

/// Reader for sequential scans of `documents.dat`.
pub struct LogReader {
    reader: BufReader<File>,
    current_offset: u64,
    file_size: u64,
}

impl LogReader {
    /// Opens the log file for reading.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let file = File::open(path).map_err(|e| {
            StoreError::io(format!("Failed to open document log {}", path.display()), e)
        })?;

        let file_size = file
            .metadata()
            .map_err(|e| StoreError::io("Failed to read document log metadata", e))?
            .len();

        Ok(Self {
            reader: BufReader::new(file),
            current_offset: 0,
            file_size,
        })
    }

    /// Reads the next record.
    ///
    /// - `Ok(Some(record))` if a record was read
    /// - `Ok(None)` at end of file
    /// - `Err(Corruption)` on checksum failure or truncation
    pub fn read_next(&mut self) -> StoreResult<Option<LogRecord>> {
        if self.current_offset >= self.file_size {
            return Ok(None);
        }

        let remaining = self.file_size - self.current_offset;
        if remaining < MIN_RECORD_SIZE as u64 {
            return Err(StoreError::corruption_at_offset(
                self.current_offset,
                format!(
                    "Truncated log: {} bytes remaining, minimum record size is {}",
                    remaining, MIN_RECORD_SIZE
                ),
            ));
        }

        let mut len_buf = [0u8; 4];
        self.reader.read_exact(&mut len_buf).map_err(|e| {
            StoreError::corruption_at_offset(
                self.current_offset,
                format!("Failed to read record length: {}", e),
            )
        })?;
        let record_length = u32::from_le_bytes(len_buf) as u64;

        if record_length < MIN_RECORD_SIZE as u64 {
            return Err(StoreError::corruption_at_offset(
                self.current_offset,
                format!("Invalid record length: {}", record_length),
            ));
        }

        if record_length > remaining {
            return Err(StoreError::corruption_at_offset(
                self.current_offset,
                format!(
                    "Record length {} exceeds remaining file size {}",
                    record_length, remaining
                ),
            ));
        }

        let mut record_buf = vec![0u8; record_length as usize];
        record_buf[0..4].copy_from_slice(&len_buf);
        self.reader.read_exact(&mut record_buf[4..]).map_err(|e| {
            StoreError::corruption_at_offset(
                self.current_offset,
                format!("Failed to read record body: {}", e),
            )
        })?;

        let (record, consumed) = LogRecord::deserialize(&record_buf)
            .map_err(|e| StoreError::corruption_at_offset(self.current_offset, e.to_string()))?;

        self.current_offset += consumed as u64;
        Ok(Some(record))
    }

    /// Reads all remaining records in file order.
    pub fn read_all(&mut self) -> StoreResult<Vec<LogRecord>> {
        let mut records = Vec::new();
        while let Some(record) = self.read_next()? {
            records.push(record);
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::writer::LogWriter;
    use std::fs;
    use tempfile::TempDir;

    fn record(collection: &str, id: &str) -> LogRecord {
        LogRecord {
            collection: collection.to_string(),
            document_id: id.to_string(),
            body: format!(r#"{{"_id":"{}"}}"#, id).into_bytes(),
        }
    }

    #[test]
    fn test_read_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("documents.dat");
        LogWriter::open(&path).unwrap();

        let mut reader = LogReader::open(&path).unwrap();
        assert!(reader.read_next().unwrap().is_none());
    }

    #[test]
    fn test_read_preserves_file_order() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("documents.dat");
        {
            let mut writer = LogWriter::open(&path).unwrap();
            writer.append(&record("tour", "t1")).unwrap();
            writer.append(&record("booking", "b1")).unwrap();
            writer.append(&record("tour", "t2")).unwrap();
        }

        let records = LogReader::open(&path).unwrap().read_all().unwrap();
        let ids: Vec<_> = records.iter().map(|r| r.document_id.as_str()).collect();
        assert_eq!(ids, vec!["t1", "b1", "t2"]);
    }

    #[test]
    fn test_corruption_reports_offset() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("documents.dat");
        let second_offset = {
            let mut writer = LogWriter::open(&path).unwrap();
            writer.append(&record("tour", "t1")).unwrap();
            writer.append(&record("tour", "t2")).unwrap()
        };

        let mut contents = fs::read(&path).unwrap();
        let last = contents.len() - 6;
        contents[last] ^= 0xFF;
        fs::write(&path, contents).unwrap();

        let mut reader = LogReader::open(&path).unwrap();
        assert!(reader.read_next().unwrap().is_some());
        match reader.read_next() {
            Err(StoreError::Corruption { offset, .. }) => assert_eq!(offset, second_offset),
            other => panic!("expected corruption, got {:?}", other),
        }
    }

    #[test]
    fn test_trailing_garbage_is_truncation() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("documents.dat");
        {
            let mut writer = LogWriter::open(&path).unwrap();
            writer.append(&record("tour", "t1")).unwrap();
        }
        let mut contents = fs::read(&path).unwrap();
        contents.extend_from_slice(&[1, 2, 3]);
        fs::write(&path, contents).unwrap();

        let err = LogReader::open(&path).unwrap().read_all().unwrap_err();
        assert!(err.is_corruption());
        assert!(err.to_string().contains("Truncated"));
    }
}
