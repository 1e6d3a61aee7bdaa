//! CSV audit log — append-only record of every forecast call.
//!
//! Header written once when the file is created; one row per call after
//! that. Appends are serialized behind a mutex because the observer sweep
//! forecasts commodities in parallel.

use std::path::PathBuf;
use std::sync::Mutex;

use mandicast_core::audit::{AuditRecord, AuditSink};

/// Append-only CSV implementation of the core's audit sink.
#[derive(Debug)]
pub struct CsvAuditLog {
    path: Mutex<PathBuf>,
}

impl CsvAuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Mutex::new(path.into()),
        }
    }
}

impl AuditSink for CsvAuditLog {
    fn append(&self, record: &AuditRecord) -> Result<(), std::io::Error> {
        let path = self.path.lock().expect("audit log lock poisoned");
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let new_file = !path.exists()
            || std::fs::metadata(&*path).map(|m| m.len() == 0).unwrap_or(true);
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&*path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(new_file)
            .from_writer(file);
        writer
            .serialize(record)
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        writer.flush()
    }
}
