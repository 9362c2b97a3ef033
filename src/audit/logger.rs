//! Append-only audit log
//!
//! One JSON entry per line. Lines that no longer parse (written by an
//! older release, or truncated by a crash mid-write) are skipped with a
//! warning so the rest of the history stays readable.

use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::{FinanceError, FinanceResult};

use super::entry::AuditEntry;

pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }

    /// Append an entry and flush it to disk
    pub fn append(&self, entry: &AuditEntry) -> FinanceResult<()> {
        let line = serde_json::to_string(entry)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| FinanceError::Io(format!("Failed to open audit log: {}", e)))?;

        writeln!(file, "{}", line)
            .and_then(|_| file.flush())
            .map_err(|e| FinanceError::Io(format!("Failed to write audit log: {}", e)))?;

        tracing::debug!(event = entry.event.heading(), "audit entry appended");
        Ok(())
    }

    /// Every entry, oldest first
    pub fn read_all(&self) -> FinanceResult<Vec<AuditEntry>> {
        let mut entries = Vec::new();
        self.for_each_entry(|entry| entries.push(entry))?;
        Ok(entries)
    }

    /// The last `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> FinanceResult<Vec<AuditEntry>> {
        let mut recent = VecDeque::with_capacity(count);
        self.for_each_entry(|entry| {
            if recent.len() == count {
                recent.pop_front();
            }
            if count > 0 {
                recent.push_back(entry);
            }
        })?;
        Ok(recent.into())
    }

    fn for_each_entry(&self, mut visit: impl FnMut(AuditEntry)) -> FinanceResult<()> {
        let file = match File::open(&self.log_path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(FinanceError::Io(format!("Failed to open audit log: {}", e))),
        };

        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| FinanceError::Io(format!("Failed to read audit log: {}", e)))?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str(&line) {
                Ok(entry) => visit(entry),
                Err(e) => tracing::warn!(line = index + 1, error = %e, "skipping unreadable audit entry"),
            }
        }
        Ok(())
    }
}
