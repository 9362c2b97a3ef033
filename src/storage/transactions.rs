//! Transaction repository for JSON storage
//!
//! Keeps transactions in insertion order and persists them to
//! transactions.json as a plain array.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FinanceError;
use crate::models::{Transaction, TransactionId};

use super::file_io::{read_json, write_json_atomic};

/// Repository for transaction persistence
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<Vec<Transaction>>,
}

impl TransactionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Load transactions from disk; a missing file is an empty collection
    pub fn load(&self) -> Result<(), FinanceError> {
        let transactions: Vec<Transaction> = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        tracing::debug!(count = transactions.len(), path = %self.path.display(), "loaded transactions");
        *data = transactions;
        Ok(())
    }

    /// Save transactions to disk
    pub fn save(&self) -> Result<(), FinanceError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        write_json_atomic(&self.path, &*data)?;
        tracing::debug!(count = data.len(), "saved transactions");
        Ok(())
    }

    pub fn get(&self, id: TransactionId) -> Result<Option<Transaction>, FinanceError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.iter().find(|t| t.id == id).cloned())
    }

    /// Find a transaction by full or short ID
    pub fn find(&self, identifier: &str) -> Result<Option<Transaction>, FinanceError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.iter().find(|t| t.id.matches(identifier)).cloned())
    }

    /// All transactions in insertion order
    pub fn get_all(&self) -> Result<Vec<Transaction>, FinanceError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.clone())
    }

    /// Transactions referencing the named category
    pub fn get_by_category(&self, name: &str) -> Result<Vec<Transaction>, FinanceError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.iter().filter(|t| t.uses_category(name)).cloned().collect())
    }

    /// Insert a new transaction or replace an existing one in place
    pub fn upsert(&self, txn: Transaction) -> Result<(), FinanceError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        match data.iter_mut().find(|t| t.id == txn.id) {
            Some(existing) => *existing = txn,
            None => data.push(txn),
        }
        Ok(())
    }

    /// Point every transaction using `old_name` at `new_name`.
    ///
    /// Returns the number of transactions changed.
    pub fn rename_category(&self, old_name: &str, new_name: &str) -> Result<usize, FinanceError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let mut changed = 0;
        for txn in data.iter_mut().filter(|t| t.uses_category(old_name)) {
            txn.category = new_name.to_string();
            changed += 1;
        }
        Ok(changed)
    }

    pub fn delete(&self, id: TransactionId) -> Result<bool, FinanceError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let before = data.len();
        data.retain(|t| t.id != id);
        Ok(data.len() != before)
    }

    /// Replace the whole collection (used by restore from export)
    pub fn replace_all(&self, transactions: Vec<Transaction>) -> Result<(), FinanceError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        *data = transactions;
        Ok(())
    }

    pub fn count(&self) -> Result<usize, FinanceError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}
