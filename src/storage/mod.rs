//! Storage layer for the finance tracker
//!
//! Three independent JSON collections with atomic writes, plus the audit
//! log that services write to after each mutation.

pub mod categories;
pub mod file_io;
pub mod goals;
pub mod init;
pub mod transactions;

pub use categories::CategoryRepository;
pub use file_io::{read_json, write_json_atomic};
pub use goals::GoalRepository;
pub use init::initialize_storage;
pub use transactions::TransactionRepository;

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::paths::FinancePaths;
use crate::error::FinanceError;

/// Owner of all collections; passed by reference to services and reports
pub struct Storage {
    paths: FinancePaths,
    audit: AuditLogger,
    pub transactions: TransactionRepository,
    pub categories: CategoryRepository,
    pub goals: GoalRepository,
}

impl Storage {
    /// Create a Storage instance; call [`Storage::load_all`] before use
    pub fn new(paths: FinancePaths) -> Result<Self, FinanceError> {
        paths.ensure_directories()?;

        Ok(Self {
            audit: AuditLogger::new(paths.audit_log()),
            transactions: TransactionRepository::new(paths.transactions_file()),
            categories: CategoryRepository::new(paths.categories_file()),
            goals: GoalRepository::new(paths.goals_file()),
            paths,
        })
    }

    pub fn paths(&self) -> &FinancePaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), FinanceError> {
        self.transactions.load()?;
        self.categories.load()?;
        self.goals.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), FinanceError> {
        self.transactions.save()?;
        self.categories.save()?;
        self.goals.save()?;
        Ok(())
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    /// Append an entry to the audit log
    pub fn record(&self, entry: AuditEntry) -> Result<(), FinanceError> {
        self.audit.append(&entry)
    }
}
