//! JSON Export functionality
//!
//! Exports all three collections to JSON with schema versioning, and reads
//! such an export back for verification or restore.

use crate::audit::{AuditEntry, AuditEvent};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Category, Goal, Transaction};
use crate::storage::Storage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Write;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full data export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub categories: Vec<Category>,

    pub transactions: Vec<Transaction>,

    pub goals: Vec<Goal>,

    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub transaction_count: usize,
    pub category_count: usize,
    pub goal_count: usize,

    /// Date range of transactions (earliest)
    pub earliest_transaction: Option<String>,

    /// Date range of transactions (latest)
    pub latest_transaction: Option<String>,
}

impl FullExport {
    pub fn from_storage(storage: &Storage) -> FinanceResult<Self> {
        let categories = storage.categories.get_all()?;
        let transactions = storage.transactions.get_all()?;
        let goals = storage.goals.get_all()?;

        let metadata = ExportMetadata {
            transaction_count: transactions.len(),
            category_count: categories.len(),
            goal_count: goals.len(),
            earliest_transaction: transactions.iter().map(|t| t.date).min().map(|d| d.to_string()),
            latest_transaction: transactions.iter().map(|t| t.date).max().map(|d| d.to_string()),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            categories,
            transactions,
            goals,
            metadata,
        })
    }

    /// Validate the export structure.
    ///
    /// Checks the schema version, that every record passes its own
    /// validation, that category names are unique, and that every
    /// transaction names an existing category accepting its type.
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        let mut names = HashSet::new();
        for category in &self.categories {
            category
                .validate()
                .map_err(|e| format!("Category {}: {}", category.id, e))?;
            if !names.insert(category.name.to_lowercase()) {
                return Err(format!("Duplicate category name '{}'", category.name));
            }
        }

        for txn in &self.transactions {
            txn.validate()
                .map_err(|e| format!("Transaction {}: {}", txn.id, e))?;

            let category = self
                .categories
                .iter()
                .find(|c| c.is_named(&txn.category))
                .ok_or_else(|| {
                    format!(
                        "Transaction {} references unknown category '{}'",
                        txn.id, txn.category
                    )
                })?;

            if !category.accepts(txn.kind) {
                return Err(format!(
                    "Transaction {} is {} but category '{}' is {}",
                    txn.id,
                    txn.kind.label().to_lowercase(),
                    category.name,
                    category.kind.label().to_lowercase()
                ));
            }
        }

        for goal in &self.goals {
            goal.validate()
                .map_err(|e| format!("Goal {}: {}", goal.id, e))?;
        }

        Ok(())
    }

    /// Replace every collection in `storage` with this export's contents
    pub fn restore(self, storage: &Storage) -> FinanceResult<()> {
        self.validate().map_err(FinanceError::Import)?;

        let restored = AuditEvent::DataRestored {
            transactions: self.transactions.len(),
            categories: self.categories.len(),
            goals: self.goals.len(),
        };

        storage.categories.replace_all(self.categories)?;
        storage.transactions.replace_all(self.transactions)?;
        storage.goals.replace_all(self.goals)?;
        storage.save_all()?;

        tracing::info!(exported_at = %self.exported_at, "restored data from export");
        storage.record(AuditEntry::for_dataset(restored))?;

        Ok(())
    }
}

/// Export everything to JSON
pub fn export_full_json<W: Write>(storage: &Storage, writer: &mut W, pretty: bool) -> FinanceResult<()> {
    let export = FullExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| FinanceError::Export(e.to_string()))?;

    Ok(())
}

/// Parse and validate a JSON export
pub fn import_from_json(json_str: &str) -> FinanceResult<FullExport> {
    let export: FullExport =
        serde_json::from_str(json_str).map_err(|e| FinanceError::Import(e.to_string()))?;

    export.validate().map_err(FinanceError::Import)?;

    Ok(export)
}
