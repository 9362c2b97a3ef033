//! Transaction service
//!
//! Create, edit, delete and list income/expense transactions. Every
//! transaction must reference an existing category that accepts its kind.

use chrono::NaiveDate;

use crate::audit::{AuditEntry, AuditEvent, ChangeSet};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Category, FilterSpec, Money, Transaction, TransactionId, TransactionKind};
use crate::reports::filter_by_period;
use crate::storage::Storage;

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Input for creating a new transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub kind: TransactionKind,
    pub amount: Money,
    pub description: String,
    pub category: String,
    pub date: NaiveDate,
}

/// Fields to change on an existing transaction; `None` leaves a field as is
#[derive(Debug, Clone, Default)]
pub struct UpdateTransactionInput {
    pub kind: Option<TransactionKind>,
    pub amount: Option<Money>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Resolve the category for a transaction of `kind`, or fail validation
    fn resolve_category(&self, name: &str, kind: TransactionKind) -> FinanceResult<Category> {
        let category = self
            .storage
            .categories
            .get_by_name(name)?
            .ok_or_else(|| FinanceError::category_not_found(name.trim()))?;

        if !category.accepts(kind) {
            return Err(FinanceError::Validation(format!(
                "Category '{}' is for {} transactions, not {}",
                category.name,
                category.kind.label().to_lowercase(),
                kind.label().to_lowercase()
            )));
        }

        Ok(category)
    }

    pub fn create(&self, input: CreateTransactionInput) -> FinanceResult<Transaction> {
        let mut txn = Transaction::new(
            input.kind,
            input.amount,
            input.description.trim(),
            input.category.trim(),
            input.date,
        );

        txn.validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        // Store the category's canonical spelling
        txn.category = self.resolve_category(&txn.category, txn.kind)?.name;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        self.storage.record(AuditEntry::for_record(
            txn.id,
            txn.description.clone(),
            AuditEvent::TransactionRecorded {
                kind: txn.kind,
                amount: txn.amount,
                category: txn.category.clone(),
                date: txn.date,
            },
        ))?;

        Ok(txn)
    }

    pub fn get(&self, id: TransactionId) -> FinanceResult<Option<Transaction>> {
        self.storage.transactions.get(id)
    }

    /// Find a transaction by full or short ID
    pub fn find(&self, identifier: &str) -> FinanceResult<Option<Transaction>> {
        if let Ok(id) = identifier.parse::<TransactionId>() {
            return self.storage.transactions.get(id);
        }
        self.storage.transactions.find(identifier)
    }

    /// List transactions newest-created first, narrowed by type then period
    pub fn list(&self, filter: FilterSpec, today: NaiveDate) -> FinanceResult<Vec<Transaction>> {
        let mut transactions = self.storage.transactions.get_all()?;
        transactions.retain(|t| filter.type_filter.matches(t));

        let mut transactions = filter_by_period(&transactions, filter.period, today);
        // Reversed first so equal timestamps list the later insert first
        transactions.reverse();
        transactions.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(transactions)
    }

    pub fn update(&self, id: TransactionId, input: UpdateTransactionInput) -> FinanceResult<Transaction> {
        let mut txn = self
            .storage
            .transactions
            .get(id)?
            .ok_or_else(|| FinanceError::transaction_not_found(id.to_string()))?;

        let before = txn.clone();

        if let Some(kind) = input.kind {
            txn.kind = kind;
        }
        if let Some(amount) = input.amount {
            txn.amount = amount;
        }
        if let Some(description) = input.description {
            txn.description = description.trim().to_string();
        }
        if let Some(category) = input.category {
            txn.category = category.trim().to_string();
        }
        if let Some(date) = input.date {
            txn.date = date;
        }

        txn.validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        // Re-check even when only the kind changed
        txn.category = self.resolve_category(&txn.category, txn.kind)?.name;

        let changes = ChangeSet::new()
            .track("type", &before.kind, &txn.kind)
            .track("amount", &before.amount, &txn.amount)
            .track("category", before.category.as_str(), txn.category.as_str())
            .track("description", before.description.as_str(), txn.description.as_str())
            .track("date", &before.date, &txn.date);
        if changes.is_empty() {
            return Ok(txn);
        }

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        self.storage.record(AuditEntry::for_record(
            txn.id,
            txn.description.clone(),
            AuditEvent::TransactionEdited {
                changes: changes.into_vec(),
            },
        ))?;

        Ok(txn)
    }

    pub fn delete(&self, id: TransactionId) -> FinanceResult<Transaction> {
        let txn = self
            .storage
            .transactions
            .get(id)?
            .ok_or_else(|| FinanceError::transaction_not_found(id.to_string()))?;

        self.storage.transactions.delete(id)?;
        self.storage.transactions.save()?;

        self.storage.record(AuditEntry::for_record(
            txn.id,
            txn.description.clone(),
            AuditEvent::TransactionDeleted {
                kind: txn.kind,
                amount: txn.amount,
                category: txn.category.clone(),
                date: txn.date,
            },
        ))?;

        Ok(txn)
    }

    pub fn count(&self) -> FinanceResult<usize> {
        self.storage.transactions.count()
    }
}
