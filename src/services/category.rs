//! Category service
//!
//! CRUD for categories. Names are unique ignoring case. Transactions refer
//! to categories by name, so a rename is carried over to every transaction
//! using the old name, and a category cannot be deleted while in use.

use crate::audit::{AuditEntry, AuditEvent, ChangeSet};
use crate::error::{FinanceError, FinanceResult};
use crate::models::category::{DEFAULT_COLOR, is_hex_color};
use crate::models::{Category, CategoryId, CategoryKind, TransactionKind};
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

/// Fields to change on an existing category
#[derive(Debug, Clone, Default)]
pub struct UpdateCategoryInput {
    pub name: Option<String>,
    pub kind: Option<CategoryKind>,
    pub color: Option<String>,
}

/// Result of a category update
#[derive(Debug, Clone)]
pub struct CategoryUpdate {
    pub category: Category,
    /// Transactions moved to the new name
    pub renamed_transactions: usize,
}

impl<'a> CategoryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn create(&self, name: &str, kind: CategoryKind, color: Option<&str>) -> FinanceResult<Category> {
        let name = name.trim();

        if self.storage.categories.name_exists(name, None)? {
            return Err(FinanceError::Duplicate {
                entity_type: "Category",
                identifier: name.to_string(),
            });
        }

        let category = Category::new(name, kind, color.map(str::trim).unwrap_or(DEFAULT_COLOR));
        category
            .validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        self.storage.record(AuditEntry::for_record(
            category.id,
            category.name.clone(),
            AuditEvent::CategoryCreated {
                kind: category.kind,
                color: category.color.clone(),
            },
        ))?;

        Ok(category)
    }

    pub fn get(&self, id: CategoryId) -> FinanceResult<Option<Category>> {
        self.storage.categories.get(id)
    }

    /// Find a category by name (case-insensitive) or short ID
    pub fn find(&self, identifier: &str) -> FinanceResult<Option<Category>> {
        if let Some(category) = self.storage.categories.get_by_name(identifier)? {
            return Ok(Some(category));
        }

        Ok(self
            .storage
            .categories
            .get_all()?
            .into_iter()
            .find(|c| c.id.matches(identifier)))
    }

    pub fn list(&self) -> FinanceResult<Vec<Category>> {
        self.storage.categories.get_all()
    }

    /// Categories offered for a transaction of `kind`
    pub fn list_for_kind(&self, kind: TransactionKind) -> FinanceResult<Vec<Category>> {
        self.storage.categories.get_for_kind(kind)
    }

    /// Number of transactions using the category name
    pub fn usage_count(&self, name: &str) -> FinanceResult<usize> {
        Ok(self.storage.transactions.get_by_category(name)?.len())
    }

    pub fn update(&self, id: CategoryId, input: UpdateCategoryInput) -> FinanceResult<CategoryUpdate> {
        let mut category = self
            .storage
            .categories
            .get(id)?
            .ok_or_else(|| FinanceError::category_not_found(id.to_string()))?;

        let before = category.clone();

        if let Some(name) = input.name {
            let name = name.trim();
            if self.storage.categories.name_exists(name, Some(id))? {
                return Err(FinanceError::Duplicate {
                    entity_type: "Category",
                    identifier: name.to_string(),
                });
            }
            category.name = name.to_string();
        }

        if let Some(color) = input.color {
            category.color = color.trim().to_string();
        }

        if let Some(kind) = input.kind {
            let in_use = self.storage.transactions.get_by_category(&before.name)?;
            if let Some(txn) = in_use.iter().find(|t| !kind.accepts(t.kind)) {
                return Err(FinanceError::Validation(format!(
                    "Category '{}' is used by {} transactions; it cannot become {}",
                    before.name,
                    txn.kind.label().to_lowercase(),
                    kind.label().to_lowercase()
                )));
            }
            category.kind = kind;
        }

        category
            .validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        // Transactions are saved before the category; either failure reverts both
        let renamed_transactions = if category.name != before.name {
            self.storage
                .transactions
                .rename_category(&before.name, &category.name)?
        } else {
            0
        };

        if renamed_transactions > 0 {
            if let Err(e) = self.storage.transactions.save() {
                self.storage
                    .transactions
                    .rename_category(&category.name, &before.name)?;
                return Err(e);
            }
        }

        self.storage.categories.upsert(category.clone())?;
        if let Err(e) = self.storage.categories.save() {
            self.storage.categories.upsert(before.clone())?;
            if renamed_transactions > 0 {
                self.storage
                    .transactions
                    .rename_category(&category.name, &before.name)?;
                self.storage.transactions.save()?;
            }
            return Err(e);
        }

        let changes = ChangeSet::new()
            .track("name", before.name.as_str(), category.name.as_str())
            .track("type", &before.kind, &category.kind)
            .track("color", before.color.as_str(), category.color.as_str());
        if !changes.is_empty() {
            self.storage.record(AuditEntry::for_record(
                category.id,
                category.name.clone(),
                AuditEvent::CategoryEdited {
                    changes: changes.into_vec(),
                    transactions_moved: renamed_transactions,
                },
            ))?;
        }

        Ok(CategoryUpdate {
            category,
            renamed_transactions,
        })
    }

    /// Delete a category that no transaction references
    pub fn delete(&self, id: CategoryId) -> FinanceResult<Category> {
        let category = self
            .storage
            .categories
            .get(id)?
            .ok_or_else(|| FinanceError::category_not_found(id.to_string()))?;

        let count = self.usage_count(&category.name)?;
        if count > 0 {
            return Err(FinanceError::CategoryInUse {
                name: category.name,
                count,
            });
        }

        self.storage.categories.delete(id)?;
        self.storage.categories.save()?;

        self.storage.record(AuditEntry::for_record(
            category.id,
            category.name.clone(),
            AuditEvent::CategoryDeleted {
                kind: category.kind,
            },
        ))?;

        Ok(category)
    }
}

/// Validate a user-supplied color without building a category
pub fn validate_color(color: &str) -> FinanceResult<()> {
    if is_hex_color(color.trim()) {
        Ok(())
    } else {
        Err(FinanceError::Validation(format!(
            "Invalid color '{}', expected #RRGGBB",
            color
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FinancePaths;
    use crate::models::{Money, Transaction};
    use crate::services::transaction::{TransactionService, UpdateTransactionInput};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn add_expense(storage: &Storage, category: &str) -> Transaction {
        let txn = Transaction::expense(
            Money::from_units(25),
            "lunch",
            category,
            NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
        );
        storage.transactions.upsert(txn.clone()).unwrap();
        txn
    }

    #[test]
    fn test_create_category() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        let pets = service.create("Pets", CategoryKind::Expense, Some("#123456")).unwrap();
        assert_eq!(pets.color, "#123456");

        let gifts = service.create(" Gifts ", CategoryKind::Both, None).unwrap();
        assert_eq!(gifts.name, "Gifts");
        assert_eq!(gifts.color, DEFAULT_COLOR);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        let err = service.create("FOOD", CategoryKind::Expense, None).unwrap_err();
        assert!(matches!(err, FinanceError::Duplicate { .. }));
    }

    #[test]
    fn test_invalid_color_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        assert!(service
            .create("Pets", CategoryKind::Expense, Some("blue"))
            .unwrap_err()
            .is_validation());
        assert!(validate_color("#abcdef").is_ok());
        assert!(validate_color("#abc").is_err());
    }

    #[test]
    fn test_delete_blocked_while_in_use() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);
        let food = service.find("Food").unwrap().unwrap();
        let txn = add_expense(&storage, "Food");

        let err = service.delete(food.id).unwrap_err();
        assert!(matches!(err, FinanceError::CategoryInUse { count: 1, .. }));
        assert!(service.get(food.id).unwrap().is_some());

        // Recategorize, then the delete goes through
        TransactionService::new(&storage)
            .update(
                txn.id,
                UpdateTransactionInput {
                    category: Some("Transport".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        service.delete(food.id).unwrap();
        assert!(service.find("Food").unwrap().is_none());
    }

    #[test]
    fn test_delete_after_transaction_removed() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);
        let food = service.find("Food").unwrap().unwrap();
        let txn = add_expense(&storage, "Food");

        assert!(service.delete(food.id).is_err());
        storage.transactions.delete(txn.id).unwrap();
        assert!(service.delete(food.id).is_ok());
    }

    #[test]
    fn test_rename_cascades_to_transactions() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);
        let food = service.find("Food").unwrap().unwrap();
        add_expense(&storage, "Food");
        add_expense(&storage, "Food");

        let update = service
            .update(
                food.id,
                UpdateCategoryInput {
                    name: Some("Groceries".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(update.renamed_transactions, 2);
        assert_eq!(service.usage_count("Groceries").unwrap(), 2);
        assert_eq!(service.usage_count("Food").unwrap(), 0);

        let entries = storage.audit().read_all().unwrap();
        match &entries.last().unwrap().event {
            AuditEvent::CategoryEdited {
                changes,
                transactions_moved,
            } => {
                assert_eq!(*transactions_moved, 2);
                assert_eq!(changes[0].to_string(), "name: Food -> Groceries");
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_failed_rename_leaves_category_and_transactions_unchanged() {
        let (temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);
        let food = service.find("Food").unwrap().unwrap();
        add_expense(&storage, "Food");
        storage.save_all().unwrap();

        // A directory in place of the temp file makes the transaction save fail
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::create_dir(paths.transactions_file().with_extension("json.tmp")).unwrap();

        let result = service.update(
            food.id,
            UpdateCategoryInput {
                name: Some("Groceries".into()),
                ..Default::default()
            },
        );

        assert!(result.is_err());
        assert_eq!(service.usage_count("Food").unwrap(), 1);
        assert_eq!(service.get(food.id).unwrap().unwrap().name, "Food");

        let mut reloaded = Storage::new(paths).unwrap();
        reloaded.load_all().unwrap();
        assert!(reloaded.categories.get_by_name("Food").unwrap().is_some());
        assert!(reloaded.categories.get_by_name("Groceries").unwrap().is_none());
        assert_eq!(reloaded.transactions.get_all().unwrap()[0].category, "Food");
    }

    #[test]
    fn test_rename_to_existing_name_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);
        let food = service.find("Food").unwrap().unwrap();

        let err = service
            .update(
                food.id,
                UpdateCategoryInput {
                    name: Some("transport".into()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, FinanceError::Duplicate { .. }));
    }

    #[test]
    fn test_kind_change_checked_against_usage() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);
        let food = service.find("Food").unwrap().unwrap();
        add_expense(&storage, "Food");

        let to_income = UpdateCategoryInput {
            kind: Some(CategoryKind::Income),
            ..Default::default()
        };
        assert!(service.update(food.id, to_income).unwrap_err().is_validation());

        let to_both = UpdateCategoryInput {
            kind: Some(CategoryKind::Both),
            ..Default::default()
        };
        assert_eq!(service.update(food.id, to_both).unwrap().category.kind, CategoryKind::Both);
    }

    #[test]
    fn test_list_for_kind() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);
        service.create("Gifts", CategoryKind::Both, None).unwrap();

        let income = service.list_for_kind(TransactionKind::Income).unwrap();
        assert_eq!(income.len(), 6);
        assert_eq!(income.last().unwrap().name, "Gifts");
    }
}
