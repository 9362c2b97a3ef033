//! Category repository for JSON storage
//!
//! Manages loading and saving categories to categories.json. A missing file
//! yields the built-in default category set.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FinanceError;
use crate::models::{Category, CategoryId, TransactionKind};

use super::file_io::{read_json_required, write_json_atomic};

/// Repository for category persistence
pub struct CategoryRepository {
    path: PathBuf,
    categories: RwLock<Vec<Category>>,
}

impl CategoryRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            categories: RwLock::new(Vec::new()),
        }
    }

    /// Load categories from disk, falling back to the defaults
    pub fn load(&self) -> Result<(), FinanceError> {
        let loaded = if self.path.exists() {
            read_json_required(&self.path)?
        } else {
            tracing::debug!("categories file missing, using defaults");
            Category::defaults()
        };

        let mut categories = self
            .categories
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        tracing::debug!(count = loaded.len(), path = %self.path.display(), "loaded categories");
        *categories = loaded;
        Ok(())
    }

    pub fn save(&self) -> Result<(), FinanceError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        write_json_atomic(&self.path, &*categories)?;
        tracing::debug!(count = categories.len(), "saved categories");
        Ok(())
    }

    /// Whether categories.json exists on disk
    pub fn is_persisted(&self) -> bool {
        self.path.exists()
    }

    pub fn get(&self, id: CategoryId) -> Result<Option<Category>, FinanceError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(categories.iter().find(|c| c.id == id).cloned())
    }

    /// All categories in collection order
    pub fn get_all(&self) -> Result<Vec<Category>, FinanceError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(categories.clone())
    }

    /// Categories usable by transactions of `kind` (including `both`)
    pub fn get_for_kind(&self, kind: TransactionKind) -> Result<Vec<Category>, FinanceError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(categories.iter().filter(|c| c.accepts(kind)).cloned().collect())
    }

    /// Case-insensitive lookup by name
    pub fn get_by_name(&self, name: &str) -> Result<Option<Category>, FinanceError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(categories.iter().find(|c| c.is_named(name)).cloned())
    }

    pub fn name_exists(&self, name: &str, exclude: Option<CategoryId>) -> Result<bool, FinanceError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(categories
            .iter()
            .any(|c| c.is_named(name) && Some(c.id) != exclude))
    }

    /// Insert a new category or replace an existing one in place
    pub fn upsert(&self, category: Category) -> Result<(), FinanceError> {
        let mut categories = self
            .categories
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        match categories.iter_mut().find(|c| c.id == category.id) {
            Some(existing) => *existing = category,
            None => categories.push(category),
        }
        Ok(())
    }

    pub fn delete(&self, id: CategoryId) -> Result<bool, FinanceError> {
        let mut categories = self
            .categories
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let before = categories.len();
        categories.retain(|c| c.id != id);
        Ok(categories.len() != before)
    }

    pub fn replace_all(&self, loaded: Vec<Category>) -> Result<(), FinanceError> {
        let mut categories = self
            .categories
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        *categories = loaded;
        Ok(())
    }

    pub fn count(&self) -> Result<usize, FinanceError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(categories.len())
    }
}
