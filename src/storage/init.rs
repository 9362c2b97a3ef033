//! Storage initialization
//!
//! First-run setup: directories plus the default category set written to
//! categories.json.

use crate::config::paths::FinancePaths;
use crate::error::FinanceError;
use crate::models::Category;

use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation.
///
/// Existing collection files are left untouched.
pub fn initialize_storage(paths: &FinancePaths) -> Result<(), FinanceError> {
    paths.ensure_directories()?;

    if !paths.categories_file().exists() {
        write_json_atomic(paths.categories_file(), &Category::defaults())?;
        tracing::info!("created default categories");
    }

    for file in [paths.transactions_file(), paths.goals_file()] {
        if !file.exists() {
            write_json_atomic(&file, &Vec::<serde_json::Value>::new())?;
        }
    }

    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &FinancePaths) -> bool {
    !paths.categories_file().exists()
}
