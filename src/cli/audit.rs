//! Audit log CLI command

use crate::error::FinanceResult;
use crate::storage::Storage;

/// Show the most recent audit entries, oldest first
pub fn handle_audit_command(storage: &Storage, count: usize) -> FinanceResult<()> {
    let entries = storage.audit().read_recent(count)?;

    if entries.is_empty() {
        println!("No changes recorded yet.");
        return Ok(());
    }

    for entry in entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
