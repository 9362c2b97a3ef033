//! CSV Export functionality
//!
//! Exports transactions to CSV format for spreadsheets.

use crate::error::{FinanceError, FinanceResult};
use crate::storage::Storage;
use std::io::Write;

/// Export all transactions to CSV, oldest date first
pub fn export_transactions_csv<W: Write>(storage: &Storage, writer: W) -> FinanceResult<()> {
    let mut transactions = storage.transactions.get_all()?;
    transactions.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));

    let mut csv_writer = csv::Writer::from_writer(writer);
    let export_err = |e: csv::Error| FinanceError::Export(e.to_string());

    csv_writer
        .write_record(["ID", "Date", "Type", "Category", "Description", "Amount", "Created At"])
        .map_err(export_err)?;

    for txn in transactions {
        csv_writer
            .write_record([
                txn.id.to_string(),
                txn.date.to_string(),
                txn.kind.label().to_string(),
                txn.category.clone(),
                txn.description.clone(),
                format!("{:.2}", txn.signed_amount().as_units_f64()),
                txn.created_at.to_rfc3339(),
            ])
            .map_err(export_err)?;
    }

    csv_writer
        .flush()
        .map_err(|e| FinanceError::Export(e.to_string()))?;

    Ok(())
}
