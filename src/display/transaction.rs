//! Transaction display formatting
//!
//! Tables for transaction listings and a detail view for a single
//! transaction.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::report::truncate;
use crate::models::Transaction;

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Type")]
    kind: &'static str,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl TransactionRow {
    fn new(txn: &Transaction, currency: &str, date_format: &str) -> Self {
        Self {
            id: txn.id.short(),
            date: txn.date.format(date_format).to_string(),
            description: truncate(&txn.description, 30),
            category: txn.category.clone(),
            kind: txn.kind.label(),
            amount: txn.signed_amount().format_with_symbol(currency),
        }
    }
}

/// Format a list of transactions as a table
pub fn format_transaction_list(transactions: &[Transaction], currency: &str, date_format: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows = transactions
        .iter()
        .map(|t| TransactionRow::new(t, currency, date_format));

    let mut output = Table::new(rows).with(Style::rounded()).to_string();
    output.push('\n');
    output
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, currency: &str, date_format: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Type:        {}\n", txn.kind.label()));
    output.push_str(&format!("Date:        {}\n", txn.date.format(date_format)));
    output.push_str(&format!(
        "Amount:      {}\n",
        txn.signed_amount().format_with_symbol(currency)
    ));
    output.push_str(&format!("Category:    {}\n", txn.category));

    if !txn.description.is_empty() {
        output.push_str(&format!("Description: {}\n", txn.description));
    }

    output.push_str(&format!(
        "Recorded:    {}\n",
        txn.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(
            format_transaction_list(&[], "$", "%Y-%m-%d"),
            "No transactions found.\n"
        );
    }

    #[test]
    fn test_list_contains_rows() {
        let txns = vec![
            Transaction::expense(Money::from_units(50), "Groceries", "Food", date()),
            Transaction::income(Money::from_units(3000), "Paycheck", "Salary", date()),
        ];

        let table = format_transaction_list(&txns, "$", "%d/%m/%Y");
        assert!(table.contains("Description"));
        assert!(table.contains("15/01/2025"));
        assert!(table.contains("-$50.00"));
        assert!(table.contains("$3,000.00"));
        assert!(table.contains(&txns[0].id.short()));
    }

    #[test]
    fn test_details() {
        let txn = Transaction::expense(Money::from_units(12), "Bus pass", "Transport", date());
        let details = format_transaction_details(&txn, "€", "%Y-%m-%d");

        assert!(details.contains("Type:        Expense"));
        assert!(details.contains("Category:    Transport"));
        assert!(details.contains("Description: Bus pass"));
        assert!(details.contains("-€12.00"));
    }
}
