//! Transaction CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use super::{parse_amount, parse_date};
use crate::config::settings::Settings;
use crate::display::transaction::{format_transaction_details, format_transaction_list};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{FilterSpec, Period, TransactionKind, TypeFilter};
use crate::services::{CreateTransactionInput, TransactionService, UpdateTransactionInput};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record an income or expense
    Add {
        /// Transaction type (income or expense)
        kind: TransactionKind,
        /// Amount, always positive (e.g., "50" or "1,234.56")
        amount: String,
        /// Category name
        #[arg(short, long)]
        category: String,
        /// Description
        #[arg(short = 'm', long)]
        description: String,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List transactions, most recently recorded first
    List {
        /// Filter by type (all, income, expense)
        #[arg(short = 't', long = "type", default_value = "all")]
        type_filter: TypeFilter,
        /// Filter by period (all, week, month, year)
        #[arg(short, long, default_value = "all")]
        period: Period,
        /// Maximum number of transactions to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show transaction details
    Show {
        /// Transaction ID (full or short)
        id: String,
    },
    /// Edit a transaction
    Edit {
        /// Transaction ID (full or short)
        id: String,
        /// New type
        #[arg(long = "type")]
        kind: Option<TransactionKind>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New description
        #[arg(short = 'm', long)]
        description: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID (full or short)
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    today: NaiveDate,
    cmd: TransactionCommands,
) -> FinanceResult<()> {
    let service = TransactionService::new(storage);
    let currency = settings.currency_symbol.as_str();
    let date_format = settings.date_format.as_str();

    match cmd {
        TransactionCommands::Add {
            kind,
            amount,
            category,
            description,
            date,
        } => {
            let amount = parse_amount(&amount, "amount")?;
            let date = match date {
                Some(date_str) => parse_date(&date_str)?,
                None => today,
            };

            let txn = service.create(CreateTransactionInput {
                kind,
                amount,
                description,
                category,
                date,
            })?;

            println!("Recorded {}: {}", txn.kind.label().to_lowercase(), txn);
            println!("  ID: {}", txn.id.short());
        }

        TransactionCommands::List {
            type_filter,
            period,
            limit,
        } => {
            let mut transactions = service.list(FilterSpec::new(type_filter, period), today)?;
            if let Some(limit) = limit {
                transactions.truncate(limit);
            }
            print!("{}", format_transaction_list(&transactions, currency, date_format));
        }

        TransactionCommands::Show { id } => {
            let txn = service
                .find(&id)?
                .ok_or_else(|| FinanceError::transaction_not_found(&id))?;
            print!("{}", format_transaction_details(&txn, currency, date_format));
        }

        TransactionCommands::Edit {
            id,
            kind,
            amount,
            category,
            description,
            date,
        } => {
            let txn = service
                .find(&id)?
                .ok_or_else(|| FinanceError::transaction_not_found(&id))?;

            let input = UpdateTransactionInput {
                kind,
                amount: amount.map(|a| parse_amount(&a, "amount")).transpose()?,
                description,
                category,
                date: date.map(|d| parse_date(&d)).transpose()?,
            };

            let updated = service.update(txn.id, input)?;
            println!("Updated transaction: {}", updated);
        }

        TransactionCommands::Delete { id, force } => {
            let txn = service
                .find(&id)?
                .ok_or_else(|| FinanceError::transaction_not_found(&id))?;

            if !force {
                println!("About to delete transaction:");
                print!("{}", format_transaction_details(&txn, currency, date_format));
                println!();
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            let deleted = service.delete(txn.id)?;
            println!("Deleted transaction: {}", deleted);
        }
    }

    Ok(())
}
