//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod category;
pub mod chart;
pub mod export;
pub mod goal;
pub mod report;
pub mod transaction;

pub use audit::handle_audit_command;
pub use category::{handle_category_command, CategoryCommands};
pub use chart::{handle_chart_command, handle_dashboard_command, ChartCommands};
pub use export::{handle_export_command, ExportCommands};
pub use goal::{handle_goal_command, GoalCommands};
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::NaiveDate;

use crate::error::{FinanceError, FinanceResult};
use crate::models::Money;

/// Parse a user-entered amount
pub(crate) fn parse_amount(input: &str, what: &str) -> FinanceResult<Money> {
    Money::parse(input).map_err(|e| {
        FinanceError::Validation(format!(
            "Invalid {} '{}'. Use a format like '50' or '1,234.56'. Error: {}",
            what, input, e
        ))
    })
}

/// Parse a YYYY-MM-DD date
pub(crate) fn parse_date(input: &str) -> FinanceResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        FinanceError::Validation(format!("Invalid date format: '{}'. Use YYYY-MM-DD", input))
    })
}
