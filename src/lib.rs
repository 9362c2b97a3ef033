//! Finance Tracker - personal income, expense and savings goal tracking
//!
//! Records income and expense transactions against categories, tracks
//! savings goals, and derives summaries from them: per-period totals,
//! category rankings, monthly trends and exportable reports.
//!
//! # Architecture
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: Transactions, categories, goals, money and filters
//! - `storage`: JSON file storage layer
//! - `audit`: Audit logging of every mutation
//! - `services`: Business logic layer
//! - `reports`: Period filtering, aggregation, trends and report assembly
//! - `display`: Terminal tables and text charts
//! - `export`: Report documents and data export/restore
//! - `cli`: Command handlers for the `fintrack` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use finance_tracker::config::{paths::FinancePaths, settings::Settings};
//! use finance_tracker::storage::Storage;
//!
//! let paths = FinancePaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut storage = Storage::new(paths)?;
//! storage.load_all()?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{FinanceError, FinanceResult};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Install the global tracing subscriber, once.
///
/// Diagnostics go to stderr, filtered by `RUST_LOG` with
/// `finance_tracker=info` added.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = "finance_tracker=info".parse() {
            filter = filter.add_directive(directive);
        }

        // Another subscriber may already be installed by an embedding program
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_tracing_is_idempotent() {
        super::init_tracing();
        super::init_tracing();
    }
}
