//! User settings for the finance tracker
//!
//! Display and report preferences. The locale is fixed; only the currency
//! symbol and date format are configurable.

use serde::{Deserialize, Serialize};

use super::paths::FinancePaths;
use crate::error::FinanceError;

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version of the settings file
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when formatting money
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Number of categories shown in top-N rankings
    #[serde(default = "default_top_categories")]
    pub top_categories: usize,

    /// Trailing months in the balance trend view
    #[serde(default = "default_trend_months")]
    pub trend_months: u32,

    /// Trailing months in the monthly income/expense view
    #[serde(default = "default_monthly_months")]
    pub monthly_months: u32,

    /// Number of recent transactions on the dashboard
    #[serde(default = "default_recent_transactions")]
    pub recent_transactions: usize,

    /// Lines per page in exported report documents
    #[serde(default = "default_page_lines")]
    pub page_lines: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_top_categories() -> usize {
    5
}

fn default_trend_months() -> u32 {
    6
}

fn default_monthly_months() -> u32 {
    12
}

fn default_recent_transactions() -> usize {
    5
}

fn default_page_lines() -> usize {
    60
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            top_categories: default_top_categories(),
            trend_months: default_trend_months(),
            monthly_months: default_monthly_months(),
            recent_transactions: default_recent_transactions(),
            page_lines: default_page_lines(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &FinancePaths) -> Result<Self, FinanceError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| FinanceError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                FinanceError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FinancePaths) -> Result<(), FinanceError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| FinanceError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| FinanceError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
