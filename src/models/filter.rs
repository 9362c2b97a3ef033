//! Transient view filters
//!
//! A [`FilterSpec`] narrows a transaction listing by type and by period. It
//! is built from command-line options and never persisted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::transaction::{Transaction, TransactionKind};

/// Filter on transaction kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl TypeFilter {
    pub fn matches(&self, txn: &Transaction) -> bool {
        match self {
            Self::All => true,
            Self::Income => txn.kind == TransactionKind::Income,
            Self::Expense => txn.kind == TransactionKind::Expense,
        }
    }
}

impl FromStr for TypeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(format!("unknown type filter '{}'", other)),
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::All => "all",
            Self::Income => "income",
            Self::Expense => "expense",
        };
        write!(f, "{}", s)
    }
}

/// A named date window anchored to the evaluation date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    All,
    Week,
    Month,
    Year,
}

impl Period {
    /// Human-readable label used in report headers
    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All time",
            Self::Week => "This week",
            Self::Month => "This month",
            Self::Year => "This year",
        }
    }

    /// Lowercase key used in file names
    pub fn key(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            other => Err(format!(
                "unknown period '{}', expected all, week, month or year",
                other
            )),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Combined type and period filter for transaction listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterSpec {
    pub type_filter: TypeFilter,
    pub period: Period,
}

impl FilterSpec {
    pub fn new(type_filter: TypeFilter, period: Period) -> Self {
        Self {
            type_filter,
            period,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;

    #[test]
    fn test_period_parse_and_display() {
        for period in [Period::All, Period::Week, Period::Month, Period::Year] {
            assert_eq!(period.to_string().parse::<Period>(), Ok(period));
        }
        assert_eq!("MONTH".parse::<Period>(), Ok(Period::Month));
        assert!("quarter".parse::<Period>().is_err());
    }

    #[test]
    fn test_type_filter_matches() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let income = Transaction::income(Money::from_units(1), "a", "Salary", date);
        let expense = Transaction::expense(Money::from_units(1), "b", "Food", date);

        assert!(TypeFilter::All.matches(&income));
        assert!(TypeFilter::Income.matches(&income));
        assert!(!TypeFilter::Income.matches(&expense));
        assert!(TypeFilter::Expense.matches(&expense));
    }

    #[test]
    fn test_defaults() {
        let spec = FilterSpec::default();
        assert_eq!(spec.type_filter, TypeFilter::All);
        assert_eq!(spec.period, Period::All);
    }
}
