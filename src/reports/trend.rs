//! Monthly trend series
//!
//! Builds one entry per calendar month over a trailing window ending with
//! the month of `today`, with a running balance that starts at zero at the
//! beginning of the window.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::period::DateRange;
use crate::models::{Money, Transaction, TransactionKind};

/// Income, expense and balance for one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyEntry {
    pub year: i32,
    pub month: u32,
    pub income: Money,
    pub expense: Money,
    pub net: Money,
    /// Sum of `net` for this and every earlier month in the window
    pub cumulative: Money,
}

impl MonthlyEntry {
    /// Short axis label, e.g. "Jan 25"
    pub fn label(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.format("%b %y").to_string())
            .unwrap_or_else(|| format!("{:04}-{:02}", self.year, self.month))
    }
}

fn month_from_index(index: i32) -> (i32, u32) {
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

/// Build the trailing `months`-month series ending with `today`'s month.
///
/// Months with no transactions yield zeros. Transactions outside the
/// window are ignored.
pub fn build_trend(transactions: &[Transaction], months: u32, today: NaiveDate) -> Vec<MonthlyEntry> {
    let current = today.year() * 12 + today.month0() as i32;
    let first = current - months as i32 + 1;

    let mut cumulative = Money::zero();
    (first..=current)
        .filter_map(|index| {
            let (year, month) = month_from_index(index);
            let range = DateRange::month_of(NaiveDate::from_ymd_opt(year, month, 1)?);

            let (income, expense) = transactions
                .iter()
                .filter(|t| range.contains(t.date))
                .fold((Money::zero(), Money::zero()), |(inc, exp), t| match t.kind {
                    TransactionKind::Income => (inc + t.amount, exp),
                    TransactionKind::Expense => (inc, exp + t.amount),
                });

            let net = income - expense;
            cumulative += net;

            Some(MonthlyEntry {
                year,
                month,
                income,
                expense,
                net,
                cumulative,
            })
        })
        .collect()
}

/// Summary statistics over a monthly series
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendStats {
    pub max_income: Money,
    pub max_expense: Money,
    /// Mean monthly net, truncated to whole cents
    pub average_net: Money,
    /// Month with the highest net; the earliest wins ties
    pub best_month: Option<MonthlyEntry>,
    /// Cumulative balance of the last month, zero for an empty series
    pub current_balance: Money,
}

impl TrendStats {
    pub fn from_entries(entries: &[MonthlyEntry]) -> Self {
        let max_income = entries.iter().map(|e| e.income).max().unwrap_or_default();
        let max_expense = entries.iter().map(|e| e.expense).max().unwrap_or_default();

        let average_net = if entries.is_empty() {
            Money::zero()
        } else {
            let total: Money = entries.iter().map(|e| e.net).sum();
            Money::from_cents(total.cents() / entries.len() as i64)
        };

        let best_month = entries
            .iter()
            .fold(None::<&MonthlyEntry>, |best, e| match best {
                Some(b) if b.net >= e.net => Some(b),
                _ => Some(e),
            })
            .cloned();

        let current_balance = entries.last().map(|e| e.cumulative).unwrap_or_default();

        Self {
            max_income,
            max_expense,
            average_net,
            best_month,
            current_balance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Vec<Transaction> {
        vec![
            Transaction::income(Money::from_units(1000), "pay", "Salary", date(2024, 11, 5)),
            Transaction::expense(Money::from_units(400), "rent", "Housing", date(2024, 11, 6)),
            Transaction::expense(Money::from_units(700), "trip", "Entertainment", date(2025, 1, 2)),
            Transaction::income(Money::from_units(300), "gig", "Freelance", date(2025, 2, 28)),
            // Outside a six-month window ending Feb 2025
            Transaction::income(Money::from_units(9999), "old", "Salary", date(2024, 8, 31)),
        ]
    }

    #[test]
    fn test_window_spans_year_boundary() {
        let entries = build_trend(&sample(), 6, date(2025, 2, 15));
        let months: Vec<_> = entries.iter().map(|e| (e.year, e.month)).collect();
        assert_eq!(
            months,
            vec![(2024, 9), (2024, 10), (2024, 11), (2024, 12), (2025, 1), (2025, 2)]
        );
    }

    #[test]
    fn test_empty_months_are_zero() {
        let entries = build_trend(&sample(), 6, date(2025, 2, 15));
        assert_eq!(entries[0].income, Money::zero());
        assert_eq!(entries[0].net, Money::zero());
        assert_eq!(entries[3].cumulative, Money::from_units(600));
    }

    #[test]
    fn test_cumulative_is_prefix_sum_of_nets() {
        let entries = build_trend(&sample(), 6, date(2025, 2, 15));
        let mut running = Money::zero();
        for entry in &entries {
            running += entry.net;
            assert_eq!(entry.cumulative, running);
        }
        assert_eq!(entries.last().unwrap().cumulative, Money::from_units(200));
    }

    #[test]
    fn test_zero_months() {
        assert!(build_trend(&sample(), 0, date(2025, 2, 15)).is_empty());
    }

    #[test]
    fn test_label() {
        let entries = build_trend(&[], 1, date(2025, 3, 9));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].label(), "Mar 25");
    }

    #[test]
    fn test_stats() {
        let entries = build_trend(&sample(), 6, date(2025, 2, 15));
        let stats = TrendStats::from_entries(&entries);

        assert_eq!(stats.max_income, Money::from_units(1000));
        assert_eq!(stats.max_expense, Money::from_units(700));
        assert_eq!(stats.current_balance, Money::from_units(200));
        // (600 - 700 + 300) / 6 months
        assert_eq!(stats.average_net, Money::from_cents(3333));
        let best = stats.best_month.unwrap();
        assert_eq!((best.year, best.month), (2024, 11));
    }

    #[test]
    fn test_stats_best_month_tie_keeps_earliest() {
        let entries = build_trend(&[], 3, date(2025, 2, 15));
        let stats = TrendStats::from_entries(&entries);
        let best = stats.best_month.unwrap();
        assert_eq!((best.year, best.month), (2024, 12));
    }

    #[test]
    fn test_stats_empty() {
        let stats = TrendStats::from_entries(&[]);
        assert_eq!(stats.current_balance, Money::zero());
        assert!(stats.best_month.is_none());
    }
}
