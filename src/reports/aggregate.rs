//! Aggregation over transactions
//!
//! Sums by kind and by category, top-N rankings, and the slices fed to the
//! breakdown charts.

use serde::Serialize;

use crate::models::{Category, Money, Transaction, TransactionKind};

/// Chart color for the income slice
pub const INCOME_COLOR: &str = "#10B981";
/// Chart color for the expense slice
pub const EXPENSE_COLOR: &str = "#EF4444";

/// Totals partitioned by transaction kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TypeTotals {
    pub income: Money,
    pub expense: Money,
    pub income_count: usize,
    pub expense_count: usize,
}

impl TypeTotals {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        transactions.iter().fold(Self::default(), |mut acc, txn| {
            match txn.kind {
                TransactionKind::Income => {
                    acc.income += txn.amount;
                    acc.income_count += 1;
                }
                TransactionKind::Expense => {
                    acc.expense += txn.amount;
                    acc.expense_count += 1;
                }
            }
            acc
        })
    }

    /// Income minus expense
    pub fn net(&self) -> Money {
        self.income - self.expense
    }
}

/// Sum of one kind of transaction within one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Money,
    pub transaction_count: usize,
    /// Share of the kind's total, 0..=100
    pub percentage: f64,
}

/// Group transactions of `kind` by category name.
///
/// Groups appear in the order their category is first seen; names compare
/// case-insensitively and keep the first spelling. Categories with no
/// matching transactions are absent.
pub fn totals_by_category(transactions: &[Transaction], kind: TransactionKind) -> Vec<CategoryTotal> {
    let mut groups: Vec<CategoryTotal> = Vec::new();

    for txn in transactions.iter().filter(|t| t.kind == kind) {
        match groups.iter_mut().find(|g| txn.uses_category(&g.category)) {
            Some(group) => {
                group.total += txn.amount;
                group.transaction_count += 1;
            }
            None => groups.push(CategoryTotal {
                category: txn.category.clone(),
                total: txn.amount,
                transaction_count: 1,
                percentage: 0.0,
            }),
        }
    }

    let kind_total: Money = groups.iter().map(|g| g.total).sum();
    for group in &mut groups {
        group.percentage = group.total.percent_of(kind_total);
    }

    groups
}

/// The `n` largest categories of `kind`, largest first.
///
/// Equal totals keep first-seen order.
pub fn top_categories(transactions: &[Transaction], kind: TransactionKind, n: usize) -> Vec<CategoryTotal> {
    let mut groups = totals_by_category(transactions, kind);
    // sort_by is stable
    groups.sort_by(|a, b| b.total.cmp(&a.total));
    groups.truncate(n);
    groups
}

/// One labelled, colored value in a breakdown chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSlice {
    pub label: String,
    pub value: Money,
    pub color: String,
}

impl ChartSlice {
    pub fn new(label: impl Into<String>, value: Money, color: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value,
            color: color.into(),
        }
    }
}

/// Income vs. expense slices with their fixed colors
pub fn balance_slices(totals: &TypeTotals) -> Vec<ChartSlice> {
    vec![
        ChartSlice::new("Income", totals.income, INCOME_COLOR),
        ChartSlice::new("Expense", totals.expense, EXPENSE_COLOR),
    ]
}

/// Per-category slices for transactions of `kind`.
///
/// Walks `categories` in collection order, considers those usable for
/// `kind`, and keeps only positive totals. Transactions whose category name
/// matches no category are not shown.
pub fn category_slices(
    transactions: &[Transaction],
    categories: &[Category],
    kind: TransactionKind,
) -> Vec<ChartSlice> {
    categories
        .iter()
        .filter(|c| c.accepts(kind))
        .filter_map(|category| {
            let value: Money = transactions
                .iter()
                .filter(|t| t.kind == kind && t.uses_category(&category.name))
                .map(|t| t.amount)
                .sum();
            value
                .is_positive()
                .then(|| ChartSlice::new(category.name.clone(), value, category.color.clone()))
        })
        .collect()
}
