//! Dashboard summary
//!
//! All-time totals, goal completion, the most recently recorded
//! transactions and the two breakdown charts.

use super::aggregate::{balance_slices, category_slices, ChartSlice, TypeTotals};
use crate::error::FinanceResult;
use crate::models::{Category, Goal, Transaction, TransactionKind};
use crate::storage::Storage;

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub totals: TypeTotals,
    pub completed_goals: usize,
    pub total_goals: usize,
    /// Most recently created transactions, newest first
    pub recent: Vec<Transaction>,
    pub balance_chart: Vec<ChartSlice>,
    pub expense_chart: Vec<ChartSlice>,
}

impl Dashboard {
    pub fn assemble(
        transactions: &[Transaction],
        categories: &[Category],
        goals: &[Goal],
        recent_count: usize,
    ) -> Self {
        let totals = TypeTotals::from_transactions(transactions);

        let mut recent = transactions.to_vec();
        recent.reverse();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent.truncate(recent_count);

        Self {
            completed_goals: goals.iter().filter(|g| g.completed).count(),
            total_goals: goals.len(),
            recent,
            balance_chart: balance_slices(&totals),
            expense_chart: category_slices(transactions, categories, TransactionKind::Expense),
            totals,
        }
    }

    pub fn generate(storage: &Storage, recent_count: usize) -> FinanceResult<Self> {
        Ok(Self::assemble(
            &storage.transactions.get_all()?,
            &storage.categories.get_all()?,
            &storage.goals.get_all()?,
            recent_count,
        ))
    }
}
