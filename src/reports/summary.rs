//! Financial Report
//!
//! One value holding everything the report view and the document export
//! show for a period: totals, top categories, goal progress, the period's
//! transactions and the chart data. Consumers format it; they never
//! recompute from the raw collections.

use chrono::{DateTime, NaiveDate, Utc};
use std::io::Write;

use super::aggregate::{balance_slices, category_slices, top_categories, CategoryTotal, ChartSlice, TypeTotals};
use super::period::{filter_by_period, DateRange};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Category, Goal, Money, Period, Transaction, TransactionKind};
use crate::storage::Storage;

/// Snapshot of one goal's progress
#[derive(Debug, Clone, PartialEq)]
pub struct GoalProgress {
    pub title: String,
    pub current: Money,
    pub target: Money,
    /// 0..=100
    pub percentage: f64,
    /// Floored at zero
    pub remaining: Money,
    pub completed: bool,
    pub deadline: NaiveDate,
}

impl From<&Goal> for GoalProgress {
    fn from(goal: &Goal) -> Self {
        Self {
            title: goal.title.clone(),
            current: goal.current_amount,
            target: goal.target_amount,
            percentage: goal.progress_percentage(),
            remaining: goal.remaining(),
            completed: goal.completed,
            deadline: goal.deadline,
        }
    }
}

impl GoalProgress {
    pub fn status_label(&self) -> &'static str {
        if self.completed {
            "Completed"
        } else {
            "In progress"
        }
    }
}

/// Report data for one period
#[derive(Debug, Clone)]
pub struct FinancialReport {
    pub period: Period,
    /// Date window the report covers; `None` for all time
    pub range: Option<DateRange>,
    pub totals: TypeTotals,
    pub top_income: Vec<CategoryTotal>,
    pub top_expense: Vec<CategoryTotal>,
    pub goals: Vec<GoalProgress>,
    /// Transactions in the period, newest date first
    pub transactions: Vec<Transaction>,
    /// Income vs. expense
    pub balance_chart: Vec<ChartSlice>,
    /// Expense by category
    pub expense_chart: Vec<ChartSlice>,
    pub generated_at: DateTime<Utc>,
}

impl FinancialReport {
    /// Assemble a report from an already period-filtered transaction list
    pub fn assemble(
        transactions: &[Transaction],
        goals: &[Goal],
        categories: &[Category],
        period: Period,
        today: NaiveDate,
        top_n: usize,
    ) -> Self {
        let totals = TypeTotals::from_transactions(transactions);

        let mut listed = transactions.to_vec();
        listed.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));

        Self {
            period,
            range: period.range(today),
            top_income: top_categories(transactions, TransactionKind::Income, top_n),
            top_expense: top_categories(transactions, TransactionKind::Expense, top_n),
            goals: goals.iter().map(GoalProgress::from).collect(),
            balance_chart: balance_slices(&totals),
            expense_chart: category_slices(transactions, categories, TransactionKind::Expense),
            transactions: listed,
            totals,
            generated_at: Utc::now(),
        }
    }

    /// Load the collections, filter by `period` and assemble
    pub fn generate(storage: &Storage, period: Period, today: NaiveDate, top_n: usize) -> FinanceResult<Self> {
        let all = storage.transactions.get_all()?;
        let filtered = filter_by_period(&all, period, today);
        let goals = storage.goals.get_all()?;
        let categories = storage.categories.get_all()?;

        Ok(Self::assemble(&filtered, &goals, &categories, period, today, top_n))
    }

    pub fn total_income(&self) -> Money {
        self.totals.income
    }

    pub fn total_expense(&self) -> Money {
        self.totals.expense
    }

    pub fn net_balance(&self) -> Money {
        self.totals.net()
    }

    /// Period label with its date window, e.g. "This month (2025-01-01 to 2025-01-31)"
    pub fn period_label(&self) -> String {
        match self.range {
            Some(range) => format!("{} ({} to {})", self.period.label(), range.start, range.end),
            None => self.period.label().to_string(),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let money = |m: Money| m.format_with_symbol(currency);
        let mut output = String::new();

        output.push_str(&format!("Financial Report: {}\n", self.period_label()));
        output.push_str(&"=".repeat(70));
        output.push('\n');
        output.push_str(&format!(
            "Total Income:   {:>16}  ({} transactions)\n",
            money(self.total_income()),
            self.totals.income_count
        ));
        output.push_str(&format!(
            "Total Expense:  {:>16}  ({} transactions)\n",
            money(self.total_expense()),
            self.totals.expense_count
        ));
        output.push_str(&format!("Net Balance:    {:>16}\n", money(self.net_balance())));

        for (title, rows) in [
            ("Top Income Categories", &self.top_income),
            ("Top Expense Categories", &self.top_expense),
        ] {
            output.push_str(&format!("\n{}\n", title));
            output.push_str(&"-".repeat(70));
            output.push('\n');
            if rows.is_empty() {
                output.push_str("  (none)\n");
            }
            for (i, row) in rows.iter().enumerate() {
                output.push_str(&format!(
                    "  {}. {:<30} {:>16} {:>6.1}%\n",
                    i + 1,
                    row.category,
                    money(row.total),
                    row.percentage
                ));
            }
        }

        if !self.goals.is_empty() {
            output.push_str("\nGoals\n");
            output.push_str(&"-".repeat(70));
            output.push('\n');
            for goal in &self.goals {
                output.push_str(&format!(
                    "  {:<24} {:>6.1}%  {} / {}  {}\n",
                    goal.title,
                    goal.percentage,
                    money(goal.current),
                    money(goal.target),
                    goal.status_label()
                ));
            }
        }

        output
    }

    /// Export the report summary to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> FinanceResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        let export_err = |e: csv::Error| FinanceError::Export(e.to_string());
        let amount = |m: Money| format!("{:.2}", m.as_units_f64());

        csv_writer
            .write_record(["Section", "Name", "Amount", "Count", "Percentage"])
            .map_err(export_err)?;

        let summary = [
            ("Total Income", self.total_income(), self.totals.income_count.to_string()),
            ("Total Expense", self.total_expense(), self.totals.expense_count.to_string()),
            ("Net Balance", self.net_balance(), String::new()),
        ];
        for (name, total, count) in summary {
            csv_writer
                .write_record(["Summary".to_string(), name.to_string(), amount(total), count, String::new()])
                .map_err(export_err)?;
        }

        for (section, rows) in [("Top Income", &self.top_income), ("Top Expense", &self.top_expense)] {
            for row in rows {
                csv_writer
                    .write_record([
                        section.to_string(),
                        row.category.clone(),
                        amount(row.total),
                        row.transaction_count.to_string(),
                        format!("{:.2}", row.percentage),
                    ])
                    .map_err(export_err)?;
            }
        }

        for goal in &self.goals {
            csv_writer
                .write_record([
                    "Goal".to_string(),
                    goal.title.clone(),
                    amount(goal.current),
                    String::new(),
                    format!("{:.1}", goal.percentage),
                ])
                .map_err(export_err)?;
        }

        csv_writer
            .flush()
            .map_err(|e| FinanceError::Export(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FinancePaths;
    use crate::models::CategoryKind;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_transactions() -> Vec<Transaction> {
        vec![
            Transaction::income(Money::from_units(3000), "pay", "Salary", date(2025, 1, 5)),
            Transaction::expense(Money::from_units(100), "a", "A", date(2025, 1, 6)),
            Transaction::expense(Money::from_units(100), "b", "B", date(2025, 1, 7)),
            Transaction::expense(Money::from_units(50), "c", "C", date(2025, 1, 8)),
        ]
    }

    #[test]
    fn test_net_matches_sums() {
        let txns = sample_transactions();
        let report = FinancialReport::assemble(&txns, &[], &[], Period::All, date(2025, 1, 10), 5);

        let income: Money = txns.iter().filter(|t| t.is_income()).map(|t| t.amount).sum();
        let expense: Money = txns.iter().filter(|t| t.is_expense()).map(|t| t.amount).sum();
        assert_eq!(report.net_balance(), income - expense);
        assert_eq!(report.net_balance(), Money::from_units(2750));
        assert_eq!(report.net_balance(), TypeTotals::from_transactions(&txns).net());
    }

    #[test]
    fn test_top_expense_order() {
        let report = FinancialReport::assemble(
            &sample_transactions(),
            &[],
            &[],
            Period::All,
            date(2025, 1, 10),
            5,
        );
        let names: Vec<_> = report.top_expense.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(report.top_income.len(), 1);
        assert_eq!(report.totals.expense_count, 3);
    }

    #[test]
    fn test_transactions_sorted_newest_first() {
        let report = FinancialReport::assemble(
            &sample_transactions(),
            &[],
            &[],
            Period::All,
            date(2025, 1, 10),
            5,
        );
        assert_eq!(report.transactions[0].date, date(2025, 1, 8));
        assert_eq!(report.transactions[3].date, date(2025, 1, 5));
    }

    #[test]
    fn test_goal_progress_clamped() {
        let now = Utc::now();
        let over = Goal::new("Over", Money::from_units(100), date(2030, 1, 1))
            .with_initial_amount(Money::from_units(150), now);
        let under = Goal::new("Under", Money::from_units(200), date(2030, 1, 1))
            .with_initial_amount(Money::from_units(50), now);

        let report = FinancialReport::assemble(&[], &[over, under], &[], Period::All, date(2025, 1, 1), 5);

        assert_eq!(report.goals[0].percentage, 100.0);
        assert_eq!(report.goals[0].remaining, Money::zero());
        assert_eq!(report.goals[0].status_label(), "Completed");
        assert_eq!(report.goals[1].percentage, 25.0);
        assert_eq!(report.goals[1].remaining, Money::from_units(150));
    }

    #[test]
    fn test_period_label() {
        let report = FinancialReport::assemble(&[], &[], &[], Period::Month, date(2025, 2, 10), 5);
        assert_eq!(report.period_label(), "This month (2025-02-01 to 2025-02-28)");

        let report = FinancialReport::assemble(&[], &[], &[], Period::All, date(2025, 2, 10), 5);
        assert_eq!(report.period_label(), "All time");
    }

    #[test]
    fn test_generate_filters_by_period() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        storage
            .transactions
            .upsert(Transaction::expense(Money::from_units(10), "in", "Food", date(2025, 3, 3)))
            .unwrap();
        storage
            .transactions
            .upsert(Transaction::expense(Money::from_units(99), "out", "Food", date(2025, 2, 3)))
            .unwrap();

        let report = FinancialReport::generate(&storage, Period::Month, date(2025, 3, 15), 5).unwrap();
        assert_eq!(report.total_expense(), Money::from_units(10));
        assert_eq!(report.transactions.len(), 1);
        assert_eq!(report.expense_chart.len(), 1);
        assert_eq!(report.expense_chart[0].label, "Food");
    }

    #[test]
    fn test_expense_chart_uses_category_colors() {
        let categories = vec![
            Category::new("A", CategoryKind::Expense, "#111111"),
            Category::new("B", CategoryKind::Expense, "#222222"),
        ];
        let report = FinancialReport::assemble(
            &sample_transactions(),
            &[],
            &categories,
            Period::All,
            date(2025, 1, 10),
            5,
        );
        assert_eq!(report.expense_chart.len(), 2);
        assert_eq!(report.expense_chart[1].color, "#222222");
    }

    #[test]
    fn test_format_terminal_and_csv() {
        let report = FinancialReport::assemble(
            &sample_transactions(),
            &[],
            &[],
            Period::All,
            date(2025, 1, 10),
            5,
        );

        let text = report.format_terminal("$");
        assert!(text.contains("Financial Report: All time"));
        assert!(text.contains("$2,750.00"));

        let mut csv = Vec::new();
        report.export_csv(&mut csv).unwrap();
        let csv = String::from_utf8(csv).unwrap();
        assert!(csv.starts_with("Section,Name,Amount,Count,Percentage"));
        assert!(csv.contains("Summary,Net Balance,2750.00,,"));
        assert!(csv.contains("Top Expense,A,100.00,1,40.00"));
    }

    #[test]
    fn test_csv_quotes_names_with_delimiters() {
        let txns = vec![Transaction::expense(
            Money::from_units(10),
            "x",
            "Food, \"Fancy\"",
            date(2025, 1, 8),
        )];
        let goal = Goal::new("Trip, Paris", Money::from_units(100), date(2026, 1, 1));
        let report = FinancialReport::assemble(&txns, &[goal], &[], Period::All, date(2025, 1, 10), 5);

        let mut csv = Vec::new();
        report.export_csv(&mut csv).unwrap();
        let csv = String::from_utf8(csv).unwrap();

        assert!(csv.contains("Top Expense,\"Food, \"\"Fancy\"\"\",10.00,1,100.00"));
        assert!(csv.contains("Goal,\"Trip, Paris\",0.00,,0.0"));
    }

    #[test]
    fn test_assemble_survives_oversized_amounts() {
        let huge = Money::from_cents(i64::MAX / 2 + 1);
        let txns = vec![
            Transaction::income(huge, "a", "Salary", date(2025, 1, 1)),
            Transaction::income(huge, "b", "Salary", date(2025, 1, 2)),
        ];

        let report = FinancialReport::assemble(&txns, &[], &[], Period::All, date(2025, 1, 10), 5);
        assert_eq!(report.total_income().cents(), i64::MAX);
        assert_eq!(report.net_balance().cents(), i64::MAX);
    }

    struct FailingFlush;

    impl Write for FailingFlush {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
        }
    }

    #[test]
    fn test_csv_flush_failure_is_reported() {
        let report = FinancialReport::assemble(&sample_transactions(), &[], &[], Period::All, date(2025, 1, 10), 5);

        let err = report.export_csv(FailingFlush).unwrap_err();
        assert!(matches!(err, FinanceError::Export(msg) if msg.contains("disk full")));
    }
}
