//! Report document export
//!
//! Writes a [`FinancialReport`] as a paginated plain-text document: header,
//! summary panels, the two breakdown charts, the period's transactions and
//! the goal table. Only one export runs at a time per [`ReportExporter`].

use chrono::Local;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::display::chart::{render_breakdown, ChartStyle};
use crate::display::report::{double_separator, format_header, format_percentage, separator, truncate};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Money, Period};
use crate::reports::FinancialReport;

const WIDTH: usize = 78;
const PANEL_WIDTH: usize = 24;
/// Footer lines reserved on every page
const FOOTER_LINES: usize = 2;

/// Name of the document written for `period` on `date`
pub fn document_file_name(period: Period, date: chrono::NaiveDate) -> String {
    format!("finance-report-{}-{}.txt", period.key(), date.format("%Y-%m-%d"))
}

/// Resets the busy flag when dropped
struct BusyGuard<'a> {
    busy: &'a AtomicBool,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

/// Exports report documents, rejecting overlapping exports
#[derive(Debug)]
pub struct ReportExporter {
    busy: AtomicBool,
    page_lines: usize,
    currency: String,
    date_format: String,
}

impl ReportExporter {
    pub fn new(page_lines: usize, currency: impl Into<String>, date_format: impl Into<String>) -> Self {
        Self {
            busy: AtomicBool::new(false),
            page_lines,
            currency: currency.into(),
            date_format: date_format.into(),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    fn begin(&self) -> FinanceResult<BusyGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| FinanceError::ExportInProgress)?;
        Ok(BusyGuard { busy: &self.busy })
    }

    /// Render and write the document into `output_dir`, returning its path
    pub fn export(&self, report: &FinancialReport, output_dir: &Path) -> FinanceResult<PathBuf> {
        let _guard = self.begin()?;

        let pages = self.render_pages(report);

        std::fs::create_dir_all(output_dir)?;
        let generated_on = report.generated_at.with_timezone(&Local).date_naive();
        let path = output_dir.join(document_file_name(report.period, generated_on));
        std::fs::write(&path, pages.join("\x0c\n"))?;

        tracing::info!(
            path = %path.display(),
            pages = pages.len(),
            transactions = report.transactions.len(),
            "exported report document"
        );

        Ok(path)
    }

    /// Render the document as a list of pages, each ending with its
    /// "Page i of n" footer
    pub fn render_pages(&self, report: &FinancialReport) -> Vec<String> {
        let body = self.render_body(report);
        let per_page = self.page_lines.saturating_sub(FOOTER_LINES).max(1);

        let chunks: Vec<&[String]> = body.chunks(per_page).collect();
        let total = chunks.len();

        chunks
            .into_iter()
            .enumerate()
            .map(|(i, lines)| {
                let mut page = lines.join("\n");
                page.push_str(&format!("\n\n{:>width$}\n", format!("Page {} of {}", i + 1, total), width = WIDTH));
                page
            })
            .collect()
    }

    fn money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency)
    }

    fn render_body(&self, report: &FinancialReport) -> Vec<String> {
        let mut lines = Vec::new();

        lines.push(format_header("FINANCIAL REPORT", WIDTH));
        lines.push(format_header(&report.period_label(), WIDTH));
        lines.push(double_separator(WIDTH));
        lines.push(String::new());

        lines.extend(self.summary_panels(report));
        lines.push(String::new());

        let style = ChartStyle::plain(self.currency.clone());
        for (title, slices) in [
            ("Income vs. Expenses", &report.balance_chart),
            ("Expenses by Category", &report.expense_chart),
        ] {
            match render_breakdown(title, slices, &style) {
                Ok(chart) => {
                    lines.extend(chart.lines().map(str::to_string));
                    lines.push(String::new());
                }
                Err(e) => {
                    tracing::warn!(chart = title, error = %e, "omitting chart from report document");
                }
            }
        }

        lines.push("Transactions".to_string());
        lines.push(separator(WIDTH));
        if report.transactions.is_empty() {
            lines.push("No transactions in this period.".to_string());
        } else {
            lines.extend(self.transaction_table(report).lines().map(str::to_string));
        }
        lines.push(String::new());

        if !report.goals.is_empty() {
            lines.push("Savings Goals".to_string());
            lines.push(separator(WIDTH));
            lines.extend(self.goal_table(report).lines().map(str::to_string));
            lines.push(String::new());
        }

        lines.push(format!(
            "Generated at {}",
            report
                .generated_at
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
        ));

        lines
    }

    fn summary_panels(&self, report: &FinancialReport) -> Vec<String> {
        let panels = [
            (
                "Total Income",
                self.money(report.total_income()),
                format!("{} transactions", report.totals.income_count),
            ),
            (
                "Total Expenses",
                self.money(report.total_expense()),
                format!("{} transactions", report.totals.expense_count),
            ),
            (
                "Net Balance",
                self.money(report.net_balance()),
                if report.net_balance().is_negative() {
                    "deficit".to_string()
                } else {
                    "surplus".to_string()
                },
            ),
        ];

        let border = |left: &str, right: &str| {
            vec![format!("{}{}{}", left, "─".repeat(PANEL_WIDTH), right); panels.len()].join(" ")
        };
        let row = |cell: &dyn Fn(usize) -> String| {
            (0..panels.len())
                .map(|i| format!("│ {:<width$} │", truncate(&cell(i), PANEL_WIDTH - 2), width = PANEL_WIDTH - 2))
                .collect::<Vec<_>>()
                .join(" ")
        };

        vec![
            border("┌", "┐"),
            row(&|i| panels[i].0.to_string()),
            row(&|i| panels[i].1.clone()),
            row(&|i| panels[i].2.clone()),
            border("└", "┘"),
        ]
    }

    fn transaction_table(&self, report: &FinancialReport) -> String {
        #[derive(Tabled)]
        struct Row {
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

        let rows = report.transactions.iter().map(|t| Row {
            date: t.date.format(&self.date_format).to_string(),
            description: truncate(&t.description, 28),
            category: truncate(&t.category, 16),
            kind: t.kind.label(),
            amount: self.money(t.signed_amount()),
        });

        Table::new(rows).with(Style::ascii()).to_string()
    }

    fn goal_table(&self, report: &FinancialReport) -> String {
        #[derive(Tabled)]
        struct Row {
            #[tabled(rename = "Goal")]
            title: String,
            #[tabled(rename = "Saved")]
            current: String,
            #[tabled(rename = "Target")]
            target: String,
            #[tabled(rename = "Progress")]
            progress: String,
            #[tabled(rename = "Remaining")]
            remaining: String,
            #[tabled(rename = "Deadline")]
            deadline: String,
            #[tabled(rename = "Status")]
            status: &'static str,
        }

        let rows = report.goals.iter().map(|g| Row {
            title: truncate(&g.title, 20),
            current: self.money(g.current),
            target: self.money(g.target),
            progress: format_percentage(g.percentage),
            remaining: self.money(g.remaining),
            deadline: g.deadline.format(&self.date_format).to_string(),
            status: g.status_label(),
        });

        Table::new(rows).with(Style::ascii()).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Goal, Transaction};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 14).unwrap()
    }

    fn exporter(page_lines: usize) -> ReportExporter {
        ReportExporter::new(page_lines, "$", "%Y-%m-%d")
    }

    fn report(transactions: &[Transaction], goals: &[Goal]) -> FinancialReport {
        FinancialReport::assemble(
            transactions,
            goals,
            &Category::defaults(),
            Period::Month,
            today(),
            5,
        )
    }

    fn sample_transactions() -> Vec<Transaction> {
        vec![
            Transaction::income(Money::from_units(3000), "Paycheck", "Salary", today()),
            Transaction::expense(Money::from_units(1200), "Rent", "Housing", today()),
            Transaction::expense(Money::from_units(300), "Groceries", "Food", today()),
        ]
    }

    #[test]
    fn test_file_name() {
        assert_eq!(
            document_file_name(Period::Month, today()),
            "finance-report-month-2025-02-14.txt"
        );
    }

    #[test]
    fn test_export_writes_document() {
        let temp_dir = TempDir::new().unwrap();
        let goals = vec![Goal::new("Car", Money::from_units(8000), today())];
        let report = report(&sample_transactions(), &goals);

        let path = exporter(60).export(&report, temp_dir.path()).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();

        assert!(path.file_name().unwrap().to_str().unwrap().starts_with("finance-report-month-"));
        assert!(content.contains("FINANCIAL REPORT"));
        assert!(content.contains("This month (2025-02-01 to 2025-02-28)"));
        assert!(content.contains("Total Income"));
        assert!(content.contains("$1,500.00"));
        assert!(content.contains("Expenses by Category"));
        assert!(content.contains("Paycheck"));
        assert!(content.contains("Savings Goals"));
        assert!(content.contains("Generated at "));
        assert!(content.contains("Page 1 of"));
    }

    #[test]
    fn test_empty_report_omits_charts_and_goals() {
        let pages = exporter(60).render_pages(&report(&[], &[]));
        let content = pages.join("");

        assert_eq!(pages.len(), 1);
        assert!(content.contains("No transactions in this period."));
        assert!(!content.contains("Income vs. Expenses"));
        assert!(!content.contains("Savings Goals"));
        assert!(content.contains("Page 1 of 1"));
    }

    #[test]
    fn test_pagination() {
        let transactions: Vec<_> = (0..40)
            .map(|i| Transaction::expense(Money::from_units(i + 1), format!("item {}", i), "Food", today()))
            .collect();
        let pages = exporter(20).render_pages(&report(&transactions, &[]));

        assert!(pages.len() > 3);
        let total = pages.len();
        for (i, page) in pages.iter().enumerate() {
            assert!(page.contains(&format!("Page {} of {}", i + 1, total)));
            assert!(page.lines().count() <= 20);
        }
        assert!(pages.last().unwrap().contains("Generated at "));
    }

    #[test]
    fn test_overlapping_export_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let exporter = exporter(60);
        let report = report(&sample_transactions(), &[]);

        let guard = exporter.begin().unwrap();
        assert!(exporter.is_busy());
        assert!(matches!(
            exporter.export(&report, temp_dir.path()),
            Err(FinanceError::ExportInProgress)
        ));

        drop(guard);
        assert!(!exporter.is_busy());
        assert!(exporter.export(&report, temp_dir.path()).is_ok());
    }

    #[test]
    fn test_busy_flag_reset_after_failure() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("not-a-dir");
        std::fs::write(&blocker, "x").unwrap();
        let exporter = exporter(60);

        assert!(exporter.export(&report(&[], &[]), &blocker).is_err());
        assert!(!exporter.is_busy());
    }
}
