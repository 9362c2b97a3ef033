//! Dashboard and trend views

use super::chart::{render_breakdown, render_monthly, render_trend, ChartStyle};
use super::report::{double_separator, format_money_colored, separator};
use super::transaction::format_transaction_list;
use crate::reports::{Dashboard, MonthlyEntry, TrendStats};

const WIDTH: usize = 70;

/// Charts with no data are replaced by a short note.
fn chart_or_note(chart: crate::error::FinanceResult<String>, note: &str) -> String {
    chart.unwrap_or_else(|_| format!("{}\n", note))
}

pub fn format_dashboard(dashboard: &Dashboard, style: &ChartStyle, date_format: &str) -> String {
    let currency = style.currency.as_str();
    let mut output = String::new();

    output.push_str("Dashboard\n");
    output.push_str(&double_separator(WIDTH));
    output.push('\n');

    output.push_str(&format!(
        "{:<16} {}\n",
        "Income:",
        format_money_colored(dashboard.totals.income, currency)
    ));
    output.push_str(&format!(
        "{:<16} {}\n",
        "Expenses:",
        format_money_colored(-dashboard.totals.expense, currency)
    ));
    output.push_str(&format!(
        "{:<16} {}\n",
        "Balance:",
        format_money_colored(dashboard.totals.net(), currency)
    ));
    output.push_str(&format!(
        "{:<16} {}/{} completed\n",
        "Goals:", dashboard.completed_goals, dashboard.total_goals
    ));
    output.push('\n');

    output.push_str(&chart_or_note(
        render_breakdown("Income vs. Expenses", &dashboard.balance_chart, style),
        "No transactions recorded yet.",
    ));
    output.push('\n');
    output.push_str(&chart_or_note(
        render_breakdown("Expenses by Category", &dashboard.expense_chart, style),
        "No expenses recorded yet.",
    ));
    output.push('\n');

    output.push_str("Recent Transactions\n");
    output.push_str(&separator(WIDTH));
    output.push('\n');
    output.push_str(&format_transaction_list(&dashboard.recent, currency, date_format));

    output
}

pub fn format_monthly(entries: &[MonthlyEntry], style: &ChartStyle) -> String {
    chart_or_note(
        render_monthly("Monthly Income and Expenses", entries, style),
        "No months to show.",
    )
}

pub fn format_trend(entries: &[MonthlyEntry], style: &ChartStyle) -> String {
    let currency = style.currency.as_str();
    let stats = TrendStats::from_entries(entries);

    let mut output = chart_or_note(render_trend("Balance Trend", entries, style), "No months to show.");
    output.push('\n');
    output.push_str(&format!(
        "{:<18} {}\n",
        "Highest income:",
        stats.max_income.format_with_symbol(currency)
    ));
    output.push_str(&format!(
        "{:<18} {}\n",
        "Highest expenses:",
        stats.max_expense.format_with_symbol(currency)
    ));
    output.push_str(&format!(
        "{:<18} {}\n",
        "Average net:",
        stats.average_net.format_with_symbol(currency)
    ));
    if let Some(best) = &stats.best_month {
        output.push_str(&format!(
            "{:<18} {} ({})\n",
            "Best month:",
            best.label(),
            best.net.format_with_symbol(currency)
        ));
    }
    output.push_str(&format!(
        "{:<18} {}\n",
        "Current balance:",
        format_money_colored(stats.current_balance, currency)
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money, Transaction};
    use crate::reports::build_trend;
    use chrono::NaiveDate;

    fn style() -> ChartStyle {
        ChartStyle::plain("$")
    }

    #[test]
    fn test_empty_dashboard() {
        let dashboard = Dashboard::assemble(&[], &Category::defaults(), &[], 5);
        let output = format_dashboard(&dashboard, &style(), "%Y-%m-%d");

        assert!(output.contains("0/0 completed"));
        assert!(output.contains("No transactions recorded yet."));
        assert!(output.contains("No transactions found."));
    }

    #[test]
    fn test_dashboard_with_data() {
        let date = NaiveDate::from_ymd_opt(2025, 2, 3).unwrap();
        let txns = vec![
            Transaction::income(Money::from_units(2000), "Pay", "Salary", date),
            Transaction::expense(Money::from_units(500), "Rent", "Housing", date),
        ];
        let dashboard = Dashboard::assemble(&txns, &Category::defaults(), &[], 5);
        let output = format_dashboard(&dashboard, &style(), "%Y-%m-%d");

        assert!(output.contains("Expenses by Category"));
        assert!(output.contains("Housing"));
        assert!(output.contains("Rent"));
    }

    #[test]
    fn test_trend_stats_block() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        let txns = vec![Transaction::income(
            Money::from_units(300),
            "Bonus",
            "Salary",
            NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
        )];
        let output = format_trend(&build_trend(&txns, 3, today), &style());

        assert!(output.contains("Feb 25 ($300.00)"));
        assert!(output.lines().any(|l| l.starts_with("Average net:") && l.ends_with("$100.00")));
    }
}
