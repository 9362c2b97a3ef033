//! Text chart rendering
//!
//! Renders category breakdowns, grouped monthly income/expense bars and the
//! cumulative balance trend as plain text. Colors are applied with 24-bit
//! ANSI escapes when `ChartStyle::ansi` is set, so the same charts can be
//! written to files without escape codes.

use super::report::{format_bar, format_percentage, paint_hex, truncate};
use crate::error::{FinanceError, FinanceResult};
use crate::models::Money;
use crate::reports::aggregate::{EXPENSE_COLOR, INCOME_COLOR};
use crate::reports::{ChartSlice, MonthlyEntry};

/// Rendering options
#[derive(Debug, Clone)]
pub struct ChartStyle {
    /// Width of the bar area in cells
    pub bar_width: usize,
    pub ansi: bool,
    pub currency: String,
}

impl ChartStyle {
    pub fn terminal(currency: impl Into<String>) -> Self {
        Self {
            bar_width: 30,
            ansi: true,
            currency: currency.into(),
        }
    }

    pub fn plain(currency: impl Into<String>) -> Self {
        Self {
            bar_width: 30,
            ansi: false,
            currency: currency.into(),
        }
    }

    fn paint(&self, text: &str, color: &str) -> String {
        if self.ansi {
            paint_hex(text, color)
        } else {
            text.to_string()
        }
    }

    fn money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency)
    }
}

fn no_data(title: &str) -> FinanceError {
    FinanceError::Export(format!("no data to render for chart '{}'", title))
}

/// Horizontal bars, one per slice, scaled to the largest slice.
///
/// Fails when there is nothing positive to draw.
pub fn render_breakdown(title: &str, slices: &[ChartSlice], style: &ChartStyle) -> FinanceResult<String> {
    let total: Money = slices.iter().map(|s| s.value).sum();
    let max = slices.iter().map(|s| s.value).max().unwrap_or_default();
    if !max.is_positive() {
        return Err(no_data(title));
    }

    let label_width = slices
        .iter()
        .map(|s| s.label.chars().count())
        .max()
        .unwrap_or(0)
        .min(20);

    let mut output = format!("{}\n", title);
    for slice in slices {
        let bar = format_bar(slice.value.as_units_f64(), max.as_units_f64(), style.bar_width);
        output.push_str(&format!(
            "  {} {:<width$} {} {:>14} {:>6}\n",
            style.paint("■", &slice.color),
            truncate(&slice.label, label_width),
            style.paint(&bar, &slice.color),
            style.money(slice.value),
            format_percentage(slice.value.percent_of(total)),
            width = label_width
        ));
    }

    Ok(output)
}

/// Paired income/expense bars per month, scaled to the largest value
pub fn render_monthly(title: &str, entries: &[MonthlyEntry], style: &ChartStyle) -> FinanceResult<String> {
    if entries.is_empty() {
        return Err(no_data(title));
    }

    let max = entries
        .iter()
        .flat_map(|e| [e.income, e.expense])
        .max()
        .unwrap_or_default()
        .as_units_f64();

    let mut output = format!(
        "{}\n  {} Income  {} Expense\n",
        title,
        style.paint("█", INCOME_COLOR),
        style.paint("█", EXPENSE_COLOR)
    );

    for entry in entries {
        let income_bar = format_bar(entry.income.as_units_f64(), max, style.bar_width);
        let expense_bar = format_bar(entry.expense.as_units_f64(), max, style.bar_width);
        output.push_str(&format!(
            "  {:<6} {} {:>14}\n",
            entry.label(),
            style.paint(&income_bar, INCOME_COLOR),
            style.money(entry.income)
        ));
        output.push_str(&format!(
            "  {:<6} {} {:>14}\n",
            "",
            style.paint(&expense_bar, EXPENSE_COLOR),
            style.money(entry.expense)
        ));
    }

    Ok(output)
}

/// Bar around a center axis: negative values grow left, positive right
fn diverging_bar(value: f64, max_abs: f64, half: usize) -> String {
    let filled = if max_abs > 0.0 {
        ((value.abs() / max_abs) * half as f64).round() as usize
    } else {
        0
    }
    .min(half);

    if value < 0.0 {
        format!(
            "{}{}│{}",
            " ".repeat(half - filled),
            "█".repeat(filled),
            " ".repeat(half)
        )
    } else {
        format!(
            "{}│{}{}",
            " ".repeat(half),
            "█".repeat(filled),
            " ".repeat(half - filled)
        )
    }
}

/// Monthly net and cumulative balance, with the cumulative drawn as a
/// diverging bar
pub fn render_trend(title: &str, entries: &[MonthlyEntry], style: &ChartStyle) -> FinanceResult<String> {
    if entries.is_empty() {
        return Err(no_data(title));
    }

    let max_abs = entries
        .iter()
        .map(|e| e.cumulative.abs())
        .max()
        .unwrap_or_default()
        .as_units_f64();
    let half = (style.bar_width / 2).max(1);

    let mut output = format!(
        "{}\n  {:<6} {:>14} {:>14}\n",
        title, "Month", "Net", "Balance"
    );

    for entry in entries {
        let color = if entry.cumulative.is_negative() {
            EXPENSE_COLOR
        } else {
            INCOME_COLOR
        };
        let bar = diverging_bar(entry.cumulative.as_units_f64(), max_abs, half);
        output.push_str(&format!(
            "  {:<6} {:>14} {:>14} {}\n",
            entry.label(),
            style.money(entry.net),
            style.money(entry.cumulative),
            style.paint(&bar, color)
        ));
    }

    Ok(output)
}
