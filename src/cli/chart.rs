//! Dashboard and chart CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::chart::ChartStyle;
use crate::display::dashboard::{format_dashboard, format_monthly, format_trend};
use crate::error::FinanceResult;
use crate::reports::{build_trend, Dashboard};
use crate::storage::Storage;

/// Chart subcommands
#[derive(Subcommand)]
pub enum ChartCommands {
    /// Income and expenses per month
    Monthly {
        /// Number of trailing months, defaults to the configured value
        #[arg(short, long)]
        months: Option<u32>,
    },

    /// Cumulative balance per month with summary statistics
    Trend {
        /// Number of trailing months, defaults to the configured value
        #[arg(short, long)]
        months: Option<u32>,
    },
}

fn style(settings: &Settings, plain: bool) -> ChartStyle {
    if plain {
        ChartStyle::plain(settings.currency_symbol.clone())
    } else {
        ChartStyle::terminal(settings.currency_symbol.clone())
    }
}

pub fn handle_dashboard_command(storage: &Storage, settings: &Settings, plain: bool) -> FinanceResult<()> {
    let dashboard = Dashboard::generate(storage, settings.recent_transactions)?;
    print!(
        "{}",
        format_dashboard(&dashboard, &style(settings, plain), &settings.date_format)
    );
    Ok(())
}

pub fn handle_chart_command(
    storage: &Storage,
    settings: &Settings,
    today: NaiveDate,
    plain: bool,
    cmd: ChartCommands,
) -> FinanceResult<()> {
    let transactions = storage.transactions.get_all()?;
    let style = style(settings, plain);

    match cmd {
        ChartCommands::Monthly { months } => {
            let entries = build_trend(&transactions, months.unwrap_or(settings.monthly_months), today);
            print!("{}", format_monthly(&entries, &style));
        }
        ChartCommands::Trend { months } => {
            let entries = build_trend(&transactions, months.unwrap_or(settings.trend_months), today);
            print!("{}", format_trend(&entries, &style));
        }
    }

    Ok(())
}
