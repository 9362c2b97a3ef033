//! Report CLI commands

use chrono::NaiveDate;
use clap::Subcommand;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use crate::config::settings::Settings;
use crate::error::{FinanceError, FinanceResult};
use crate::export::ReportExporter;
use crate::models::Period;
use crate::reports::FinancialReport;
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Show the financial report for a period
    Show {
        /// Period (all, week, month, year)
        #[arg(short, long, default_value = "month")]
        period: Period,
        /// Also export the summary to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Write the report as a paginated document
    Pdf {
        /// Period (all, week, month, year)
        #[arg(short, long, default_value = "month")]
        period: Period,
        /// Output directory, defaults to the reports directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    today: NaiveDate,
    cmd: ReportCommands,
) -> FinanceResult<()> {
    match cmd {
        ReportCommands::Show { period, csv } => {
            let report = FinancialReport::generate(storage, period, today, settings.top_categories)?;
            print!("{}", report.format_terminal(&settings.currency_symbol));

            if let Some(path) = csv {
                let file = File::create(&path).map_err(|e| {
                    FinanceError::Export(format!("Failed to create file {}: {}", path.display(), e))
                })?;
                let mut writer = BufWriter::new(file);
                report.export_csv(&mut writer)?;
                writer.flush().map_err(|e| {
                    FinanceError::Export(format!("Failed to write {}: {}", path.display(), e))
                })?;
                println!();
                println!("Report exported to: {}", path.display());
            }
        }

        ReportCommands::Pdf { period, output } => {
            let report = FinancialReport::generate(storage, period, today, settings.top_categories)?;
            let output_dir = output.unwrap_or_else(|| storage.paths().reports_dir());

            let exporter = ReportExporter::new(
                settings.page_lines,
                settings.currency_symbol.clone(),
                settings.date_format.clone(),
            );
            let path = exporter.export(&report, &output_dir)?;
            println!("Report written to: {}", path.display());
        }
    }

    Ok(())
}
