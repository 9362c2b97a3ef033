//! CLI commands for data export
//!
//! Provides commands for exporting data in various formats and restoring
//! from a full export.

use crate::error::{FinanceError, FinanceResult};
use crate::export::{csv, json, yaml};
use crate::storage::Storage;
use clap::{Subcommand, ValueEnum};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// CSV format (transactions only)
    Csv,
    /// JSON format (everything)
    Json,
    /// YAML format (everything, human-readable)
    Yaml,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export all data to a file
    All {
        /// Output file path
        output: PathBuf,

        /// Export format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Export transactions to CSV
    Transactions {
        /// Output file path
        output: PathBuf,
    },

    /// Replace all data with the contents of a JSON or YAML export
    Restore {
        /// Export file path
        input: PathBuf,

        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },

    /// Show export information without writing files
    Info,
}

/// Handle export commands
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> FinanceResult<()> {
    match cmd {
        ExportCommands::All {
            output,
            format,
            pretty,
        } => handle_export_all(storage, output, format, pretty),
        ExportCommands::Transactions { output } => handle_export_transactions(storage, output),
        ExportCommands::Restore { input, force } => handle_restore(storage, &input, force),
        ExportCommands::Info => handle_export_info(storage),
    }
}

fn create_writer(output: &Path) -> FinanceResult<BufWriter<File>> {
    let file = File::create(output).map_err(|e| {
        FinanceError::Export(format!("Failed to create file {}: {}", output.display(), e))
    })?;
    Ok(BufWriter::new(file))
}

fn finish_writer(mut writer: BufWriter<File>, output: &Path) -> FinanceResult<()> {
    writer.flush().map_err(|e| {
        FinanceError::Export(format!("Failed to write {}: {}", output.display(), e))
    })
}

fn handle_export_all(
    storage: &Storage,
    output: PathBuf,
    format: ExportFormat,
    pretty: bool,
) -> FinanceResult<()> {
    let mut writer = create_writer(&output)?;

    match format {
        ExportFormat::Csv => {
            csv::export_transactions_csv(storage, &mut writer)?;
        }
        ExportFormat::Json => {
            json::export_full_json(storage, &mut writer, pretty)?;
        }
        ExportFormat::Yaml => {
            yaml::export_full_yaml(storage, &mut writer)?;
        }
    }
    finish_writer(writer, &output)?;

    match format {
        ExportFormat::Csv => {
            println!("Transactions exported to: {}", output.display());
            println!("Note: CSV format exports transactions only. Use JSON or YAML for a full export.");
        }
        ExportFormat::Json | ExportFormat::Yaml => {
            println!("Full export written to: {}", output.display());
        }
    }

    Ok(())
}

fn handle_export_transactions(storage: &Storage, output: PathBuf) -> FinanceResult<()> {
    let mut writer = create_writer(&output)?;
    csv::export_transactions_csv(storage, &mut writer)?;
    finish_writer(writer, &output)?;

    let count = storage.transactions.count()?;
    println!("Exported {} transactions to: {}", count, output.display());

    Ok(())
}

fn handle_restore(storage: &Storage, input: &Path, force: bool) -> FinanceResult<()> {
    let contents = std::fs::read_to_string(input).map_err(|e| {
        FinanceError::Import(format!("Failed to read {}: {}", input.display(), e))
    })?;

    let is_yaml = input
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    let export = if is_yaml {
        yaml::import_from_yaml(&contents)?
    } else {
        json::import_from_json(&contents)?
    };

    println!("Export from {} (version {})", export.exported_at, export.app_version);
    println!("  Transactions: {}", export.metadata.transaction_count);
    println!("  Categories:   {}", export.metadata.category_count);
    println!("  Goals:        {}", export.metadata.goal_count);

    if !force {
        println!();
        println!("This replaces all current data. Use --force to confirm.");
        return Ok(());
    }

    export.restore(storage)?;
    println!("Data restored.");

    Ok(())
}

fn handle_export_info(storage: &Storage) -> FinanceResult<()> {
    let export = json::FullExport::from_storage(storage)?;

    println!("Export Information");
    println!("==================");
    println!("Schema version: {}", export.schema_version);
    println!("App version:    {}", export.app_version);
    println!();
    println!("Data Summary:");
    println!("  Transactions: {}", export.metadata.transaction_count);
    println!("  Categories:   {}", export.metadata.category_count);
    println!("  Goals:        {}", export.metadata.goal_count);

    if let (Some(earliest), Some(latest)) = (
        &export.metadata.earliest_transaction,
        &export.metadata.latest_transaction,
    ) {
        println!();
        println!("Transaction Date Range:");
        println!("  Earliest: {}", earliest);
        println!("  Latest:   {}", latest);
    }

    Ok(())
}
