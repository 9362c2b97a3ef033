//! YAML Export functionality
//!
//! Exports all collections to YAML for a human-readable backup.

use crate::error::{FinanceError, FinanceResult};
use crate::export::json::FullExport;
use crate::storage::Storage;
use std::io::Write;

/// Export everything to YAML format
pub fn export_full_yaml<W: Write>(storage: &Storage, writer: &mut W) -> FinanceResult<()> {
    let export = FullExport::from_storage(storage)?;
    let write_err = |e: std::io::Error| FinanceError::Export(e.to_string());

    writeln!(writer, "# Finance Tracker Data Export").map_err(write_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(write_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(write_err)?;
    writeln!(writer).map_err(write_err)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| FinanceError::Export(e.to_string()))?;

    Ok(())
}

/// Parse and validate a YAML export
pub fn import_from_yaml(yaml_str: &str) -> FinanceResult<FullExport> {
    let export: FullExport =
        serde_yaml::from_str(yaml_str).map_err(|e| FinanceError::Import(e.to_string()))?;

    export.validate().map_err(FinanceError::Import)?;

    Ok(export)
}
