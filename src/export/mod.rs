//! Export module
//!
//! - Document: paginated text rendering of a financial report
//! - CSV: transactions, spreadsheet-compatible
//! - JSON: machine-readable full export, also used for restore
//! - YAML: human-readable full export

pub mod csv;
pub mod document;
pub mod json;
pub mod yaml;

pub use csv::export_transactions_csv;
pub use document::{document_file_name, ReportExporter};
pub use json::{export_full_json, import_from_json, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::{export_full_yaml, import_from_yaml};
