//! Export module for Lajan
//!
//! - CSV: budget summaries and category reports (spreadsheet-compatible)
//! - JSON: machine-readable export of every record
//! - YAML: human-readable export of every record

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_budgets_csv, export_categories_csv};
pub use json::{export_full_json, read_json_export, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::{export_full_yaml, read_yaml_export};
