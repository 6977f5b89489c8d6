//! JSON export of every budget record, with schema versioning

use std::collections::HashSet;
use std::io::Write;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::error::{LajanError, LajanResult};
use crate::models::Budget;
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full data export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Version of the program that wrote the export
    pub app_version: String,

    pub settings: Settings,

    /// All budgets, archived included, newest window first
    pub budgets: Vec<Budget>,

    pub metadata: ExportMetadata,
}

/// Summary figures stored alongside the records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub budget_count: usize,
    pub archived_count: usize,
    pub earliest_start: Option<NaiveDate>,
    pub latest_end: Option<NaiveDate>,
}

impl FullExport {
    pub fn from_storage(storage: &Storage, settings: &Settings) -> LajanResult<Self> {
        let budgets = storage.budgets.get_all()?;

        let metadata = ExportMetadata {
            budget_count: budgets.len(),
            archived_count: budgets.iter().filter(|b| b.is_archived).count(),
            earliest_start: budgets.iter().map(|b| b.start_date).min(),
            latest_end: budgets.iter().map(|b| b.end_date).max(),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            settings: settings.clone(),
            budgets,
            metadata,
        })
    }

    /// Check the schema version, ID uniqueness and every record
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        let mut seen = HashSet::new();
        for budget in &self.budgets {
            if !seen.insert(budget.id) {
                return Err(format!("Budget {} appears more than once", budget.id));
            }
            budget
                .validate()
                .map_err(|e| format!("Budget {}: {}", budget.id, e))?;
        }

        if self.metadata.budget_count != self.budgets.len() {
            return Err(format!(
                "Metadata lists {} budgets but the export holds {}",
                self.metadata.budget_count,
                self.budgets.len()
            ));
        }

        Ok(())
    }
}

/// Write the full export as JSON
pub fn export_full_json<W: Write>(
    storage: &Storage,
    settings: &Settings,
    writer: &mut W,
    pretty: bool,
) -> LajanResult<()> {
    let export = FullExport::from_storage(storage, settings)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| LajanError::Export(e.to_string()))?;

    Ok(())
}

/// Parse and validate a JSON export
pub fn read_json_export(json_str: &str) -> LajanResult<FullExport> {
    let export: FullExport =
        serde_json::from_str(json_str).map_err(|e| LajanError::Export(e.to_string()))?;
    export.validate().map_err(LajanError::Export)?;
    Ok(export)
}
