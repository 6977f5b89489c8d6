//! YAML export, the same data as the JSON export in a readable layout

use std::io::Write;

use crate::config::Settings;
use crate::error::{LajanError, LajanResult};
use crate::export::json::FullExport;
use crate::storage::Storage;

/// Write the full export as YAML
pub fn export_full_yaml<W: Write>(
    storage: &Storage,
    settings: &Settings,
    writer: &mut W,
) -> LajanResult<()> {
    let export = FullExport::from_storage(storage, settings)?;
    let io_err = |e: std::io::Error| LajanError::Export(e.to_string());

    writeln!(writer, "# Lajan budget export").map_err(io_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(io_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(io_err)?;
    writeln!(writer, "# Amounts are in hundredths of the budget currency.").map_err(io_err)?;
    writeln!(writer).map_err(io_err)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| LajanError::Export(e.to_string()))?;

    Ok(())
}

/// Parse and validate a YAML export
pub fn read_yaml_export(yaml_str: &str) -> LajanResult<FullExport> {
    let export: FullExport =
        serde_yaml::from_str(yaml_str).map_err(|e| LajanError::Export(e.to_string()))?;
    export.validate().map_err(LajanError::Export)?;
    Ok(export)
}
