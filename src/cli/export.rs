//! CLI commands for data export
//!
//! Every command writes to a file when given a path and to stdout otherwise.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Subcommand, ValueEnum};

use crate::config::Settings;
use crate::error::{LajanError, LajanResult};
use crate::export::{csv, json, yaml};
use crate::services::BudgetService;
use crate::storage::Storage;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// JSON format (every record)
    Json,
    /// YAML format (every record, human-readable)
    Yaml,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export settings and every budget
    All {
        /// Output file path (stdout when omitted)
        output: Option<PathBuf>,

        /// Export format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Export one summary row per budget to CSV
    Budgets {
        /// Output file path (stdout when omitted)
        output: Option<PathBuf>,
    },

    /// Export a budget's category report to CSV
    Categories {
        /// Budget name or ID
        budget: String,

        /// Output file path (stdout when omitted)
        output: Option<PathBuf>,
    },

    /// Show export information without writing anything
    Info,
}

/// Handle export commands
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExportCommands,
) -> LajanResult<()> {
    match cmd {
        ExportCommands::All {
            output,
            format,
            pretty,
        } => {
            let mut writer = open_output(output.as_deref())?;
            match format {
                ExportFormat::Json => {
                    json::export_full_json(storage, settings, &mut writer, pretty)?;
                    if output.is_none() {
                        writeln!(writer)?;
                    }
                }
                ExportFormat::Yaml => yaml::export_full_yaml(storage, settings, &mut writer)?,
            }
            writer.flush()?;

            if let Some(path) = output {
                println!("Full export written to: {}", path.display());
            }
        }

        ExportCommands::Budgets { output } => {
            let budgets = storage.budgets.get_all()?;
            let writer = open_output(output.as_deref())?;
            csv::export_budgets_csv(&budgets, writer)?;

            if let Some(path) = output {
                println!("Exported {} budgets to: {}", budgets.len(), path.display());
            }
        }

        ExportCommands::Categories { budget, output } => {
            let budget = BudgetService::new(storage).resolve(&budget)?;
            let writer = open_output(output.as_deref())?;
            csv::export_categories_csv(&budget, writer)?;

            if let Some(path) = output {
                println!(
                    "Exported categories of {} to: {}",
                    budget.name,
                    path.display()
                );
            }
        }

        ExportCommands::Info => print_export_info(storage, settings)?,
    }

    Ok(())
}

/// Open the destination of an export
fn open_output(output: Option<&Path>) -> LajanResult<Box<dyn Write>> {
    match output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                LajanError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

fn print_export_info(storage: &Storage, settings: &Settings) -> LajanResult<()> {
    let export = json::FullExport::from_storage(storage, settings)?;

    println!("Export Information");
    println!("==================\n");

    println!("Schema Version: {}", export.schema_version);
    println!("App Version:    {}", export.app_version);
    println!();

    println!("Data Summary:");
    println!("  Budgets:  {}", export.metadata.budget_count);
    println!("  Archived: {}", export.metadata.archived_count);

    if let (Some(start), Some(end)) = (export.metadata.earliest_start, export.metadata.latest_end) {
        println!("  Covering: {} .. {}", start, end);
    }

    println!("\nAvailable Export Formats:");
    println!("  json - every record, machine-readable");
    println!("  yaml - every record, human-readable");
    println!("  csv  - budget summaries or one budget's categories");

    println!("\nExamples:");
    println!("  lajan export all backup.json --pretty");
    println!("  lajan export all backup.yaml --format yaml");
    println!("  lajan export categories Janvye janvye.csv");

    Ok(())
}
