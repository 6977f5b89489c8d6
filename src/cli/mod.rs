//! CLI command handlers
//!
//! Bridges clap argument parsing with the service layer.

pub mod analyze;
pub mod budget;
pub mod config;
pub mod export;

pub use analyze::{handle_analyze_command, AnalyzeCommands};
pub use budget::{handle_budget_command, BudgetCommands};
pub use config::{handle_config_command, ConfigCommands};
pub use export::{handle_export_command, ExportCommands};

use serde::Serialize;

use crate::error::{LajanError, LajanResult};
use crate::models::Money;

/// Parse a user-supplied amount such as "1500", "1,500.50" or "G 250"
pub(crate) fn parse_amount(input: &str) -> LajanResult<Money> {
    Money::parse(input).map_err(|e| LajanError::Validation(e.to_string()))
}

/// Print a value as pretty JSON on stdout
pub(crate) fn print_json<T: Serialize>(value: &T) -> LajanResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}
