//! Configuration CLI commands

use clap::Subcommand;

use crate::audit::EntityType;
use crate::config::Settings;
use crate::error::{LajanError, LajanResult};
use crate::models::{AlertThresholds, Currency, PeriodKind};
use crate::storage::Storage;

/// Configuration subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show paths and settings
    Show,

    /// Change defaults applied to new budgets
    Set {
        /// Default currency (HTG or USD)
        #[arg(long)]
        currency: Option<Currency>,

        /// Default period kind (weekly, monthly, quarterly, yearly)
        #[arg(long)]
        period: Option<PeriodKind>,

        /// Default warning threshold in percent
        #[arg(long)]
        warning: Option<f64>,

        /// Default critical threshold in percent
        #[arg(long)]
        critical: Option<f64>,

        /// Date format (strftime), e.g. "%d/%m/%Y"
        #[arg(long)]
        date_format: Option<String>,
    },
}

/// Handle a config command; no subcommand shows the configuration
pub fn handle_config_command(
    storage: &Storage,
    settings: &Settings,
    cmd: Option<ConfigCommands>,
) -> LajanResult<()> {
    match cmd.unwrap_or(ConfigCommands::Show) {
        ConfigCommands::Show => show(storage, settings),
        ConfigCommands::Set {
            currency,
            period,
            warning,
            critical,
            date_format,
        } => {
            let mut updated = settings.clone();
            if let Some(currency) = currency {
                updated.default_currency = currency;
            }
            if let Some(period) = period {
                updated.default_period = period;
            }
            if warning.is_some() || critical.is_some() {
                updated.alert_thresholds = AlertThresholds::new(
                    warning.unwrap_or(settings.alert_thresholds.warning()),
                    critical.unwrap_or(settings.alert_thresholds.critical()),
                );
            }
            if let Some(format) = date_format {
                if format.trim().is_empty() {
                    return Err(LajanError::Validation(
                        "Date format cannot be empty".into(),
                    ));
                }
                updated.date_format = format;
            }

            if !updated.alert_thresholds.is_ordered() {
                eprintln!(
                    "Warning: the warning threshold ({:.0}%) is not below the critical threshold ({:.0}%)",
                    updated.alert_thresholds.warning(),
                    updated.alert_thresholds.critical()
                );
            }

            updated.save(storage.paths())?;
            storage.log_update(
                EntityType::Settings,
                "settings".to_string(),
                None,
                settings,
                &updated,
                None,
            )?;

            println!("Settings saved.");
            show(storage, &updated)
        }
    }
}

fn show(storage: &Storage, settings: &Settings) -> LajanResult<()> {
    let paths = storage.paths();

    println!("Lajan Configuration");
    println!("===================");
    println!("Base directory: {}", paths.base_dir().display());
    println!("Data directory: {}", paths.data_dir().display());
    println!("Settings file:  {}", paths.settings_file().display());
    println!("Audit log:      {}", paths.audit_log().display());
    if !paths.is_initialized() {
        println!("(not initialized, run 'lajan init')");
    }
    println!();
    println!("Settings:");
    println!("  Default currency: {}", settings.default_currency.code());
    println!("  Default period:   {}", settings.default_period);
    println!(
        "  Alert thresholds: warning {:.0}%, critical {:.0}%",
        settings.alert_thresholds.warning(),
        settings.alert_thresholds.critical()
    );
    println!("  Date format:      {}", settings.date_format);

    Ok(())
}
