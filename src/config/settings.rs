//! User settings for Lajan
//!
//! Manages user preferences: default currency and period for new budgets,
//! default alert thresholds, and date formatting.

use serde::{Deserialize, Serialize};

use super::paths::LajanPaths;
use crate::error::LajanError;
use crate::models::{AlertThresholds, Currency, PeriodKind};

/// User settings for Lajan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency used when a new budget doesn't name one
    #[serde(default)]
    pub default_currency: Currency,

    /// Period kind used when a new budget doesn't name one
    #[serde(default)]
    pub default_period: PeriodKind,

    /// Alert thresholds applied to new budgets
    #[serde(default)]
    pub alert_thresholds: AlertThresholds,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            default_currency: Currency::default(),
            default_period: PeriodKind::default(),
            alert_thresholds: AlertThresholds::default(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &LajanPaths) -> Result<Self, LajanError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| LajanError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| LajanError::Config(format!("Failed to parse settings file: {}", e)))?;

        if !settings.alert_thresholds.is_ordered() {
            tracing::warn!(
                warning = settings.alert_thresholds.warning(),
                critical = settings.alert_thresholds.critical(),
                "warning threshold is not below critical threshold"
            );
        }

        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LajanPaths) -> Result<(), LajanError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| LajanError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| LajanError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
