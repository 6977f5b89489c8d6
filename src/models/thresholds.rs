//! Alert thresholds
//!
//! Percentage-of-budget levels at which a budget escalates to warning and
//! critical. Values are sanitised on construction and on deserialisation, so
//! the rest of the crate never sees a non-finite or out-of-range threshold.

use serde::{Deserialize, Serialize};

/// Default percentage at which a budget becomes `warning`
pub const DEFAULT_WARNING_THRESHOLD: f64 = 80.0;

/// Default percentage at which a budget becomes `critical`
pub const DEFAULT_CRITICAL_THRESHOLD: f64 = 95.0;

/// Warning and critical percentage levels (each within 0..=100)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawThresholds", rename_all = "camelCase")]
pub struct AlertThresholds {
    warning_threshold: f64,
    critical_threshold: f64,
}

/// Unchecked wire shape
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawThresholds {
    #[serde(default = "default_warning")]
    warning_threshold: f64,
    #[serde(default = "default_critical")]
    critical_threshold: f64,
}

fn default_warning() -> f64 {
    DEFAULT_WARNING_THRESHOLD
}

fn default_critical() -> f64 {
    DEFAULT_CRITICAL_THRESHOLD
}

impl From<RawThresholds> for AlertThresholds {
    fn from(raw: RawThresholds) -> Self {
        Self::new(raw.warning_threshold, raw.critical_threshold)
    }
}

fn sanitize(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        fallback
    }
}

impl AlertThresholds {
    /// Build thresholds, replacing non-finite values with the defaults and
    /// clamping the rest to 0..=100.
    ///
    /// `warning < critical` is expected but not enforced.
    pub fn new(warning: f64, critical: f64) -> Self {
        Self {
            warning_threshold: sanitize(warning, DEFAULT_WARNING_THRESHOLD),
            critical_threshold: sanitize(critical, DEFAULT_CRITICAL_THRESHOLD),
        }
    }

    pub fn warning(&self) -> f64 {
        self.warning_threshold
    }

    pub fn critical(&self) -> f64 {
        self.critical_threshold
    }

    /// Whether the warning level sits strictly below the critical level
    pub fn is_ordered(&self) -> bool {
        self.warning_threshold < self.critical_threshold
    }
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self::new(DEFAULT_WARNING_THRESHOLD, DEFAULT_CRITICAL_THRESHOLD)
    }
}
