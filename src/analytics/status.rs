//! Budget status classification
//!
//! Maps an allocation and a pair of thresholds to one of four statuses.
//! Rules, first match wins:
//!
//! 1. spent > budgeted: `Exceeded`
//! 2. percentage >= critical threshold: `Critical`
//! 3. percentage >= warning threshold: `Warning`
//! 4. otherwise: `Healthy`
//!
//! A category with nothing budgeted and nothing spent has no meaningful
//! percentage and is reported `Healthy` at 0%, ahead of rules 2 and 3. This
//! only differs from the plain rules when a threshold is 0.
//!
//! Every view takes its label, icon and colours from [`BudgetStatus::style`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{AlertThresholds, BudgetAllocation, Money};

/// Derived status of a budget or category
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    Healthy,
    Warning,
    Critical,
    Exceeded,
}

/// Colour role of a style token; the renderer picks the concrete colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Caution,
    Severe,
    Danger,
}

/// Presentation tokens for a status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusStyle {
    pub label: &'static str,
    pub icon: &'static str,
    pub badge: Tone,
    pub progress: Tone,
}

/// Indexed by `BudgetStatus as usize`
const STATUS_STYLES: [StatusStyle; 4] = [
    StatusStyle {
        label: "Healthy",
        icon: "✓",
        badge: Tone::Positive,
        progress: Tone::Positive,
    },
    StatusStyle {
        label: "Warning",
        icon: "!",
        badge: Tone::Caution,
        progress: Tone::Caution,
    },
    StatusStyle {
        label: "Critical",
        icon: "⚠",
        badge: Tone::Severe,
        progress: Tone::Severe,
    },
    StatusStyle {
        label: "Exceeded",
        icon: "✗",
        badge: Tone::Danger,
        progress: Tone::Danger,
    },
];

impl BudgetStatus {
    pub fn all() -> &'static [BudgetStatus] {
        &[Self::Healthy, Self::Warning, Self::Critical, Self::Exceeded]
    }

    /// Presentation tokens for this status
    pub fn style(&self) -> &'static StatusStyle {
        &STATUS_STYLES[*self as usize]
    }

    /// Whether this status should raise an alert
    pub fn is_alert(&self) -> bool {
        *self >= Self::Warning
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.style().label)
    }
}

/// Classify an allocation against the given thresholds
pub fn classify(allocation: &BudgetAllocation, thresholds: &AlertThresholds) -> BudgetStatus {
    if allocation.is_over_budget() {
        return BudgetStatus::Exceeded;
    }

    // Zero budget with zero spending; the percentage is 0 by convention
    if allocation.budgeted.is_zero() {
        return BudgetStatus::Healthy;
    }

    let percentage = f64::from(allocation.spent_percentage());
    if percentage >= thresholds.critical() {
        BudgetStatus::Critical
    } else if percentage >= thresholds.warning() {
        BudgetStatus::Warning
    } else {
        BudgetStatus::Healthy
    }
}

/// Status plus the figures a view needs to explain it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusAssessment {
    pub status: BudgetStatus,
    pub spent_percentage: u32,
    pub remaining: Money,
    pub overspent: Money,
    pub message: String,
}

/// Classify an allocation and build its human-readable message
pub fn assess(allocation: &BudgetAllocation, thresholds: &AlertThresholds) -> StatusAssessment {
    let status = classify(allocation, thresholds);
    let percentage = allocation.spent_percentage();
    let overspent = allocation.overspent();

    let message = match status {
        BudgetStatus::Exceeded => {
            format!("Over budget by {}", allocation.currency.format(overspent))
        }
        BudgetStatus::Critical => format!("Nearly exhausted: {}% used", percentage),
        BudgetStatus::Warning => format!("Approaching limit: {}% used", percentage),
        BudgetStatus::Healthy => format!("On track: {}% used", percentage),
    };

    StatusAssessment {
        status,
        spent_percentage: percentage,
        remaining: allocation.remaining(),
        overspent,
        message,
    }
}
