//! Category budget adjustment suggestions
//!
//! Advisory only: a suggestion carries a new amount the user may copy into
//! an explicit adjustment. Nothing here changes a budget.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{Currency, Money};

/// Relative gap between history and the current amount that triggers an alignment
const HISTORY_GAP_PERCENT: f64 = 10.0;

/// Buffer added on top of the historical average
const HISTORY_BUFFER: f64 = 1.10;

/// Minimum absolute trend that triggers an adjustment
const TREND_TRIGGER_PERCENT: f64 = 5.0;

/// Utilisation at or above which an increase is suggested
const HIGH_UTILIZATION_PERCENT: u32 = 90;

/// Utilisation below which a decrease is suggested
const LOW_UTILIZATION_PERCENT: u32 = 50;

const HIGH_UTILIZATION_FACTOR: f64 = 1.15;
const LOW_UTILIZATION_FACTOR: f64 = 0.80;
const OVERSPEND_BUFFER: f64 = 1.10;

/// How much weight a suggestion deserves
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Which rule produced a suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuggestionKind {
    HistoricalAlignment,
    TrendAdjustment,
    UtilizationIncrease,
    UtilizationDecrease,
    OverBudgetCorrection,
}

/// A candidate new amount for a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub new_amount: Money,
    pub confidence: Confidence,
    pub reason: String,
}

/// What the heuristic looks at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuggestionInput {
    pub current_amount: Money,
    pub spent_amount: Money,
    pub spent_percentage: u32,
    pub currency: Currency,
    /// Average spend of the category in earlier windows
    pub historical_average: Option<Money>,
    /// Percent change of spending between the two latest earlier windows
    pub trend_percent: Option<f64>,
}

/// Generate suggestions, strongest first
///
/// At most one suggestion per rule. Suggestions that would leave the amount
/// unchanged are dropped. Ties keep generation order.
pub fn suggest(input: &SuggestionInput) -> Vec<Suggestion> {
    let current = input.current_amount.non_negative();
    let spent = input.spent_amount.non_negative();
    let fmt = |m: Money| input.currency.format(m);

    let mut suggestions = Vec::with_capacity(4);

    if let Some(average) = input.historical_average.filter(|a| a.is_positive()) {
        let gap = (average - current).abs();
        let gap_percent = if current.is_zero() {
            100.0
        } else {
            gap.ratio_percent(current)
        };
        if gap_percent > HISTORY_GAP_PERCENT {
            suggestions.push(Suggestion {
                kind: SuggestionKind::HistoricalAlignment,
                new_amount: average.scale_to_units(HISTORY_BUFFER),
                confidence: Confidence::High,
                reason: format!(
                    "Align with your historical average of {} plus a 10% buffer",
                    fmt(average)
                ),
            });
        }
    }

    if let Some(trend) = input.trend_percent.filter(|t| t.is_finite()) {
        if trend.abs() >= TREND_TRIGGER_PERCENT && current.is_positive() {
            let direction = if trend > 0.0 { "up" } else { "down" };
            suggestions.push(Suggestion {
                kind: SuggestionKind::TrendAdjustment,
                new_amount: current.scale_to_units(1.0 + trend / 100.0).non_negative(),
                confidence: Confidence::Medium,
                reason: format!("Spending is trending {} {:.0}%", direction, trend.abs()),
            });
        }
    }

    let over_budget = spent > current;
    if !over_budget && input.spent_percentage >= HIGH_UTILIZATION_PERCENT {
        suggestions.push(Suggestion {
            kind: SuggestionKind::UtilizationIncrease,
            new_amount: current.scale_to_units(HIGH_UTILIZATION_FACTOR),
            confidence: Confidence::Medium,
            reason: format!(
                "{}% already used; add 15% headroom",
                input.spent_percentage
            ),
        });
    } else if input.spent_percentage < LOW_UTILIZATION_PERCENT && current.is_positive() {
        suggestions.push(Suggestion {
            kind: SuggestionKind::UtilizationDecrease,
            new_amount: current.scale_to_units(LOW_UTILIZATION_FACTOR),
            confidence: Confidence::Low,
            reason: format!(
                "Only {}% used; free up 20% for other categories",
                input.spent_percentage
            ),
        });
    }

    if over_budget {
        suggestions.push(Suggestion {
            kind: SuggestionKind::OverBudgetCorrection,
            new_amount: spent.scale_to_units(OVERSPEND_BUFFER),
            confidence: Confidence::High,
            reason: format!(
                "Over budget by {}; cover actual spending plus 10%",
                fmt(spent - current)
            ),
        });
    }

    suggestions.retain(|s| s.new_amount != current);
    // sort_by is stable
    suggestions.sort_by(|a, b| b.confidence.cmp(&a.confidence));
    suggestions
}
