//! Reallocation impact preview
//!
//! Computes what a new amount for one category would do to the budget
//! before anything is committed. Zero denominators contribute a zero ratio.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{
    spent_percentage, AlertThresholds, BudgetAllocation, BudgetCategory, Currency, Money,
};

use super::status::{classify, BudgetStatus};

/// Result of a simulated category change
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub category: BudgetCategory,
    pub current_amount: Money,
    pub new_amount: Money,
    /// Budget total after the change
    pub new_total: Money,
    pub total_change: Money,
    /// Change relative to the old total, in percent
    pub total_change_percentage: f64,
    pub category_change: Money,
    /// Category spending as a percentage of the new amount
    pub new_utilization: u32,
    /// Budget spending as a percentage of the new total
    pub new_total_utilization: u32,
    pub current_status: BudgetStatus,
    pub new_status: BudgetStatus,
}

impl SimulationResult {
    pub fn is_noop(&self) -> bool {
        self.total_change.is_zero()
    }
}

/// Preview setting `category` to `new_amount`
///
/// `categories` holds budgeted amounts, `spent` holds spending per category.
/// Categories missing from `categories` count as zero-budgeted.
pub fn simulate(
    category: BudgetCategory,
    new_amount: Money,
    categories: &BTreeMap<BudgetCategory, Money>,
    spent: &BTreeMap<BudgetCategory, Money>,
    currency: Currency,
    thresholds: &AlertThresholds,
) -> SimulationResult {
    let new_amount = new_amount.non_negative();
    let current_amount = categories.get(&category).copied().unwrap_or_default();
    let category_spent = spent.get(&category).copied().unwrap_or_default();

    let old_total: Money = categories.values().sum();
    let category_change = new_amount - current_amount;
    let new_total = old_total + category_change;
    let total_spent: Money = spent.values().sum();

    let before = BudgetAllocation::new(current_amount, category_spent, currency);
    let after = BudgetAllocation::new(new_amount, category_spent, currency);

    SimulationResult {
        category,
        current_amount,
        new_amount,
        new_total,
        total_change: category_change,
        total_change_percentage: category_change.ratio_percent(old_total),
        category_change,
        new_utilization: after.spent_percentage(),
        new_total_utilization: spent_percentage(total_spent, new_total),
        current_status: classify(&before, thresholds),
        new_status: classify(&after, thresholds),
    }
}
