//! Budget-level statistics and alerts

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Budget, BudgetCategory, Money};

use super::status::{assess, classify, BudgetStatus};

/// Number of categories listed in `top_spending`
const TOP_SPENDING_COUNT: usize = 3;

/// Category count per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub healthy: usize,
    pub warning: usize,
    pub critical: usize,
    pub exceeded: usize,
}

impl StatusCounts {
    fn add(&mut self, status: BudgetStatus) {
        match status {
            BudgetStatus::Healthy => self.healthy += 1,
            BudgetStatus::Warning => self.warning += 1,
            BudgetStatus::Critical => self.critical += 1,
            BudgetStatus::Exceeded => self.exceeded += 1,
        }
    }

    pub fn get(&self, status: BudgetStatus) -> usize {
        match status {
            BudgetStatus::Healthy => self.healthy,
            BudgetStatus::Warning => self.warning,
            BudgetStatus::Critical => self.critical,
            BudgetStatus::Exceeded => self.exceeded,
        }
    }

    pub fn total(&self) -> usize {
        self.healthy + self.warning + self.critical + self.exceeded
    }
}

/// Spending of one category, for rankings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySpending {
    pub category: BudgetCategory,
    pub spent: Money,
    pub spent_percentage: u32,
}

/// Summary of a budget as of a given day
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetStats {
    pub total_budgeted: Money,
    pub total_spent: Money,
    pub remaining: Money,
    pub spent_percentage: u32,
    pub status: BudgetStatus,
    pub status_counts: StatusCounts,
    pub top_spending: Vec<CategorySpending>,
    pub days_total: i64,
    pub days_elapsed: i64,
    pub days_remaining: i64,
    pub average_daily_spend: Money,
    /// Spending at the end of the window if the current pace holds
    pub projected_spend: Money,
    pub projected_overrun: Money,
    /// What can still be spent per remaining day
    pub daily_allowance: Money,
}

impl BudgetStats {
    /// Compute statistics for `budget` as of `today`
    pub fn compute(budget: &Budget, today: NaiveDate) -> Self {
        let thresholds = &budget.alert_settings.thresholds;
        let overall = budget.overall_allocation();

        let mut status_counts = StatusCounts::default();
        let mut spending = Vec::new();
        for entry in budget.category_allocations() {
            status_counts.add(classify(&entry.allocation, thresholds));
            if entry.allocation.spent.is_positive() {
                spending.push(CategorySpending {
                    category: entry.category,
                    spent: entry.allocation.spent,
                    spent_percentage: entry.allocation.spent_percentage(),
                });
            }
        }
        // Stable: ties keep display order
        spending.sort_by(|a, b| b.spent.cmp(&a.spent));
        spending.truncate(TOP_SPENDING_COUNT);

        let days_total = budget.days_total();
        let days_elapsed = budget.days_elapsed(today);
        let days_remaining = budget.days_remaining(today);

        let average_daily_spend = per_day(overall.spent, days_elapsed);
        let projected_spend = if days_elapsed > 0 {
            let cents =
                i128::from(overall.spent.cents()) * i128::from(days_total) / i128::from(days_elapsed);
            Money::from_cents(i64::try_from(cents).unwrap_or(i64::MAX))
        } else {
            overall.spent
        };
        let projected_overrun = projected_spend.saturating_sub_floor(overall.budgeted);
        let daily_allowance = per_day(overall.remaining(), days_remaining);

        Self {
            total_budgeted: overall.budgeted,
            total_spent: overall.spent,
            remaining: overall.remaining(),
            spent_percentage: overall.spent_percentage(),
            status: classify(&overall, thresholds),
            status_counts,
            top_spending: spending,
            days_total,
            days_elapsed,
            days_remaining,
            average_daily_spend,
            projected_spend,
            projected_overrun,
            daily_allowance,
        }
    }

    pub fn is_projected_over(&self) -> bool {
        self.projected_overrun.is_positive()
    }
}

fn per_day(amount: Money, days: i64) -> Money {
    if days > 0 {
        Money::from_cents(amount.cents() / days)
    } else {
        Money::zero()
    }
}

/// A category that needs attention
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAlert {
    pub category: BudgetCategory,
    pub status: BudgetStatus,
    pub spent_percentage: u32,
    pub message: String,
}

/// Categories at warning or worse, most severe first
///
/// Empty when alerts are disabled on the budget.
pub fn alerts(budget: &Budget) -> Vec<BudgetAlert> {
    if !budget.alert_settings.enabled {
        return Vec::new();
    }

    let thresholds = &budget.alert_settings.thresholds;
    let mut alerts: Vec<BudgetAlert> = budget
        .category_allocations()
        .into_iter()
        .filter_map(|entry| {
            let assessment = assess(&entry.allocation, thresholds);
            assessment.status.is_alert().then(|| BudgetAlert {
                category: entry.category,
                status: assessment.status,
                spent_percentage: assessment.spent_percentage,
                message: assessment.message,
            })
        })
        .collect();

    alerts.sort_by(|a, b| {
        b.status
            .cmp(&a.status)
            .then(b.spent_percentage.cmp(&a.spent_percentage))
    });
    alerts
}
