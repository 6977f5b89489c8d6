//! Budget allocation value objects
//!
//! Read-only projections of a budget (or one category of it): how much was
//! budgeted, how much was spent, and the figures derived from those two.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::BudgetCategory;
use super::currency::Currency;
use super::money::Money;

/// Budgeted and spent amounts for one budget or category
///
/// `remaining` floors at zero, so `remaining + spent` can exceed `budgeted`
/// once spending goes over. This is a display figure, not a ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetAllocation {
    pub budgeted: Money,
    pub spent: Money,
    pub currency: Currency,
}

impl BudgetAllocation {
    /// Create an allocation; negative amounts are clamped to zero
    pub fn new(budgeted: Money, spent: Money, currency: Currency) -> Self {
        Self {
            budgeted: budgeted.non_negative(),
            spent: spent.non_negative(),
            currency,
        }
    }

    /// Amount left to spend, never negative
    pub fn remaining(&self) -> Money {
        self.budgeted.saturating_sub_floor(self.spent)
    }

    /// Spent as a rounded percentage of budgeted; zero when nothing is budgeted
    pub fn spent_percentage(&self) -> u32 {
        spent_percentage(self.spent, self.budgeted)
    }

    pub fn is_over_budget(&self) -> bool {
        self.spent > self.budgeted
    }

    /// Amount spent beyond the budget, zero when within it
    pub fn overspent(&self) -> Money {
        self.spent.saturating_sub_floor(self.budgeted)
    }
}

impl fmt::Display for BudgetAllocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {} ({}%)",
            self.currency.format(self.spent),
            self.currency.format(self.budgeted),
            self.spent_percentage()
        )
    }
}

/// Rounded `spent / budgeted * 100`, half rounding up
///
/// Computed in integers so the result is exact. Returns 0 when `budgeted`
/// is not positive; saturates at `u32::MAX`.
pub fn spent_percentage(spent: Money, budgeted: Money) -> u32 {
    let budgeted = budgeted.cents() as i128;
    if budgeted <= 0 {
        return 0;
    }
    let spent = spent.cents().max(0) as i128;
    let rounded = (200 * spent + budgeted) / (2 * budgeted);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

/// An allocation tagged with its category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryAllocation {
    pub category: BudgetCategory,
    pub allocation: BudgetAllocation,
}

impl CategoryAllocation {
    pub fn new(category: BudgetCategory, allocation: BudgetAllocation) -> Self {
        Self {
            category,
            allocation,
        }
    }
}
