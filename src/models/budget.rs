//! Budget record model
//!
//! A budget covers one window (start..=end) in one currency and allocates
//! amounts to categories. Spending per category is tracked alongside.
//! Totals are derived on read.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::allocation::{BudgetAllocation, CategoryAllocation};
use super::category::BudgetCategory;
use super::currency::Currency;
use super::ids::BudgetId;
use super::money::Money;
use super::period::{BudgetPeriod, PeriodKind};
use super::thresholds::AlertThresholds;

/// Alert configuration of a budget
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertSettings {
    #[serde(default = "default_alerts_enabled")]
    pub enabled: bool,

    #[serde(flatten)]
    pub thresholds: AlertThresholds,
}

fn default_alerts_enabled() -> bool {
    true
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            thresholds: AlertThresholds::default(),
        }
    }
}

impl AlertSettings {
    pub fn with_thresholds(thresholds: AlertThresholds) -> Self {
        Self {
            enabled: true,
            thresholds,
        }
    }
}

/// Lifecycle state of a budget record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BudgetState {
    /// The window has not ended yet
    #[default]
    Active,
    /// The window is over
    Completed,
}

impl fmt::Display for BudgetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// A budget record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    #[serde(rename = "_id")]
    pub id: BudgetId,

    pub name: String,

    pub period: PeriodKind,

    pub start_date: NaiveDate,

    /// Inclusive
    pub end_date: NaiveDate,

    #[serde(default)]
    pub currency: Currency,

    /// Budgeted amount per category
    #[serde(default)]
    pub categories: BTreeMap<BudgetCategory, Money>,

    /// Spent amount per category
    #[serde(default)]
    pub category_spent: BTreeMap<BudgetCategory, Money>,

    #[serde(default)]
    pub alert_settings: AlertSettings,

    #[serde(default)]
    pub status: BudgetState,

    #[serde(default)]
    pub is_archived: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Budget {
    /// Create an empty budget covering `period`
    pub fn new(name: impl Into<String>, period: &BudgetPeriod, currency: Currency) -> Self {
        let now = Utc::now();
        Self {
            id: BudgetId::new(),
            name: name.into(),
            period: period.kind(),
            start_date: period.start_date(),
            end_date: period.end_date(),
            currency,
            categories: BTreeMap::new(),
            category_spent: BTreeMap::new(),
            alert_settings: AlertSettings::default(),
            status: BudgetState::Active,
            is_archived: false,
            created_at: now,
            updated_at: now,
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Sum of all category allocations
    pub fn total_budgeted(&self) -> Money {
        self.categories.values().sum()
    }

    /// Sum of all category spending
    pub fn total_spent(&self) -> Money {
        self.category_spent.values().sum()
    }

    pub fn budgeted_for(&self, category: BudgetCategory) -> Money {
        self.categories.get(&category).copied().unwrap_or_default()
    }

    pub fn spent_for(&self, category: BudgetCategory) -> Money {
        self.category_spent.get(&category).copied().unwrap_or_default()
    }

    /// Whether the category has an allocation or any recorded spending
    pub fn has_category(&self, category: BudgetCategory) -> bool {
        self.categories.contains_key(&category) || self.category_spent.contains_key(&category)
    }

    /// Allocation of a single category
    pub fn allocation_for(&self, category: BudgetCategory) -> BudgetAllocation {
        BudgetAllocation::new(
            self.budgeted_for(category),
            self.spent_for(category),
            self.currency,
        )
    }

    /// Allocation of the whole budget
    pub fn overall_allocation(&self) -> BudgetAllocation {
        BudgetAllocation::new(self.total_budgeted(), self.total_spent(), self.currency)
    }

    /// Allocations for every category that is budgeted or has spending,
    /// in category display order
    pub fn category_allocations(&self) -> Vec<CategoryAllocation> {
        BudgetCategory::all()
            .iter()
            .copied()
            .filter(|c| self.has_category(*c))
            .map(|c| CategoryAllocation::new(c, self.allocation_for(c)))
            .collect()
    }

    /// Set the budgeted amount of a category
    pub fn set_category_amount(&mut self, category: BudgetCategory, amount: Money) {
        self.categories.insert(category, amount);
        self.touch();
    }

    /// Remove a category's allocation and spending; returns whether it existed
    pub fn remove_category(&mut self, category: BudgetCategory) -> bool {
        let had_budget = self.categories.remove(&category).is_some();
        let had_spending = self.category_spent.remove(&category).is_some();
        if had_budget || had_spending {
            self.touch();
        }
        had_budget || had_spending
    }

    /// Add spending to a category (negative amounts record refunds)
    pub fn record_spending(&mut self, category: BudgetCategory, amount: Money) {
        let entry = self.category_spent.entry(category).or_default();
        *entry += amount;
        self.touch();
    }

    pub fn set_thresholds(&mut self, thresholds: AlertThresholds) {
        self.alert_settings.thresholds = thresholds;
        self.touch();
    }

    pub fn set_alerts_enabled(&mut self, enabled: bool) {
        self.alert_settings.enabled = enabled;
        self.touch();
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.touch();
    }

    pub fn archive(&mut self) {
        self.is_archived = true;
        self.touch();
    }

    pub fn unarchive(&mut self) {
        self.is_archived = false;
        self.touch();
    }

    /// Mark the budget completed once its window has passed; returns whether
    /// the state changed
    pub fn refresh_status(&mut self, today: NaiveDate) -> bool {
        let next = if today > self.end_date {
            BudgetState::Completed
        } else {
            BudgetState::Active
        };
        if next != self.status {
            self.status = next;
            self.touch();
            true
        } else {
            false
        }
    }

    /// Number of days in the window (inclusive)
    pub fn days_total(&self) -> i64 {
        ((self.end_date - self.start_date).num_days() + 1).max(1)
    }

    /// Days of the window that have started by `today`, within 0..=days_total
    pub fn days_elapsed(&self, today: NaiveDate) -> i64 {
        ((today - self.start_date).num_days() + 1).clamp(0, self.days_total())
    }

    /// Days of the window after `today`
    pub fn days_remaining(&self, today: NaiveDate) -> i64 {
        self.days_total() - self.days_elapsed(today)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Validate the record
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.name.trim().is_empty() {
            return Err(BudgetValidationError::EmptyName);
        }

        if self.name.len() > 80 {
            return Err(BudgetValidationError::NameTooLong(self.name.len()));
        }

        if self.end_date < self.start_date {
            return Err(BudgetValidationError::InvalidDateRange);
        }

        if let Some((category, _)) = self.categories.iter().find(|(_, m)| m.is_negative()) {
            return Err(BudgetValidationError::NegativeAmount(*category));
        }

        if let Some((category, _)) = self.category_spent.iter().find(|(_, m)| m.is_negative()) {
            return Err(BudgetValidationError::NegativeSpending(*category));
        }

        if let Some((category, _)) = self
            .categories
            .iter()
            .chain(self.category_spent.iter())
            .find(|(_, m)| **m > Money::MAX)
        {
            return Err(BudgetValidationError::AmountTooLarge(*category));
        }

        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} {}..{})",
            self.name, self.period, self.start_date, self.end_date
        )
    }
}

/// Validation errors for budget records
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidDateRange,
    NegativeAmount(BudgetCategory),
    NegativeSpending(BudgetCategory),
    AmountTooLarge(BudgetCategory),
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Budget name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Budget name too long ({} chars, max 80)", len)
            }
            Self::InvalidDateRange => write!(f, "Budget end date is before its start date"),
            Self::NegativeAmount(c) => write!(f, "Budget amount for {} cannot be negative", c),
            Self::NegativeSpending(c) => write!(f, "Spending for {} cannot be negative", c),
            Self::AmountTooLarge(c) => {
                write!(f, "Amount for {} exceeds the maximum of {}", c, Money::MAX)
            }
        }
    }
}

impl std::error::Error for BudgetValidationError {}
