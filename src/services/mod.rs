//! Service layer for Lajan
//!
//! Business logic on top of the storage layer: validation, persistence and
//! audit for budget records, and analysis over stored budgets.

pub mod analytics;
pub mod budget;

pub use analytics::{AnalyticsService, CategoryHistory, CategoryReport};
pub use budget::{BudgetService, BudgetUpdate};
