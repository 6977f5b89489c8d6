//! Core data models for Lajan
//!
//! Budget records, the category enumeration, money and periods, and the
//! value objects the analytics work on.

pub mod allocation;
pub mod budget;
pub mod category;
pub mod currency;
pub mod ids;
pub mod money;
pub mod period;
pub mod thresholds;

pub use allocation::{spent_percentage, BudgetAllocation, CategoryAllocation};
pub use budget::{AlertSettings, Budget, BudgetState, BudgetValidationError};
pub use category::BudgetCategory;
pub use currency::Currency;
pub use ids::BudgetId;
pub use money::{Money, MoneyParseError};
pub use period::{BudgetPeriod, PeriodKind, PeriodParseError};
pub use thresholds::AlertThresholds;
