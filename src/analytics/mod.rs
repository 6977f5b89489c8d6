//! Budget analytics
//!
//! Pure computations over budget records: status classification, adjustment
//! suggestions, reallocation previews and budget-level statistics. Nothing
//! in this module touches storage.

pub mod simulation;
pub mod stats;
pub mod status;
pub mod suggestions;

pub use simulation::{simulate, SimulationResult};
pub use stats::{alerts, BudgetAlert, BudgetStats, CategorySpending, StatusCounts};
pub use status::{assess, classify, BudgetStatus, StatusAssessment, StatusStyle, Tone};
pub use suggestions::{suggest, Confidence, Suggestion, SuggestionInput, SuggestionKind};
