//! Audit trail for budget records
//!
//! Every create, update and delete is appended to `audit.log` as one JSON
//! line carrying the record before and after the change.
//!
//! ```rust,ignore
//! use lajan::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::create(
//!     EntityType::Budget,
//!     budget.id.to_string(),
//!     Some(budget.name.clone()),
//!     &budget,
//! ))?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::change_summary;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
