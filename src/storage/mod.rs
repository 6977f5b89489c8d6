//! Storage layer for Lajan
//!
//! JSON file storage with atomic writes, plus the audit hooks every
//! mutation goes through.

pub mod budgets;
pub mod file_io;

pub use budgets::BudgetRepository;
pub use file_io::{read_json, write_json_atomic};

use serde::Serialize;
use tracing::debug;

use crate::audit::{change_summary, AuditEntry, AuditLogger, EntityType};
use crate::config::LajanPaths;
use crate::error::LajanError;

/// Main storage coordinator
pub struct Storage {
    paths: LajanPaths,
    pub budgets: BudgetRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a storage handle, creating directories as needed
    pub fn new(paths: LajanPaths) -> Result<Self, LajanError> {
        paths.ensure_directories()?;

        Ok(Self {
            budgets: BudgetRepository::new(paths.budgets_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &LajanPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), LajanError> {
        debug!(base = %self.paths.base_dir().display(), "loading storage");
        self.budgets.load()
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), LajanError> {
        self.budgets.save()
    }

    /// Whether `lajan init` has been run here
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    /// Record a creation in the audit log
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), LajanError> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    /// Record a modification in the audit log
    ///
    /// Without an explicit summary one is derived from the serialized records.
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> Result<(), LajanError> {
        let mut entry =
            AuditEntry::update(entity_type, entity_id, entity_name, before, after, diff_summary);
        if entry.diff_summary.is_none() {
            if let (Some(b), Some(a)) = (&entry.before, &entry.after) {
                entry.diff_summary = change_summary(b, a);
            }
        }
        self.audit.log(&entry)
    }

    /// Record a deletion in the audit log
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), LajanError> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }
}
