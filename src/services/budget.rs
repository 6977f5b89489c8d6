//! Budget service
//!
//! Record operations on budgets: creation, lookup, edits to allocations and
//! spending, archiving. Every mutation is validated, saved atomically and
//! written to the audit log.

use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use crate::audit::EntityType;
use crate::error::{LajanError, LajanResult};
use crate::models::{AlertThresholds, Budget, BudgetCategory, BudgetId, BudgetPeriod, Currency, Money};
use crate::storage::Storage;

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
    today: NaiveDate,
}

/// Fields that `update` may change; `None` leaves a field as is
#[derive(Debug, Clone, Default)]
pub struct BudgetUpdate {
    pub name: Option<String>,
    pub warning_threshold: Option<f64>,
    pub critical_threshold: Option<f64>,
    pub alerts_enabled: Option<bool>,
}

impl BudgetUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.warning_threshold.is_none()
            && self.critical_threshold.is_none()
            && self.alerts_enabled.is_none()
    }
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service dated today
    pub fn new(storage: &'a Storage) -> Self {
        Self::with_today(storage, Local::now().date_naive())
    }

    /// Create a service with a fixed notion of "today"
    pub fn with_today(storage: &'a Storage, today: NaiveDate) -> Self {
        Self { storage, today }
    }

    /// Create an empty budget for `period`
    pub fn create(
        &self,
        name: &str,
        period: &BudgetPeriod,
        currency: Currency,
        thresholds: AlertThresholds,
    ) -> LajanResult<Budget> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LajanError::Validation("Budget name cannot be empty".into()));
        }

        if self.storage.budgets.name_exists(name, None)? {
            return Err(LajanError::duplicate_budget(name));
        }

        let mut budget = Budget::new(name, period, currency);
        budget.set_thresholds(thresholds);
        budget.refresh_status(self.today);

        budget
            .validate()
            .map_err(|e| LajanError::Validation(e.to_string()))?;

        self.storage.budgets.upsert(budget.clone())?;
        self.storage.budgets.save()?;

        self.storage.log_create(
            EntityType::Budget,
            budget.id.to_string(),
            Some(budget.name.clone()),
            &budget,
        )?;

        info!(id = %budget.id, name = %budget.name, period = %period, "created budget");
        Ok(budget)
    }

    /// Get a budget by ID
    pub fn get(&self, id: BudgetId) -> LajanResult<Option<Budget>> {
        self.storage.budgets.get(id)
    }

    /// List budgets, newest window first
    pub fn list(&self, include_archived: bool) -> LajanResult<Vec<Budget>> {
        if include_archived {
            self.storage.budgets.get_all()
        } else {
            self.storage.budgets.get_active()
        }
    }

    /// Find a budget by name, full ID or short ID prefix
    ///
    /// An ID prefix shared by several budgets is a validation error.
    pub fn find(&self, identifier: &str) -> LajanResult<Option<Budget>> {
        if let Some(budget) = self.storage.budgets.get_by_name(identifier)? {
            return Ok(Some(budget));
        }

        let mut matches = self.storage.budgets.find_by_id_prefix(identifier)?;
        match matches.len() {
            0 => Ok(None),
            1 => Ok(matches.pop()),
            n => Err(LajanError::Validation(format!(
                "'{}' matches {} budgets; use a longer ID",
                identifier, n
            ))),
        }
    }

    /// Like `find`, but a missing budget is an error
    pub fn resolve(&self, identifier: &str) -> LajanResult<Budget> {
        self.find(identifier)?
            .ok_or_else(|| LajanError::budget_not_found(identifier))
    }

    /// Change name, thresholds or alert switch
    pub fn update(&self, id: BudgetId, changes: BudgetUpdate) -> LajanResult<Budget> {
        if changes.is_empty() {
            return Err(LajanError::Validation("Nothing to update".into()));
        }

        if let Some(name) = &changes.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(LajanError::Validation("Budget name cannot be empty".into()));
            }
            if self.storage.budgets.name_exists(name, Some(id))? {
                return Err(LajanError::duplicate_budget(name));
            }
        }

        self.mutate(id, false, None, |budget| {
            if let Some(name) = &changes.name {
                budget.rename(name.trim());
            }

            if changes.warning_threshold.is_some() || changes.critical_threshold.is_some() {
                let current = budget.alert_settings.thresholds;
                let thresholds = AlertThresholds::new(
                    changes.warning_threshold.unwrap_or(current.warning()),
                    changes.critical_threshold.unwrap_or(current.critical()),
                );
                if !thresholds.is_ordered() {
                    tracing::warn!(
                        warning = thresholds.warning(),
                        critical = thresholds.critical(),
                        "warning threshold is not below critical threshold"
                    );
                }
                budget.set_thresholds(thresholds);
            }

            if let Some(enabled) = changes.alerts_enabled {
                budget.set_alerts_enabled(enabled);
            }
            Ok(())
        })
    }

    /// Set the budgeted amount of a category
    pub fn adjust_category(
        &self,
        id: BudgetId,
        category: BudgetCategory,
        amount: Money,
    ) -> LajanResult<Budget> {
        if amount.is_negative() {
            return Err(LajanError::Validation(format!(
                "Amount for {} cannot be negative",
                category
            )));
        }
        if amount > Money::MAX {
            return Err(LajanError::Validation(format!(
                "Amount for {} exceeds the maximum of {}",
                category,
                Money::MAX
            )));
        }

        self.mutate(id, false, None, |budget| {
            budget.set_category_amount(category, amount);
            Ok(())
        })
    }

    /// Remove a category's allocation and spending
    pub fn remove_category(&self, id: BudgetId, category: BudgetCategory) -> LajanResult<Budget> {
        self.mutate(id, false, None, |budget| {
            if budget.remove_category(category) {
                Ok(())
            } else {
                Err(LajanError::category_not_found(category.key()))
            }
        })
    }

    /// Add spending to a category; a negative amount records a refund
    pub fn record_spending(
        &self,
        id: BudgetId,
        category: BudgetCategory,
        amount: Money,
    ) -> LajanResult<Budget> {
        if amount.is_zero() {
            return Err(LajanError::Validation("Spending amount cannot be zero".into()));
        }
        if amount.abs() > Money::MAX {
            return Err(LajanError::Validation(format!(
                "Spending amount exceeds the maximum of {}",
                Money::MAX
            )));
        }

        self.mutate(id, false, None, |budget| {
            let spent = budget.spent_for(category);
            if spent + amount > Money::MAX {
                return Err(LajanError::Validation(format!(
                    "Spending on {} would exceed the maximum of {}",
                    category,
                    Money::MAX
                )));
            }
            if (spent + amount).is_negative() {
                return Err(LajanError::Validation(format!(
                    "Refund of {} exceeds {} spent on {}",
                    budget.currency.format(-amount),
                    budget.currency.format(spent),
                    category
                )));
            }
            budget.record_spending(category, amount);
            Ok(())
        })
    }

    /// Archive a budget; archived budgets are read-only
    pub fn archive(&self, id: BudgetId) -> LajanResult<Budget> {
        self.mutate(
            id,
            true,
            Some("isArchived: false -> true".to_string()),
            |budget| {
                if budget.is_archived {
                    return Err(LajanError::Validation("Budget is already archived".into()));
                }
                budget.archive();
                Ok(())
            },
        )
    }

    /// Make an archived budget editable again
    pub fn unarchive(&self, id: BudgetId) -> LajanResult<Budget> {
        self.mutate(
            id,
            true,
            Some("isArchived: true -> false".to_string()),
            |budget| {
                if !budget.is_archived {
                    return Err(LajanError::Validation("Budget is not archived".into()));
                }
                budget.unarchive();
                Ok(())
            },
        )
    }

    /// Delete a budget permanently
    pub fn delete(&self, id: BudgetId) -> LajanResult<Budget> {
        let budget = self
            .storage
            .budgets
            .get(id)?
            .ok_or_else(|| LajanError::budget_not_found(id.to_string()))?;

        self.storage.budgets.delete(id)?;
        self.storage.budgets.save()?;

        self.storage.log_delete(
            EntityType::Budget,
            budget.id.to_string(),
            Some(budget.name.clone()),
            &budget,
        )?;

        info!(id = %budget.id, name = %budget.name, "deleted budget");
        Ok(budget)
    }

    /// Load, change, validate, save and audit one budget
    fn mutate<F>(
        &self,
        id: BudgetId,
        allow_archived: bool,
        diff_summary: Option<String>,
        apply: F,
    ) -> LajanResult<Budget>
    where
        F: FnOnce(&mut Budget) -> LajanResult<()>,
    {
        let mut budget = self
            .storage
            .budgets
            .get(id)?
            .ok_or_else(|| LajanError::budget_not_found(id.to_string()))?;

        if budget.is_archived && !allow_archived {
            return Err(LajanError::Validation(format!(
                "Budget '{}' is archived; unarchive it first",
                budget.name
            )));
        }

        let before = budget.clone();
        apply(&mut budget)?;
        budget.refresh_status(self.today);

        budget
            .validate()
            .map_err(|e| LajanError::Validation(e.to_string()))?;

        self.storage.budgets.upsert(budget.clone())?;
        self.storage.budgets.save()?;

        self.storage.log_update(
            EntityType::Budget,
            budget.id.to_string(),
            Some(budget.name.clone()),
            &before,
            &budget,
            diff_summary,
        )?;

        debug!(id = %budget.id, "updated budget");
        Ok(budget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::LajanPaths;
    use crate::models::BudgetState;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LajanPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    fn january(service: &BudgetService) -> Budget {
        service
            .create(
                "Janvye",
                &BudgetPeriod::monthly(2025, 1),
                Currency::Htg,
                AlertThresholds::default(),
            )
            .unwrap()
    }

    #[test]
    fn test_create_budget() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::with_today(&storage, today());

        let budget = january(&service);
        assert_eq!(budget.name, "Janvye");
        assert_eq!(budget.status, BudgetState::Active);
        assert_eq!(service.list(false).unwrap().len(), 1);

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Create);
    }

    #[test]
    fn test_create_rejects_empty_and_duplicate_names() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::with_today(&storage, today());
        january(&service);

        let period = BudgetPeriod::monthly(2025, 2);
        let err = service
            .create("  ", &period, Currency::Htg, AlertThresholds::default())
            .unwrap_err();
        assert!(err.is_validation());

        let err = service
            .create("JANVYE", &period, Currency::Htg, AlertThresholds::default())
            .unwrap_err();
        assert!(matches!(err, LajanError::Duplicate { .. }));
    }

    #[test]
    fn test_past_window_is_created_completed() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::with_today(&storage, today());
        let budget = service
            .create(
                "Desanm",
                &BudgetPeriod::monthly(2024, 12),
                Currency::Htg,
                AlertThresholds::default(),
            )
            .unwrap();
        assert_eq!(budget.status, BudgetState::Completed);
    }

    #[test]
    fn test_find_by_name_and_id() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::with_today(&storage, today());
        let budget = january(&service);

        assert_eq!(service.find("janvye").unwrap().unwrap().id, budget.id);
        assert_eq!(service.find(&budget.id.short()).unwrap().unwrap().id, budget.id);
        assert_eq!(
            service
                .find(&budget.id.as_uuid().to_string())
                .unwrap()
                .unwrap()
                .id,
            budget.id
        );
        assert!(service.find("Fevriye").unwrap().is_none());
        assert!(service.resolve("Fevriye").unwrap_err().is_not_found());
    }

    #[test]
    fn test_adjust_and_remove_category() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::with_today(&storage, today());
        let budget = january(&service);

        let updated = service
            .adjust_category(budget.id, BudgetCategory::Transport, Money::from_units(5000))
            .unwrap();
        assert_eq!(updated.total_budgeted(), Money::from_units(5000));

        let err = service
            .adjust_category(budget.id, BudgetCategory::Transport, Money::from_units(-1))
            .unwrap_err();
        assert!(err.is_validation());

        let updated = service
            .remove_category(budget.id, BudgetCategory::Transport)
            .unwrap();
        assert!(updated.categories.is_empty());

        let err = service
            .remove_category(budget.id, BudgetCategory::Transport)
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_adjustment_is_audited_with_summary() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::with_today(&storage, today());
        let budget = january(&service);

        service
            .adjust_category(budget.id, BudgetCategory::Transport, Money::from_units(5000))
            .unwrap();

        let entries = storage.audit().read_all().unwrap();
        let last = entries.last().unwrap();
        assert_eq!(last.operation, Operation::Update);
        assert_eq!(
            last.diff_summary.as_deref(),
            Some("categories.transport: (added) -> 500000")
        );
    }

    #[test]
    fn test_record_spending_and_refund() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::with_today(&storage, today());
        let budget = january(&service);

        service
            .record_spending(budget.id, BudgetCategory::Alimentation, Money::from_units(900))
            .unwrap();
        let updated = service
            .record_spending(budget.id, BudgetCategory::Alimentation, Money::from_units(-100))
            .unwrap();
        assert_eq!(
            updated.spent_for(BudgetCategory::Alimentation),
            Money::from_units(800)
        );

        let err = service
            .record_spending(budget.id, BudgetCategory::Alimentation, Money::from_units(-801))
            .unwrap_err();
        assert!(err.is_validation());

        let err = service
            .record_spending(budget.id, BudgetCategory::Alimentation, Money::zero())
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_amounts_are_capped() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::with_today(&storage, today());
        let budget = january(&service);

        service
            .adjust_category(budget.id, BudgetCategory::Alimentation, Money::MAX)
            .unwrap();
        let updated = service
            .adjust_category(budget.id, BudgetCategory::Transport, Money::MAX)
            .unwrap();
        assert_eq!(
            updated.total_budgeted(),
            Money::from_cents(Money::MAX.cents() * 2)
        );
        assert_eq!(updated.overall_allocation().spent_percentage(), 0);

        let err = service
            .adjust_category(
                budget.id,
                BudgetCategory::Logement,
                Money::MAX + Money::from_cents(1),
            )
            .unwrap_err();
        assert!(err.is_validation());

        service
            .record_spending(budget.id, BudgetCategory::Alimentation, Money::MAX)
            .unwrap();
        let err = service
            .record_spending(budget.id, BudgetCategory::Alimentation, Money::from_cents(1))
            .unwrap_err();
        assert!(err.is_validation());
        let err = service
            .record_spending(budget.id, BudgetCategory::Sol, -(Money::MAX + Money::from_cents(1)))
            .unwrap_err();
        assert!(err.is_validation());

        let stored = storage.budgets.get(budget.id).unwrap().unwrap();
        assert_eq!(stored.total_spent(), Money::MAX);
    }

    #[test]
    fn test_update_thresholds_and_name() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::with_today(&storage, today());
        let budget = january(&service);

        let updated = service
            .update(
                budget.id,
                BudgetUpdate {
                    name: Some("Janvye 2025".into()),
                    critical_threshold: Some(150.0),
                    alerts_enabled: Some(false),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.name, "Janvye 2025");
        assert_eq!(updated.alert_settings.thresholds.warning(), 80.0);
        assert_eq!(updated.alert_settings.thresholds.critical(), 100.0);
        assert!(!updated.alert_settings.enabled);

        let err = service.update(budget.id, BudgetUpdate::default()).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_archived_budget_is_read_only() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::with_today(&storage, today());
        let budget = january(&service);

        service.archive(budget.id).unwrap();
        assert!(service.list(false).unwrap().is_empty());
        assert_eq!(service.list(true).unwrap().len(), 1);

        let err = service
            .adjust_category(budget.id, BudgetCategory::Sante, Money::from_units(100))
            .unwrap_err();
        assert!(err.is_validation());
        assert!(service.archive(budget.id).unwrap_err().is_validation());

        service.unarchive(budget.id).unwrap();
        service
            .adjust_category(budget.id, BudgetCategory::Sante, Money::from_units(100))
            .unwrap();
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::with_today(&storage, today());
        let budget = january(&service);

        service.delete(budget.id).unwrap();
        assert!(service.get(budget.id).unwrap().is_none());
        assert!(service.delete(budget.id).unwrap_err().is_not_found());

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.last().unwrap().operation, Operation::Delete);
    }

    #[test]
    fn test_changes_survive_reload() {
        let (temp_dir, storage) = create_test_storage();
        let service = BudgetService::with_today(&storage, today());
        let budget = january(&service);
        service
            .adjust_category(budget.id, BudgetCategory::Logement, Money::from_units(20000))
            .unwrap();

        let paths = LajanPaths::with_base_dir(temp_dir.path().to_path_buf());
        let reopened = Storage::new(paths).unwrap();
        reopened.load_all().unwrap();
        let reloaded = reopened.budgets.get(budget.id).unwrap().unwrap();
        assert_eq!(
            reloaded.budgeted_for(BudgetCategory::Logement),
            Money::from_units(20000)
        );
    }
}
