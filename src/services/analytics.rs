//! Analytics service
//!
//! Joins stored budgets with the pure computations in `analytics`: category
//! reports, suggestions fed by earlier budgets, reallocation previews,
//! statistics and alerts.

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::debug;

use crate::analytics::{
    self, assess, simulate, BudgetAlert, BudgetStats, SimulationResult, StatusAssessment,
    Suggestion, SuggestionInput,
};
use crate::error::LajanResult;
use crate::models::{Budget, BudgetAllocation, BudgetCategory, Money};
use crate::storage::Storage;

/// Number of earlier budgets considered for a category's history
const HISTORY_WINDOW: usize = 6;

/// Service for budget analysis
pub struct AnalyticsService<'a> {
    storage: &'a Storage,
    today: NaiveDate,
}

/// One row of a budget's category report
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryReport {
    pub category: BudgetCategory,
    pub allocation: BudgetAllocation,
    pub assessment: StatusAssessment,
}

/// Spending of a category across earlier budgets
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryHistory {
    pub category: BudgetCategory,
    /// Spend per earlier budget, oldest first
    pub samples: Vec<Money>,
    pub average: Option<Money>,
    /// Percent change between the two most recent samples
    pub trend_percent: Option<f64>,
}

impl CategoryHistory {
    fn from_samples(category: BudgetCategory, samples: Vec<Money>) -> Self {
        let average = if samples.is_empty() {
            None
        } else {
            let total: Money = samples.iter().sum();
            Some(Money::from_cents(total.cents() / samples.len() as i64))
        };

        let trend_percent = match samples.as_slice() {
            [.., previous, latest] if previous.is_positive() => {
                Some((*latest - *previous).ratio_percent(*previous))
            }
            _ => None,
        };

        Self {
            category,
            samples,
            average,
            trend_percent,
        }
    }
}

impl<'a> AnalyticsService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self::with_today(storage, Local::now().date_naive())
    }

    pub fn with_today(storage: &'a Storage, today: NaiveDate) -> Self {
        Self { storage, today }
    }

    /// Status of the whole budget
    pub fn assess_budget(&self, budget: &Budget) -> StatusAssessment {
        assess(
            &budget.overall_allocation(),
            &budget.alert_settings.thresholds,
        )
    }

    /// Status of every category that is budgeted or has spending
    pub fn category_report(&self, budget: &Budget) -> Vec<CategoryReport> {
        budget
            .category_allocations()
            .into_iter()
            .map(|entry| CategoryReport {
                category: entry.category,
                assessment: assess(&entry.allocation, &budget.alert_settings.thresholds),
                allocation: entry.allocation,
            })
            .collect()
    }

    /// Spending history of a category in earlier budgets of the same period
    /// kind and currency
    pub fn category_history(
        &self,
        budget: &Budget,
        category: BudgetCategory,
    ) -> LajanResult<CategoryHistory> {
        let mut earlier: Vec<Budget> = self
            .storage
            .budgets
            .get_all()?
            .into_iter()
            .filter(|b| {
                b.id != budget.id
                    && b.period == budget.period
                    && b.currency == budget.currency
                    && b.end_date < budget.start_date
                    && b.has_category(category)
            })
            .collect();

        earlier.sort_by_key(|b| b.start_date);
        let skip = earlier.len().saturating_sub(HISTORY_WINDOW);
        let samples: Vec<Money> = earlier
            .iter()
            .skip(skip)
            .map(|b| b.spent_for(category))
            .collect();

        debug!(
            budget = %budget.id,
            category = category.key(),
            samples = samples.len(),
            "collected category history"
        );
        Ok(CategoryHistory::from_samples(category, samples))
    }

    /// Adjustment suggestions for one category, strongest first
    pub fn suggest(&self, budget: &Budget, category: BudgetCategory) -> LajanResult<Vec<Suggestion>> {
        let history = self.category_history(budget, category)?;
        let allocation = budget.allocation_for(category);

        Ok(analytics::suggest(&SuggestionInput {
            current_amount: allocation.budgeted,
            spent_amount: allocation.spent,
            spent_percentage: allocation.spent_percentage(),
            currency: budget.currency,
            historical_average: history.average,
            trend_percent: history.trend_percent,
        }))
    }

    /// Preview the effect of setting a category to `new_amount`
    pub fn preview(
        &self,
        budget: &Budget,
        category: BudgetCategory,
        new_amount: Money,
    ) -> SimulationResult {
        simulate(
            category,
            new_amount,
            &budget.categories,
            &budget.category_spent,
            budget.currency,
            &budget.alert_settings.thresholds,
        )
    }

    /// Budget statistics as of today
    pub fn stats(&self, budget: &Budget) -> BudgetStats {
        BudgetStats::compute(budget, self.today)
    }

    /// Categories needing attention
    pub fn alerts(&self, budget: &Budget) -> Vec<BudgetAlert> {
        analytics::alerts(budget)
    }

    /// Alerts for every active budget whose window contains today
    pub fn current_alerts(&self) -> LajanResult<Vec<(Budget, Vec<BudgetAlert>)>> {
        Ok(self
            .storage
            .budgets
            .get_active()?
            .into_iter()
            .filter(|b| b.contains(self.today))
            .filter_map(|b| {
                let alerts = analytics::alerts(&b);
                (!alerts.is_empty()).then_some((b, alerts))
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::{BudgetStatus, SuggestionKind};
    use crate::config::LajanPaths;
    use crate::models::{AlertThresholds, BudgetPeriod, Currency};
    use crate::services::BudgetService;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LajanPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 10).unwrap()
    }

    /// Budgets for January..=April with transport spending 3000, 4000, 5000
    /// and the current month at 5000 budgeted / 1000 spent
    fn setup(storage: &Storage) -> Budget {
        let budgets = BudgetService::with_today(storage, today());
        let spending = [3000, 4000, 5000];
        for (i, spent) in spending.iter().enumerate() {
            let month = i as u32 + 1;
            let b = budgets
                .create(
                    &format!("M{}", month),
                    &BudgetPeriod::monthly(2025, month),
                    Currency::Htg,
                    AlertThresholds::default(),
                )
                .unwrap();
            budgets
                .adjust_category(b.id, BudgetCategory::Transport, Money::from_units(5000))
                .unwrap();
            budgets
                .record_spending(b.id, BudgetCategory::Transport, Money::from_units(*spent))
                .unwrap();
        }

        // Other currency and period kind stay out of the history
        let usd = budgets
            .create(
                "USD",
                &BudgetPeriod::monthly(2025, 2),
                Currency::Usd,
                AlertThresholds::default(),
            )
            .unwrap();
        budgets
            .record_spending(usd.id, BudgetCategory::Transport, Money::from_units(99999))
            .unwrap();
        let yearly = budgets
            .create(
                "2024",
                &BudgetPeriod::yearly(2024),
                Currency::Htg,
                AlertThresholds::default(),
            )
            .unwrap();
        budgets
            .record_spending(yearly.id, BudgetCategory::Transport, Money::from_units(99999))
            .unwrap();

        let april = budgets
            .create(
                "Avril",
                &BudgetPeriod::monthly(2025, 4),
                Currency::Htg,
                AlertThresholds::default(),
            )
            .unwrap();
        budgets
            .adjust_category(april.id, BudgetCategory::Transport, Money::from_units(5000))
            .unwrap();
        budgets
            .record_spending(april.id, BudgetCategory::Transport, Money::from_units(1000))
            .unwrap()
    }

    #[test]
    fn test_category_history() {
        let (_temp_dir, storage) = create_test_storage();
        let april = setup(&storage);
        let service = AnalyticsService::with_today(&storage, today());

        let history = service
            .category_history(&april, BudgetCategory::Transport)
            .unwrap();
        assert_eq!(
            history.samples,
            vec![
                Money::from_units(3000),
                Money::from_units(4000),
                Money::from_units(5000)
            ]
        );
        assert_eq!(history.average, Some(Money::from_units(4000)));
        assert_eq!(history.trend_percent, Some(25.0));
    }

    #[test]
    fn test_history_empty_without_earlier_budgets() {
        let history = CategoryHistory::from_samples(BudgetCategory::Sol, Vec::new());
        assert!(history.average.is_none());
        assert!(history.trend_percent.is_none());

        let single = CategoryHistory::from_samples(BudgetCategory::Sol, vec![Money::from_units(10)]);
        assert_eq!(single.average, Some(Money::from_units(10)));
        assert!(single.trend_percent.is_none());
    }

    #[test]
    fn test_suggest_uses_history() {
        let (_temp_dir, storage) = create_test_storage();
        let april = setup(&storage);
        let service = AnalyticsService::with_today(&storage, today());

        let suggestions = service.suggest(&april, BudgetCategory::Transport).unwrap();
        let kinds: Vec<_> = suggestions.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SuggestionKind::HistoricalAlignment,
                SuggestionKind::TrendAdjustment,
                SuggestionKind::UtilizationDecrease,
            ]
        );
        // 4000 + 10%
        assert_eq!(suggestions[0].new_amount, Money::from_units(4400));
        // 5000 + 25%
        assert_eq!(suggestions[1].new_amount, Money::from_units(6250));
    }

    #[test]
    fn test_preview_does_not_mutate() {
        let (_temp_dir, storage) = create_test_storage();
        let april = setup(&storage);
        let service = AnalyticsService::with_today(&storage, today());

        let result = service.preview(&april, BudgetCategory::Transport, Money::from_units(800));
        assert_eq!(result.new_status, BudgetStatus::Exceeded);

        let stored = storage.budgets.get(april.id).unwrap().unwrap();
        assert_eq!(
            stored.budgeted_for(BudgetCategory::Transport),
            Money::from_units(5000)
        );
    }

    #[test]
    fn test_category_report_and_budget_status() {
        let (_temp_dir, storage) = create_test_storage();
        let april = setup(&storage);
        let service = AnalyticsService::with_today(&storage, today());

        let report = service.category_report(&april);
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].assessment.spent_percentage, 20);
        assert_eq!(service.assess_budget(&april).status, BudgetStatus::Healthy);
    }

    #[test]
    fn test_current_alerts() {
        let (_temp_dir, storage) = create_test_storage();
        let april = setup(&storage);
        let budgets = BudgetService::with_today(&storage, today());
        budgets
            .record_spending(april.id, BudgetCategory::Transport, Money::from_units(4500))
            .unwrap();

        let service = AnalyticsService::with_today(&storage, today());
        let current = service.current_alerts().unwrap();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].0.id, april.id);
        assert_eq!(current[0].1[0].status, BudgetStatus::Exceeded);
    }
}
