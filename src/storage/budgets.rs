//! Budget repository for JSON storage
//!
//! Manages loading and saving budget records to data/budgets.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use tracing::debug;

use crate::error::LajanError;
use crate::models::{Budget, BudgetId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable budget file layout
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BudgetData {
    #[serde(default)]
    budgets: Vec<Budget>,
}

/// Repository for budget persistence
pub struct BudgetRepository {
    path: PathBuf,
    data: RwLock<HashMap<BudgetId, Budget>>,
}

impl BudgetRepository {
    /// Create a new budget repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load budgets from disk
    pub fn load(&self) -> Result<(), LajanError> {
        let file_data: BudgetData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| LajanError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for budget in file_data.budgets {
            data.insert(budget.id, budget);
        }

        debug!(count = data.len(), "loaded budgets");
        Ok(())
    }

    /// Save budgets to disk
    pub fn save(&self) -> Result<(), LajanError> {
        let data = self
            .data
            .read()
            .map_err(|e| LajanError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut budgets: Vec<_> = data.values().cloned().collect();
        sort_budgets(&mut budgets);

        write_json_atomic(&self.path, &BudgetData { budgets })
    }

    /// Get a budget by ID
    pub fn get(&self, id: BudgetId) -> Result<Option<Budget>, LajanError> {
        let data = self
            .data
            .read()
            .map_err(|e| LajanError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// All budgets, newest window first
    pub fn get_all(&self) -> Result<Vec<Budget>, LajanError> {
        let data = self
            .data
            .read()
            .map_err(|e| LajanError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut budgets: Vec<_> = data.values().cloned().collect();
        sort_budgets(&mut budgets);
        Ok(budgets)
    }

    /// Budgets that are not archived, newest window first
    pub fn get_active(&self) -> Result<Vec<Budget>, LajanError> {
        let all = self.get_all()?;
        Ok(all.into_iter().filter(|b| !b.is_archived).collect())
    }

    /// Get a budget by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Budget>, LajanError> {
        let data = self
            .data
            .read()
            .map_err(|e| LajanError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let name_lower = name.trim().to_lowercase();
        Ok(data
            .values()
            .find(|b| b.name.to_lowercase() == name_lower)
            .cloned())
    }

    /// Budgets whose ID matches a full UUID or a short-ID prefix
    pub fn find_by_id_prefix(&self, needle: &str) -> Result<Vec<Budget>, LajanError> {
        let data = self
            .data
            .read()
            .map_err(|e| LajanError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut matches: Vec<_> = data.values().filter(|b| b.id.matches(needle)).cloned().collect();
        sort_budgets(&mut matches);
        Ok(matches)
    }

    /// Insert or update a budget
    pub fn upsert(&self, budget: Budget) -> Result<(), LajanError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LajanError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(budget.id, budget);
        Ok(())
    }

    /// Delete a budget; returns whether it existed
    pub fn delete(&self, id: BudgetId) -> Result<bool, LajanError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LajanError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id).is_some())
    }

    /// Check if a budget name is already taken
    pub fn name_exists(&self, name: &str, exclude_id: Option<BudgetId>) -> Result<bool, LajanError> {
        let data = self
            .data
            .read()
            .map_err(|e| LajanError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let name_lower = name.trim().to_lowercase();
        Ok(data
            .values()
            .any(|b| b.name.to_lowercase() == name_lower && Some(b.id) != exclude_id))
    }

    /// Count budgets
    pub fn count(&self) -> Result<usize, LajanError> {
        let data = self
            .data
            .read()
            .map_err(|e| LajanError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}

fn sort_budgets(budgets: &mut [Budget]) {
    budgets.sort_by(|a, b| {
        b.start_date
            .cmp(&a.start_date)
            .then_with(|| a.name.cmp(&b.name))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetCategory, BudgetPeriod, Currency, Money};
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, BudgetRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("budgets.json");
        let repo = BudgetRepository::new(path);
        (temp_dir, repo)
    }

    fn budget(name: &str, month: u32) -> Budget {
        Budget::new(name, &BudgetPeriod::monthly(2025, month), Currency::Htg)
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_upsert_and_get() {
        let (_temp_dir, repo) = create_test_repo();
        let b = budget("Janvye", 1);
        let id = b.id;

        repo.upsert(b).unwrap();
        let retrieved = repo.get(id).unwrap().unwrap();
        assert_eq!(retrieved.name, "Janvye");
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let mut b = budget("Janvye", 1);
        b.set_category_amount(BudgetCategory::Transport, Money::from_units(5000));
        let id = b.id;
        repo.upsert(b).unwrap();
        repo.save().unwrap();

        let repo2 = BudgetRepository::new(temp_dir.path().join("budgets.json"));
        repo2.load().unwrap();
        let reloaded = repo2.get(id).unwrap().unwrap();
        assert_eq!(
            reloaded.budgeted_for(BudgetCategory::Transport),
            Money::from_units(5000)
        );
    }

    #[test]
    fn test_newest_window_first() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(budget("Janvye", 1)).unwrap();
        repo.upsert(budget("Mas", 3)).unwrap();
        repo.upsert(budget("Fevriye", 2)).unwrap();

        let names: Vec<_> = repo.get_all().unwrap().into_iter().map(|b| b.name).collect();
        assert_eq!(names, vec!["Mas", "Fevriye", "Janvye"]);
    }

    #[test]
    fn test_get_by_name_case_insensitive() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(budget("Janvye", 1)).unwrap();

        assert!(repo.get_by_name("janvye").unwrap().is_some());
        assert!(repo.get_by_name(" JANVYE ").unwrap().is_some());
        assert!(repo.get_by_name("Fevriye").unwrap().is_none());
    }

    #[test]
    fn test_find_by_id_prefix() {
        let (_temp_dir, repo) = create_test_repo();
        let b = budget("Janvye", 1);
        let short = b.id.short();
        repo.upsert(b).unwrap();
        repo.upsert(budget("Fevriye", 2)).unwrap();

        let found = repo.find_by_id_prefix(&short).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Janvye");
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, repo) = create_test_repo();
        let b = budget("Janvye", 1);
        let id = b.id;
        repo.upsert(b).unwrap();

        assert!(repo.delete(id).unwrap());
        assert!(!repo.delete(id).unwrap());
        assert!(repo.get(id).unwrap().is_none());
    }

    #[test]
    fn test_get_active_filters_archived() {
        let (_temp_dir, repo) = create_test_repo();
        let mut old = budget("Janvye", 1);
        old.archive();
        repo.upsert(old).unwrap();
        repo.upsert(budget("Fevriye", 2)).unwrap();

        assert_eq!(repo.get_all().unwrap().len(), 2);
        let active = repo.get_active().unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "Fevriye");
    }

    #[test]
    fn test_name_exists() {
        let (_temp_dir, repo) = create_test_repo();
        let b = budget("Janvye", 1);
        let id = b.id;
        repo.upsert(b).unwrap();

        assert!(repo.name_exists("JANVYE", None).unwrap());
        assert!(!repo.name_exists("Janvye", Some(id)).unwrap());
        assert!(!repo.name_exists("Fevriye", None).unwrap());
    }
}
