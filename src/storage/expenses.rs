//! Expense repository for JSON storage
//!
//! Manages loading and saving expenses to expenses.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SharetabError;
use crate::models::{Expense, ExpenseId, TripId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable expense data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub(crate) struct ExpenseData {
    expenses: Vec<Expense>,
}

/// Repository for expense persistence with a per-trip index
pub struct ExpenseRepository {
    path: PathBuf,
    data: RwLock<HashMap<ExpenseId, Expense>>,
    /// Index: trip_id -> expense_ids
    by_trip: RwLock<HashMap<TripId, Vec<ExpenseId>>>,
}

fn chronological(a: &Expense, b: &Expense) -> std::cmp::Ordering {
    a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id))
}

impl ExpenseRepository {
    /// Create a new expense repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_trip: RwLock::new(HashMap::new()),
        }
    }

    /// Load expenses from disk and build the trip index
    pub fn load(&self) -> Result<(), SharetabError> {
        let file_data: ExpenseData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            SharetabError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_trip = self.by_trip.write().map_err(|e| {
            SharetabError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        by_trip.clear();

        for expense in file_data.expenses {
            by_trip.entry(expense.trip_id).or_default().push(expense.id);
            data.insert(expense.id, expense);
        }

        Ok(())
    }

    /// Save expenses to disk in recording order
    pub fn save(&self) -> Result<(), SharetabError> {
        let data = self.data.read().map_err(|e| {
            SharetabError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut expenses: Vec<_> = data.values().cloned().collect();
        expenses.sort_by(chronological);

        write_json_atomic(&self.path, &ExpenseData { expenses })
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> Result<Option<Expense>, SharetabError> {
        let data = self.data.read().map_err(|e| {
            SharetabError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).cloned())
    }

    /// Get the expenses of a trip, in the order they were recorded
    pub fn get_by_trip(&self, trip_id: TripId) -> Result<Vec<Expense>, SharetabError> {
        let data = self.data.read().map_err(|e| {
            SharetabError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        let by_trip = self.by_trip.read().map_err(|e| {
            SharetabError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut expenses: Vec<_> = by_trip
            .get(&trip_id)
            .map(|ids| ids.iter().filter_map(|id| data.get(id).cloned()).collect())
            .unwrap_or_default();
        expenses.sort_by(chronological);
        Ok(expenses)
    }

    /// Find an expense of a trip by full or short id
    pub fn find_in_trip(
        &self,
        trip_id: TripId,
        reference: &str,
    ) -> Result<Option<Expense>, SharetabError> {
        Ok(self
            .get_by_trip(trip_id)?
            .into_iter()
            .find(|expense| expense.id.matches(reference)))
    }

    /// Insert or update an expense
    pub fn upsert(&self, expense: Expense) -> Result<(), SharetabError> {
        let mut data = self.data.write().map_err(|e| {
            SharetabError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_trip = self.by_trip.write().map_err(|e| {
            SharetabError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        if let Some(old) = data.get(&expense.id) {
            if let Some(ids) = by_trip.get_mut(&old.trip_id) {
                ids.retain(|&id| id != expense.id);
            }
        }

        by_trip.entry(expense.trip_id).or_default().push(expense.id);
        data.insert(expense.id, expense);
        Ok(())
    }

    /// Delete an expense, returning it if it existed
    pub fn delete(&self, id: ExpenseId) -> Result<Option<Expense>, SharetabError> {
        let mut data = self.data.write().map_err(|e| {
            SharetabError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_trip = self.by_trip.write().map_err(|e| {
            SharetabError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let removed = data.remove(&id);
        if let Some(expense) = &removed {
            if let Some(ids) = by_trip.get_mut(&expense.trip_id) {
                ids.retain(|&other| other != id);
            }
        }
        Ok(removed)
    }

    /// Number of expenses across all trips
    pub fn count(&self) -> Result<usize, SharetabError> {
        let data = self.data.read().map_err(|e| {
            SharetabError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExtraCharges, Item, Money, Person};
    use chrono::Duration;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, ExpenseRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = ExpenseRepository::new(temp_dir.path().join("expenses.json"));
        (temp_dir, repo)
    }

    fn dinner(trip_id: TripId, description: &str) -> Expense {
        Expense::equal(
            trip_id,
            description,
            Money::from_units(90),
            ExtraCharges::none(),
            "andi",
            vec![Person::new("andi"), Person::new("budi"), Person::new("citra")],
        )
    }

    #[test]
    fn test_get_by_trip_is_chronological() {
        let (_temp_dir, repo) = create_test_repo();
        let trip = TripId::new();
        let other_trip = TripId::new();

        let mut late = dinner(trip, "late");
        let mut early = dinner(trip, "early");
        early.created_at = late.created_at - Duration::hours(2);
        late.created_at = late.created_at + Duration::hours(1);

        repo.upsert(late).unwrap();
        repo.upsert(dinner(other_trip, "elsewhere")).unwrap();
        repo.upsert(early).unwrap();

        let expenses = repo.get_by_trip(trip).unwrap();
        let names: Vec<_> = expenses.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(names, vec!["early", "late"]);
        assert!(repo.get_by_trip(TripId::new()).unwrap().is_empty());
    }

    #[test]
    fn test_find_and_delete() {
        let (_temp_dir, repo) = create_test_repo();
        let trip = TripId::new();
        let expense = dinner(trip, "dinner");
        let id = expense.id;
        repo.upsert(expense).unwrap();

        let short = id.to_string();
        assert!(repo.find_in_trip(trip, &short).unwrap().is_some());
        assert!(repo.find_in_trip(TripId::new(), &short).unwrap().is_none());

        assert!(repo.delete(id).unwrap().is_some());
        assert!(repo.get_by_trip(trip).unwrap().is_empty());
        assert!(repo.delete(id).unwrap().is_none());
    }

    #[test]
    fn test_itemized_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let trip = TripId::new();
        let items = vec![Item::new(
            "Nasi goreng",
            Money::from_units(50),
            2,
            "andi",
            vec![Person::new("andi"), Person::new("budi")],
        )];
        let expense = Expense::itemized(
            trip,
            "Lunch",
            ExtraCharges::new(Money::from_units(10), Money::zero(), Money::zero()),
            "andi",
            items,
        );
        repo.upsert(expense.clone()).unwrap();
        repo.save().unwrap();

        let repo2 = ExpenseRepository::new(temp_dir.path().join("expenses.json"));
        repo2.load().unwrap();

        assert_eq!(repo2.get(expense.id).unwrap(), Some(expense));
    }
}
