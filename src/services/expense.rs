//! Expense service
//!
//! Records equal-split and itemized expenses on a trip. Names are normalized
//! on the way in and everyone mentioned joins the trip.

use tracing::debug;

use crate::audit::EntityType;
use crate::error::{SharetabError, SharetabResult};
use crate::models::{unique_people, Expense, ExtraCharges, Item, Money, Person};
use crate::storage::Storage;

use super::allocation::{normalize_item, validate_bill};
use super::trip::TripService;

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record an expense shared evenly
    ///
    /// Repeated names in `split_among` count once.
    pub fn add_equal(
        &self,
        code: &str,
        description: &str,
        subtotal: Money,
        extras: ExtraCharges,
        paid_by: &str,
        split_among: &[String],
    ) -> SharetabResult<Expense> {
        let trip = TripService::new(self.storage).find_by_code(code)?;

        if split_among.iter().any(|name| name.trim().is_empty()) {
            return Err(SharetabError::Validation(
                "splitAmong names cannot be empty".into(),
            ));
        }

        let expense = Expense::equal(
            trip.id,
            description.trim(),
            subtotal,
            extras,
            Person::new(paid_by),
            unique_people(split_among),
        );
        expense.validate()?;

        self.record(&trip.code, expense)
    }

    /// Record an itemized expense
    ///
    /// The payer of the first item is recorded as the expense's payer; the
    /// balances still credit each item's own payer.
    pub fn add_itemized(
        &self,
        code: &str,
        description: &str,
        extras: ExtraCharges,
        items: Vec<Item>,
    ) -> SharetabResult<Expense> {
        let trip = TripService::new(self.storage).find_by_code(code)?;

        let items: Vec<Item> = items.into_iter().map(normalize_item).collect();
        validate_bill(&items, &extras)?;

        let paid_by = items
            .first()
            .map(|item| item.paid_by.clone())
            .ok_or_else(|| SharetabError::Validation("items cannot be empty".into()))?;

        let expense = Expense::itemized(trip.id, description.trim(), extras, paid_by, items);
        expense.validate()?;

        self.record(&trip.code, expense)
    }

    fn record(&self, code: &str, expense: Expense) -> SharetabResult<Expense> {
        TripService::new(self.storage).ensure_participants(code, &expense.people())?;

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        debug!(id = %expense.id, amount = %expense.amount(), "recorded expense");
        self.storage.log_create(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.description.clone()),
            &expense,
        )?;

        Ok(expense)
    }

    /// Expenses of a trip in the order they were recorded
    pub fn list(&self, code: &str) -> SharetabResult<Vec<Expense>> {
        let trip = TripService::new(self.storage).find_by_code(code)?;
        self.storage.expenses.get_by_trip(trip.id)
    }

    /// Find one expense of a trip by full or short id
    pub fn get(&self, code: &str, reference: &str) -> SharetabResult<Expense> {
        let trip = TripService::new(self.storage).find_by_code(code)?;
        self.storage
            .expenses
            .find_in_trip(trip.id, reference)?
            .ok_or_else(|| SharetabError::expense_not_found(reference.trim()))
    }

    /// Remove an expense by full or short id
    pub fn remove(&self, code: &str, reference: &str) -> SharetabResult<Expense> {
        let expense = self.get(code, reference)?;

        self.storage.expenses.delete(expense.id)?;
        self.storage.expenses.save()?;

        self.storage.log_delete(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.description.clone()),
            &expense,
        )?;

        Ok(expense)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SharetabPaths;
    use crate::models::{ExpenseSplit, Trip};
    use tempfile::TempDir;

    fn setup() -> (TempDir, Storage, Trip) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SharetabPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        let trip = TripService::new(&storage).create("Bali", "andi").unwrap();
        (temp_dir, storage, trip)
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn people(list: &[&str]) -> Vec<Person> {
        list.iter().map(Person::new).collect()
    }

    #[test]
    fn test_add_equal_normalizes_and_joins_trip() {
        let (_temp_dir, storage, trip) = setup();
        let service = ExpenseService::new(&storage);

        let expense = service
            .add_equal(
                &trip.code,
                "Villa",
                Money::from_units(300),
                ExtraCharges::none(),
                " Budi ",
                &names(&["andi", "BUDI", "citra", "budi"]),
            )
            .unwrap();

        assert_eq!(expense.paid_by, Person::new("budi"));
        match &expense.split {
            ExpenseSplit::Equal { split_among, .. } => {
                assert_eq!(split_among, &people(&["andi", "budi", "citra"]))
            }
            other => panic!("unexpected split {:?}", other),
        }

        let trip = TripService::new(&storage).find_by_code(&trip.code).unwrap();
        assert_eq!(trip.participants, people(&["andi", "budi", "citra"]));
    }

    #[test]
    fn test_add_equal_validation() {
        let (_temp_dir, storage, trip) = setup();
        let service = ExpenseService::new(&storage);

        let err = service
            .add_equal(
                &trip.code,
                "Villa",
                Money::from_units(300),
                ExtraCharges::none(),
                "andi",
                &[],
            )
            .unwrap_err();
        assert_eq!(err.to_string(), "Validation error: splitAmong cannot be empty");

        let err = service
            .add_equal(
                &trip.code,
                "Villa",
                Money::from_units(300),
                ExtraCharges::new(Money::from_units(-1), Money::zero(), Money::zero()),
                "andi",
                &names(&["andi"]),
            )
            .unwrap_err();
        assert!(err.is_validation());
        assert!(service.list(&trip.code).unwrap().is_empty());
    }

    #[test]
    fn test_add_itemized_uses_first_payer() {
        let (_temp_dir, storage, trip) = setup();
        let service = ExpenseService::new(&storage);
        let items = vec![
            Item::new("Satay", Money::from_units(40), 1, "Citra", people(&["andi", "Citra"])),
            Item::new("Tea", Money::from_units(10), 2, "dewi", people(&["dewi", "dewi"])),
        ];

        let expense = service
            .add_itemized(&trip.code, "Dinner", ExtraCharges::none(), items)
            .unwrap();

        assert_eq!(expense.paid_by, Person::new("citra"));
        assert_eq!(expense.amount(), Money::from_units(60));
        match &expense.split {
            ExpenseSplit::Itemized { items } => assert_eq!(items[1].consumers, people(&["dewi"])),
            other => panic!("unexpected split {:?}", other),
        }

        let trip = TripService::new(&storage).find_by_code(&trip.code).unwrap();
        assert_eq!(trip.participants, people(&["andi", "citra", "dewi"]));
    }

    #[test]
    fn test_add_itemized_rejects_bad_item() {
        let (_temp_dir, storage, trip) = setup();
        let service = ExpenseService::new(&storage);
        let items = vec![
            Item::new("Satay", Money::from_units(40), 1, "andi", people(&["andi"])),
            Item::new("Free", Money::zero(), 1, "andi", people(&["andi"])),
        ];

        let err = service
            .add_itemized(&trip.code, "Dinner", ExtraCharges::none(), items)
            .unwrap_err();

        assert_eq!(err.to_string(), "Item 2: item price must be positive");
    }

    #[test]
    fn test_list_and_remove() {
        let (_temp_dir, storage, trip) = setup();
        let service = ExpenseService::new(&storage);
        let first = service
            .add_equal(
                &trip.code,
                "Taxi",
                Money::from_units(20),
                ExtraCharges::none(),
                "andi",
                &names(&["andi", "budi"]),
            )
            .unwrap();
        service
            .add_equal(
                &trip.code,
                "Lunch",
                Money::from_units(30),
                ExtraCharges::none(),
                "budi",
                &names(&["andi", "budi"]),
            )
            .unwrap();

        assert_eq!(service.list(&trip.code).unwrap().len(), 2);

        let removed = service.remove(&trip.code, &first.id.to_string()).unwrap();
        assert_eq!(removed.id, first.id);

        let remaining = service.list(&trip.code).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].description, "Lunch");

        let err = service.remove(&trip.code, &first.id.to_string()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_unknown_trip() {
        let (_temp_dir, storage, _trip) = setup();
        let err = ExpenseService::new(&storage).list("ZZZZZZ").unwrap_err();
        assert!(err.is_not_found());
    }
}
