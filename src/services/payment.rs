//! Payment service
//!
//! Records money actually handed over between trip members so that later
//! settlement runs only suggest what is still outstanding.

use crate::audit::EntityType;
use crate::error::{SharetabError, SharetabResult};
use crate::models::{Balances, Money, Payment, Person};
use crate::storage::Storage;

use super::settlement::apply_payments;
use super::trip::TripService;

/// Service for recorded payments
pub struct PaymentService<'a> {
    storage: &'a Storage,
}

impl<'a> PaymentService<'a> {
    /// Create a new payment service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a payment from one person to another
    pub fn record(
        &self,
        code: &str,
        from: &str,
        to: &str,
        amount: Money,
        description: &str,
    ) -> SharetabResult<Payment> {
        let trip = TripService::new(self.storage).find_by_code(code)?;

        let payment = Payment::new(trip.id, Person::new(from), Person::new(to), amount)
            .with_description(description.trim());
        payment.validate().map_err(SharetabError::Validation)?;

        self.storage.payments.upsert(payment.clone())?;
        self.storage.payments.save()?;

        self.storage.log_create(
            EntityType::Payment,
            payment.id.to_string(),
            Some(format!("{} -> {}", payment.from, payment.to)),
            &payment,
        )?;

        Ok(payment)
    }

    /// Payments recorded on a trip, oldest first
    pub fn list(&self, code: &str) -> SharetabResult<Vec<Payment>> {
        let trip = TripService::new(self.storage).find_by_code(code)?;
        self.storage.payments.get_by_trip(trip.id)
    }

    /// Delete a payment by full or short id
    pub fn delete(&self, reference: &str) -> SharetabResult<Payment> {
        let payment = self
            .storage
            .payments
            .find(reference)?
            .ok_or_else(|| SharetabError::payment_not_found(reference.trim()))?;

        self.storage.payments.delete(payment.id)?;
        self.storage.payments.save()?;

        self.storage.log_delete(
            EntityType::Payment,
            payment.id.to_string(),
            Some(format!("{} -> {}", payment.from, payment.to)),
            &payment,
        )?;

        Ok(payment)
    }

    /// Balances of a trip after its recorded payments
    pub fn adjusted_balances(&self, code: &str, balances: &Balances) -> SharetabResult<Balances> {
        let payments = self.list(code)?;
        Ok(apply_payments(balances, &payments))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SharetabPaths;
    use crate::models::Trip;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Storage, Trip) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SharetabPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        let trip = TripService::new(&storage).create("Bali", "andi").unwrap();
        (temp_dir, storage, trip)
    }

    #[test]
    fn test_record_and_list() {
        let (_temp_dir, storage, trip) = setup();
        let service = PaymentService::new(&storage);

        let payment = service
            .record(&trip.code, "Budi", "andi", Money::from_units(25), " cash ")
            .unwrap();

        assert_eq!(payment.from, Person::new("budi"));
        assert_eq!(payment.description, "cash");
        assert_eq!(service.list(&trip.code).unwrap(), vec![payment]);
    }

    #[test]
    fn test_record_validation() {
        let (_temp_dir, storage, trip) = setup();
        let service = PaymentService::new(&storage);

        let err = service
            .record(&trip.code, "andi", "ANDI", Money::from_units(5), "")
            .unwrap_err();
        assert_eq!(err.to_string(), "Validation error: cannot pay to yourself");

        let err = service
            .record(&trip.code, "budi", "andi", Money::zero(), "")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: amount must be greater than 0"
        );

        let err = service
            .record("NOPE00", "budi", "andi", Money::from_units(1), "")
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, storage, trip) = setup();
        let service = PaymentService::new(&storage);
        let payment = service
            .record(&trip.code, "budi", "andi", Money::from_units(25), "")
            .unwrap();

        service.delete(&payment.id.to_string()).unwrap();

        assert!(service.list(&trip.code).unwrap().is_empty());
        assert!(service
            .delete(&payment.id.to_string())
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_adjusted_balances() {
        let (_temp_dir, storage, trip) = setup();
        let service = PaymentService::new(&storage);
        service
            .record(&trip.code, "budi", "andi", Money::from_units(30), "")
            .unwrap();

        let mut balances = Balances::new();
        balances.insert(Person::new("andi"), Money::from_units(50));
        balances.insert(Person::new("budi"), Money::from_units(-50));

        let adjusted = service.adjusted_balances(&trip.code, &balances).unwrap();

        assert_eq!(adjusted[&Person::new("andi")], Money::from_units(20));
        assert_eq!(adjusted[&Person::new("budi")], Money::from_units(-20));
    }
}
