//! Settlement calculation
//!
//! Collapses a balance map into the smallest practical list of payments:
//! debtors pay creditors, largest amounts first, until one side runs out.

use tracing::debug;

use crate::error::{SharetabError, SharetabResult};
use crate::models::{Balances, Money, Payment, Person, Settlement, SettlementReport};
use crate::storage::Storage;

use super::balance::aggregate_balances;
use super::payment::PaymentService;

/// Produce the payments that settle a balance map
///
/// Creditors and debtors are each sorted by magnitude, largest first (stable,
/// so equal amounts keep map order), and matched greedily. For `N` people
/// with a non-zero balance this emits at most `N - 1` settlements. If the
/// balances do not sum to zero the leftover is not settled.
pub fn minimize_settlements(balances: &Balances) -> Vec<Settlement> {
    let mut creditors: Vec<(&Person, Money)> = balances
        .iter()
        .filter(|(_, amount)| amount.is_positive())
        .map(|(person, amount)| (person, *amount))
        .collect();
    let mut debtors: Vec<(&Person, Money)> = balances
        .iter()
        .filter(|(_, amount)| amount.is_negative())
        .map(|(person, amount)| (person, amount.abs()))
        .collect();

    creditors.sort_by(|a, b| b.1.cmp(&a.1));
    debtors.sort_by(|a, b| b.1.cmp(&a.1));

    let mut settlements = Vec::new();
    let (mut i, mut j) = (0, 0);

    while i < creditors.len() && j < debtors.len() {
        let amount = std::cmp::min(creditors[i].1, debtors[j].1);

        if amount.is_positive() {
            debug!(from = %debtors[j].0, to = %creditors[i].0, amount = %amount, "settlement");
            settlements.push(Settlement::new(
                debtors[j].0.clone(),
                creditors[i].0.clone(),
                amount,
            ));
        }

        creditors[i].1 -= amount;
        debtors[j].1 -= amount;

        if creditors[i].1.is_zero() {
            i += 1;
        }
        if debtors[j].1.is_zero() {
            j += 1;
        }
    }

    settlements
}

/// Apply money handed from one person to another onto a balance map
///
/// The payer's balance goes up (they owe less) and the receiver's goes down.
/// Applying the output of [`minimize_settlements`] to the balances it was
/// computed from zeroes every balance.
pub fn apply_transfers<'a, I>(balances: &Balances, transfers: I) -> Balances
where
    I: IntoIterator<Item = (&'a Person, &'a Person, Money)>,
{
    let mut adjusted = balances.clone();
    for (from, to, amount) in transfers {
        *adjusted.entry(from.clone()).or_default() += amount;
        *adjusted.entry(to.clone()).or_default() -= amount;
    }
    adjusted
}

/// Balances after settlements have been paid
pub fn apply_settlements(balances: &Balances, settlements: &[Settlement]) -> Balances {
    apply_transfers(balances, settlements.iter().map(|s| (&s.from, &s.to, s.amount)))
}

/// Balances after recorded payments
pub fn apply_payments(balances: &Balances, payments: &[Payment]) -> Balances {
    apply_transfers(balances, payments.iter().map(|p| (&p.from, &p.to, p.amount)))
}

/// Service computing settlements for stored trips
pub struct SettlementService<'a> {
    storage: &'a Storage,
}

impl<'a> SettlementService<'a> {
    /// Create a new settlement service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Work out who pays whom for a trip
    ///
    /// Balances are rebuilt from every expense on each call. With
    /// `apply_recorded_payments` the payments already made are taken off
    /// before settling. A trip with no expenses yields an empty report.
    pub fn calculate(
        &self,
        code: &str,
        apply_recorded_payments: bool,
    ) -> SharetabResult<SettlementReport> {
        let trip = self
            .storage
            .trips
            .get_by_code(code)?
            .ok_or_else(|| SharetabError::trip_not_found(code))?;

        let expenses = self.storage.expenses.get_by_trip(trip.id)?;
        if expenses.is_empty() {
            return Ok(SettlementReport::default());
        }

        let mut balances = aggregate_balances(&expenses)?;

        if apply_recorded_payments {
            balances =
                PaymentService::new(self.storage).adjusted_balances(&trip.code, &balances)?;
        }

        let settlements = minimize_settlements(&balances);

        Ok(SettlementReport {
            settlements,
            individual_balances: balances,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balances(entries: &[(&str, i64)]) -> Balances {
        entries
            .iter()
            .map(|(name, cents)| (Person::new(name), Money::from_cents(*cents)))
            .collect()
    }

    fn transfer(from: &str, to: &str, cents: i64) -> Settlement {
        Settlement::new(Person::new(from), Person::new(to), Money::from_cents(cents))
    }

    #[test]
    fn test_one_creditor_two_debtors() {
        let b = balances(&[("a", 10000), ("b", -6000), ("c", -4000)]);

        let settlements = minimize_settlements(&b);

        assert_eq!(
            settlements,
            vec![transfer("b", "a", 6000), transfer("c", "a", 4000)]
        );
    }

    #[test]
    fn test_debtor_split_across_creditors() {
        let b = balances(&[("a", 7000), ("b", 3000), ("c", -10000)]);

        let settlements = minimize_settlements(&b);

        assert_eq!(
            settlements,
            vec![transfer("c", "a", 7000), transfer("c", "b", 3000)]
        );
    }

    #[test]
    fn test_chain_of_matches() {
        let b = balances(&[("a", 5000), ("b", 2000), ("c", -4000), ("d", -3000)]);

        let settlements = minimize_settlements(&b);

        assert_eq!(
            settlements,
            vec![
                transfer("c", "a", 4000),
                transfer("d", "a", 1000),
                transfer("d", "b", 2000),
            ]
        );
    }

    #[test]
    fn test_zero_balances_ignored() {
        let b = balances(&[("a", 0), ("b", 0)]);
        assert!(minimize_settlements(&b).is_empty());
        assert!(minimize_settlements(&Balances::new()).is_empty());
    }

    #[test]
    fn test_equal_magnitudes_keep_map_order() {
        let b = balances(&[("a", 1000), ("b", 1000), ("c", -1000), ("d", -1000)]);

        let settlements = minimize_settlements(&b);

        assert_eq!(
            settlements,
            vec![transfer("c", "a", 1000), transfer("d", "b", 1000)]
        );
    }

    #[test]
    fn test_unbalanced_leftover_not_emitted() {
        // One stray cent from an unreconciled split stays with the creditor
        let b = balances(&[("a", 6667), ("b", -3333), ("c", -3333)]);

        let settlements = minimize_settlements(&b);

        assert_eq!(
            settlements,
            vec![transfer("b", "a", 3333), transfer("c", "a", 3333)]
        );
        let after = apply_settlements(&b, &settlements);
        assert_eq!(after[&Person::new("a")], Money::from_cents(1));
    }

    #[test]
    fn test_applying_settlements_clears_balances() {
        let b = balances(&[
            ("a", 12345),
            ("b", -2345),
            ("c", 500),
            ("d", -7000),
            ("e", -3500),
        ]);

        let settlements = minimize_settlements(&b);
        let after = apply_settlements(&b, &settlements);

        assert!(after.values().all(Money::is_zero));
        assert!(settlements.len() <= 4);
    }

    #[test]
    fn test_apply_payments_reduces_debt() {
        let b = balances(&[("a", 10000), ("b", -10000)]);
        let payment = Payment::new(
            crate::models::TripId::new(),
            Person::new("b"),
            Person::new("a"),
            Money::from_units(40),
        );

        let after = apply_payments(&b, &[payment]);

        assert_eq!(after[&Person::new("a")], Money::from_units(60));
        assert_eq!(after[&Person::new("b")], Money::from_units(-60));
        assert_eq!(
            minimize_settlements(&after),
            vec![transfer("b", "a", 6000)]
        );
    }

    mod service {
        use super::*;
        use crate::config::paths::SharetabPaths;
        use crate::models::ExtraCharges;
        use crate::services::{ExpenseService, PaymentService, TripService};
        use tempfile::TempDir;

        fn setup() -> (TempDir, Storage, String) {
            let temp_dir = TempDir::new().unwrap();
            let paths = SharetabPaths::with_base_dir(temp_dir.path().to_path_buf());
            let storage = Storage::open(paths).unwrap();
            let code = TripService::new(&storage).create("Bali", "a").unwrap().code;
            (temp_dir, storage, code)
        }

        fn names(list: &[&str]) -> Vec<String> {
            list.iter().map(|s| s.to_string()).collect()
        }

        #[test]
        fn test_trip_without_expenses_is_settled() {
            let (_temp_dir, storage, code) = setup();

            let report = SettlementService::new(&storage).calculate(&code, true).unwrap();

            assert!(report.is_settled());
            assert!(report.individual_balances.is_empty());
        }

        #[test]
        fn test_unknown_trip() {
            let (_temp_dir, storage, _code) = setup();
            let err = SettlementService::new(&storage)
                .calculate("NOPE00", true)
                .unwrap_err();
            assert!(err.is_not_found());
        }

        #[test]
        fn test_recorded_payments_reduce_settlements() {
            let (_temp_dir, storage, code) = setup();
            ExpenseService::new(&storage)
                .add_equal(
                    &code,
                    "Villa",
                    Money::from_units(150),
                    ExtraCharges::none(),
                    "a",
                    &names(&["a", "b", "c"]),
                )
                .unwrap();
            PaymentService::new(&storage)
                .record(&code, "b", "a", Money::from_units(50), "")
                .unwrap();

            let service = SettlementService::new(&storage);
            let with_payments = service.calculate(&code, true).unwrap();
            let without = service.calculate(&code, false).unwrap();

            assert_eq!(
                with_payments.settlements,
                vec![transfer("c", "a", 5000)]
            );
            assert_eq!(
                without.settlements,
                vec![transfer("b", "a", 5000), transfer("c", "a", 5000)]
            );
            assert_eq!(
                with_payments.individual_balances[&Person::new("b")],
                Money::zero()
            );
        }
    }
}
