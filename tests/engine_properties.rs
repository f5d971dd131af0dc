//! Properties of the allocation and settlement engine over generated inputs

use proptest::prelude::*;
use sharetab::models::{Balances, Expense, ExtraCharges, Item, Money, Person, TripId};
use sharetab::services::{
    aggregate_balances, allocate_charges, apply_settlements, minimize_settlements,
    participants_of,
};

const NAMES: [&str; 6] = ["ana", "ben", "cy", "dee", "eli", "fay"];

fn total(balances: &Balances) -> Money {
    balances.values().sum()
}

fn person() -> impl Strategy<Value = Person> {
    prop::sample::select(NAMES.to_vec()).prop_map(Person::new)
}

fn people() -> impl Strategy<Value = Vec<Person>> {
    prop::sample::subsequence(NAMES.to_vec(), 1..=NAMES.len())
        .prop_map(|names| names.into_iter().map(Person::new).collect())
}

/// An item whose price divides evenly among its consumers
fn divisible_item() -> impl Strategy<Value = Item> {
    (people(), 1i64..=3000, 1u32..=4, person()).prop_map(
        |(consumers, per_head, quantity, payer)| {
            let unit = Money::from_cents(consumers.len() as i64 * per_head);
            Item::new("item", unit, quantity, payer, consumers)
        },
    )
}

fn extras() -> impl Strategy<Value = ExtraCharges> {
    (0i64..1000, 0i64..1000, 0i64..=500).prop_map(|(tax, service, discount)| {
        ExtraCharges::new(
            Money::from_cents(tax),
            Money::from_cents(service),
            Money::from_cents(discount),
        )
    })
}

/// An expense whose every division comes out in whole cents
fn divisible_expense() -> impl Strategy<Value = Expense> {
    prop_oneof![
        (people(), 1i64..=5000, person()).prop_map(|(among, per_head, payer)| {
            let amount = Money::from_cents(among.len() as i64 * per_head);
            Expense::equal(TripId::new(), "shared", amount, ExtraCharges::none(), payer, among)
        }),
        (prop::collection::vec(divisible_item(), 1..=5), person()).prop_map(|(items, payer)| {
            Expense::itemized(TripId::new(), "itemized", ExtraCharges::none(), payer, items)
        }),
    ]
}

/// Balances over a subset of people that sum to zero
fn zero_sum_balances() -> impl Strategy<Value = Balances> {
    (people(), prop::collection::vec(-10_000i64..=10_000, NAMES.len())).prop_map(
        |(people, amounts)| {
            let mut balances = Balances::new();
            let mut running = 0i64;
            let (last, rest) = people.split_last().expect("at least one person");
            for (person, cents) in rest.iter().zip(amounts) {
                running += cents;
                balances.insert(person.clone(), Money::from_cents(cents));
            }
            balances.insert(last.clone(), Money::from_cents(-running));
            balances
        },
    )
}

proptest! {
    #[test]
    fn balances_sum_to_zero_without_extras(
        expenses in prop::collection::vec(divisible_expense(), 1..=6),
    ) {
        let balances = aggregate_balances(&expenses).unwrap();

        prop_assert_eq!(total(&balances), Money::zero());
    }

    #[test]
    fn itemized_extras_never_unbalance_divisible_items(
        items in prop::collection::vec(divisible_item(), 1..=5),
        extras in extras(),
        payer in person(),
    ) {
        let expense = Expense::itemized(TripId::new(), "itemized", extras, payer, items);

        let balances = aggregate_balances(std::slice::from_ref(&expense)).unwrap();

        prop_assert_eq!(total(&balances), Money::zero());
    }

    #[test]
    fn allocation_conserves_item_subtotals(
        items in prop::collection::vec(divisible_item(), 1..=6),
    ) {
        let participants = participants_of(&items);

        let allocation = allocate_charges(&items, &ExtraCharges::none(), &participants).unwrap();

        let allocated: Money = allocation
            .per_person_breakdown
            .values()
            .map(|b| b.subtotal)
            .sum();
        let billed: Money = items.iter().map(Item::amount).sum();
        prop_assert_eq!(allocated, billed);
    }

    #[test]
    fn allocation_loses_at_most_half_a_cent_per_consumer(
        lines in prop::collection::vec((people(), 1i64..=99_999), 1..=6),
    ) {
        let items: Vec<Item> = lines
            .into_iter()
            .map(|(consumers, cents)| {
                Item::new("item", Money::from_cents(cents), 1, consumers[0].clone(), consumers)
            })
            .collect();
        let participants = participants_of(&items);

        let allocation = allocate_charges(&items, &ExtraCharges::none(), &participants).unwrap();

        let allocated: Money = allocation
            .per_person_breakdown
            .values()
            .map(|b| b.subtotal)
            .sum();
        let billed: Money = items.iter().map(Item::amount).sum();
        let slack: usize = items.iter().map(|i| i.consumers.len()).sum();
        prop_assert!((allocated - billed).abs().cents() * 2 <= slack as i64);
    }

    #[test]
    fn settlements_clear_balances_in_few_transfers(balances in zero_sum_balances()) {
        let settlements = minimize_settlements(&balances);
        let after = apply_settlements(&balances, &settlements);

        prop_assert!(after.values().all(Money::is_zero));
        let nonzero = balances.values().filter(|m| !m.is_zero()).count();
        prop_assert!(settlements.len() <= nonzero.saturating_sub(1));
        prop_assert!(settlements.iter().all(|s| s.amount.is_positive()));
    }
}

#[test]
fn settlement_leaves_at_most_one_cent_from_equal_split_remainder() {
    let trip = TripId::new();
    let expense = Expense::equal(
        trip,
        "villa",
        Money::from_units(100),
        ExtraCharges::none(),
        "a",
        vec![Person::new("a"), Person::new("b"), Person::new("c")],
    );

    let balances = aggregate_balances(&[expense]).unwrap();
    let after = apply_settlements(&balances, &minimize_settlements(&balances));

    assert!(after.values().all(|m| m.abs() <= Money::from_cents(1)));
}

#[test]
fn scenario_single_item_two_consumers() {
    let items = vec![Item::new(
        "shared plate",
        Money::from_units(100),
        1,
        "alice",
        vec![Person::new("alice"), Person::new("bob")],
    )];

    let allocation =
        allocate_charges(&items, &ExtraCharges::none(), &participants_of(&items)).unwrap();

    for name in ["alice", "bob"] {
        let b = allocation.per_person_breakdown[&Person::new(name)];
        assert_eq!(b.subtotal, Money::from_units(50));
        assert_eq!(b.total, Money::from_units(50));
    }
}

#[test]
fn scenario_tax_and_service_shared_evenly() {
    let items = vec![Item::new(
        "shared plate",
        Money::from_units(100),
        1,
        "alice",
        vec![Person::new("alice"), Person::new("bob")],
    )];
    let extras = ExtraCharges::new(Money::from_units(10), Money::from_units(5), Money::zero());

    let allocation = allocate_charges(&items, &extras, &participants_of(&items)).unwrap();

    let total: Money = allocation.per_person_charges.values().sum();
    assert_eq!(total, Money::from_units(115));
    for name in ["alice", "bob"] {
        let b = allocation.per_person_breakdown[&Person::new(name)];
        assert_eq!(b.subtotal, Money::from_units(50));
        assert_eq!(b.tax, Money::from_units(5));
        assert_eq!(b.service_charge, Money::from_cents(250));
        assert_eq!(b.total, Money::from_cents(5750));
    }
}

#[test]
fn scenario_equal_split_three_ways() {
    let expense = Expense::equal(
        TripId::new(),
        "dinner",
        Money::from_units(90),
        ExtraCharges::none(),
        "a",
        vec![Person::new("a"), Person::new("b"), Person::new("c")],
    );

    let balances = aggregate_balances(&[expense]).unwrap();

    assert_eq!(balances[&Person::new("a")], Money::from_units(60));
    assert_eq!(balances[&Person::new("b")], Money::from_units(-30));
    assert_eq!(balances[&Person::new("c")], Money::from_units(-30));
}

#[test]
fn scenario_one_creditor_two_debtors() {
    let balances: Balances = [("a", 100), ("b", -60), ("c", -40)]
        .iter()
        .map(|(name, units)| (Person::new(name), Money::from_units(*units)))
        .collect();

    let settlements = minimize_settlements(&balances);

    assert_eq!(settlements.len(), 2);
    assert_eq!(settlements[0].from, Person::new("b"));
    assert_eq!(settlements[0].to, Person::new("a"));
    assert_eq!(settlements[0].amount, Money::from_units(60));
    assert_eq!(settlements[1].from, Person::new("c"));
    assert_eq!(settlements[1].amount, Money::from_units(40));
}
