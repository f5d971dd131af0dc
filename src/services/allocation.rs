//! Charge allocation for a single itemized bill
//!
//! Works out what each consumer owes for one bill: their share of the items
//! they consumed plus a proportional share of the bill-wide tax, service
//! charge and discount.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SharetabError, SharetabResult};
use crate::models::{ExtraCharges, Item, Money, Person};

/// What one person owes for a single bill
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonChargeBreakdown {
    pub subtotal: Money,
    pub tax: Money,
    pub service_charge: Money,
    pub discount: Money,
    pub total: Money,
}

/// Per-person charges and breakdowns for one bill
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChargeAllocation {
    pub per_person_charges: BTreeMap<Person, Money>,
    pub per_person_breakdown: BTreeMap<Person, PersonChargeBreakdown>,
}

/// Result of calculating a standalone bill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillCalculation {
    pub amount: Money,
    pub subtotal: Money,
    pub tax: Money,
    pub service_charge: Money,
    pub total_discount: Money,
    pub per_person_charges: BTreeMap<Person, Money>,
    pub per_person_breakdown: BTreeMap<Person, PersonChargeBreakdown>,
}

/// Unique consumers across all items, in first-appearance order
pub fn participants_of(items: &[Item]) -> Vec<Person> {
    let mut participants: Vec<Person> = Vec::new();
    for consumer in items.iter().flat_map(|item| item.consumers.iter()) {
        if !participants.contains(consumer) {
            participants.push(consumer.clone());
        }
    }
    participants
}

/// Validate a bill before any arithmetic happens
pub fn validate_bill(items: &[Item], extras: &ExtraCharges) -> SharetabResult<()> {
    if items.is_empty() {
        return Err(SharetabError::Validation("items cannot be empty".into()));
    }
    extras.validate().map_err(SharetabError::Validation)?;

    for (i, item) in items.iter().enumerate() {
        item.validate().map_err(|reason| SharetabError::InvalidItem {
            index: i + 1,
            reason,
        })?;
    }

    items
        .iter()
        .try_fold(extras.net(), |sum, item| sum.checked_add(item.amount()))
        .ok_or_else(|| SharetabError::Validation("bill total too large".into()))?;

    Ok(())
}

/// Allocate a bill's items and extras to its participants
///
/// Each item is divided evenly among its consumers, every share rounded to
/// the cent. Extras are then shared in proportion to each participant's item
/// subtotal. If every item is free the extras are split evenly instead.
///
/// Per-item division remainders are not redistributed: three consumers of a
/// 100.00 item are each charged 33.33.
pub fn allocate_charges(
    items: &[Item],
    extras: &ExtraCharges,
    participants: &[Person],
) -> SharetabResult<ChargeAllocation> {
    validate_bill(items, extras)?;

    if participants.iter().any(Person::is_empty) {
        return Err(SharetabError::Validation(
            "participant names cannot be empty".into(),
        ));
    }
    for (i, item) in items.iter().enumerate() {
        if let Some(stranger) = item.consumers.iter().find(|c| !participants.contains(c)) {
            return Err(SharetabError::InvalidItem {
                index: i + 1,
                reason: format!("consumer '{}' is not a participant", stranger),
            });
        }
    }

    let mut breakdown: BTreeMap<Person, PersonChargeBreakdown> = participants
        .iter()
        .map(|p| (p.clone(), PersonChargeBreakdown::default()))
        .collect();

    for item in items {
        let item_amount = item.amount();
        let share = item_amount.split_even(item.consumers.len());
        debug!(
            item = %item.description,
            amount = %item_amount,
            consumers = item.consumers.len(),
            share = %share,
            "allocated item"
        );

        for consumer in &item.consumers {
            if let Some(entry) = breakdown.get_mut(consumer) {
                entry.subtotal += share;
            }
        }
    }

    let total_subtotal: Money = breakdown.values().map(|b| b.subtotal).sum();

    if total_subtotal.is_positive() {
        for entry in breakdown.values_mut() {
            entry.tax = extras.tax.prorate(entry.subtotal, total_subtotal);
            entry.service_charge = extras.service_charge.prorate(entry.subtotal, total_subtotal);
            entry.discount = extras.total_discount.prorate(entry.subtotal, total_subtotal);
            entry.total = entry.subtotal + entry.tax + entry.service_charge - entry.discount;
        }
    } else if total_subtotal.is_zero() && !participants.is_empty() {
        let count = participants.len();
        let total_each = extras.net().split_even(count);
        for entry in breakdown.values_mut() {
            entry.tax = extras.tax.split_even(count);
            entry.service_charge = extras.service_charge.split_even(count);
            entry.discount = extras.total_discount.split_even(count);
            entry.total = total_each;
        }
    }

    let per_person_charges = breakdown
        .iter()
        .map(|(person, b)| (person.clone(), b.total))
        .collect();

    Ok(ChargeAllocation {
        per_person_charges,
        per_person_breakdown: breakdown,
    })
}

/// Calculate a standalone bill without recording it
///
/// Names are normalized and repeated consumers on an item collapsed before
/// allocation. Participants are everyone who consumed at least one item.
pub fn calculate_single_bill(
    items: &[Item],
    extras: &ExtraCharges,
) -> SharetabResult<BillCalculation> {
    let items: Vec<Item> = items.iter().cloned().map(normalize_item).collect();
    let participants = participants_of(&items);
    let allocation = allocate_charges(&items, extras, &participants)?;

    let subtotal: Money = items.iter().map(Item::amount).sum();

    Ok(BillCalculation {
        amount: subtotal + extras.net(),
        subtotal,
        tax: extras.tax,
        service_charge: extras.service_charge,
        total_discount: extras.total_discount,
        per_person_charges: allocation.per_person_charges,
        per_person_breakdown: allocation.per_person_breakdown,
    })
}

/// Re-normalize names and drop repeated consumers on an item
pub(crate) fn normalize_item(mut item: Item) -> Item {
    item.paid_by = Person::new(item.paid_by.as_str());
    item.consumers = crate::models::unique_people(item.consumers.iter().map(Person::as_str));
    item
}
