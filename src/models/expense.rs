//! Expense model
//!
//! An expense is either split equally among a list of people or broken down
//! into items, each with its own payer and consumers. Both shapes carry the
//! bill-wide extras (tax, service charge, discount).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{ExpenseId, TripId};
use super::item::Item;
use super::money::Money;
use super::person::Person;

/// Bill-wide amounts that are not attached to any single item
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraCharges {
    #[serde(default)]
    pub tax: Money,

    #[serde(default, alias = "serviceCharge")]
    pub service_charge: Money,

    #[serde(default, alias = "totalDiscount")]
    pub total_discount: Money,
}

impl ExtraCharges {
    /// Create extras from their three components
    pub fn new(tax: Money, service_charge: Money, total_discount: Money) -> Self {
        Self {
            tax,
            service_charge,
            total_discount,
        }
    }

    /// No tax, service charge or discount
    pub fn none() -> Self {
        Self::default()
    }

    /// Tax plus service charge minus discount
    pub fn net(&self) -> Money {
        self.tax + self.service_charge - self.total_discount
    }

    /// Reject negative components
    pub fn validate(&self) -> Result<(), String> {
        if self.tax.is_negative() {
            return Err("tax cannot be negative".into());
        }
        if self.service_charge.is_negative() {
            return Err("service charge cannot be negative".into());
        }
        if self.total_discount.is_negative() {
            return Err("discount cannot be negative".into());
        }
        Ok(())
    }
}

/// How an expense is shared
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "split_type", rename_all = "lowercase")]
pub enum ExpenseSplit {
    /// One amount shared evenly
    Equal {
        subtotal: Money,
        split_among: Vec<Person>,
    },
    /// Line items, each with its own payer and consumers
    #[serde(rename = "items")]
    Itemized { items: Vec<Item> },
}

/// A shared expense recorded on a trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// The trip this expense belongs to
    pub trip_id: TripId,

    /// What the expense was for
    pub description: String,

    /// Tax, service charge and discount for the whole bill
    #[serde(flatten)]
    pub extras: ExtraCharges,

    /// Who paid (for itemized bills this is the primary payer, informational)
    pub paid_by: Person,

    /// Equal or itemized sharing
    #[serde(flatten)]
    pub split: ExpenseSplit,

    /// When the expense was recorded
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Create an equal-split expense
    pub fn equal(
        trip_id: TripId,
        description: impl Into<String>,
        subtotal: Money,
        extras: ExtraCharges,
        paid_by: impl Into<Person>,
        split_among: Vec<Person>,
    ) -> Self {
        Self {
            id: ExpenseId::new(),
            trip_id,
            description: description.into(),
            extras,
            paid_by: paid_by.into(),
            split: ExpenseSplit::Equal {
                subtotal,
                split_among,
            },
            created_at: Utc::now(),
        }
    }

    /// Create an itemized expense
    pub fn itemized(
        trip_id: TripId,
        description: impl Into<String>,
        extras: ExtraCharges,
        paid_by: impl Into<Person>,
        items: Vec<Item>,
    ) -> Self {
        Self {
            id: ExpenseId::new(),
            trip_id,
            description: description.into(),
            extras,
            paid_by: paid_by.into(),
            split: ExpenseSplit::Itemized { items },
            created_at: Utc::now(),
        }
    }

    /// Amount before extras
    pub fn subtotal(&self) -> Money {
        match &self.split {
            ExpenseSplit::Equal { subtotal, .. } => *subtotal,
            ExpenseSplit::Itemized { items } => items.iter().map(Item::amount).sum(),
        }
    }

    /// Total amount: subtotal + tax + service charge - discount
    pub fn amount(&self) -> Money {
        self.subtotal() + self.extras.net()
    }

    /// Check if this is an itemized expense
    pub fn is_itemized(&self) -> bool {
        matches!(self.split, ExpenseSplit::Itemized { .. })
    }

    /// Everyone named on the expense, in first-seen order
    pub fn people(&self) -> Vec<Person> {
        let mut people = vec![self.paid_by.clone()];
        let mut push = |person: &Person| {
            if !people.contains(person) {
                people.push(person.clone());
            }
        };
        match &self.split {
            ExpenseSplit::Equal { split_among, .. } => split_among.iter().for_each(&mut push),
            ExpenseSplit::Itemized { items } => {
                for item in items {
                    push(&item.paid_by);
                    item.consumers.iter().for_each(&mut push);
                }
            }
        }
        people
    }

    /// Validate the expense
    ///
    /// Item failures come back as `InvalidItem` with the 1-based item number.
    pub fn validate(&self) -> crate::error::SharetabResult<()> {
        use crate::error::SharetabError;

        self.extras.validate().map_err(SharetabError::Validation)?;

        match &self.split {
            ExpenseSplit::Equal {
                subtotal,
                split_among,
            } => {
                if subtotal.is_negative() {
                    return Err(SharetabError::Validation(
                        "subtotal cannot be negative".into(),
                    ));
                }
                if self.paid_by.is_empty() {
                    return Err(SharetabError::Validation("paidBy is required".into()));
                }
                if split_among.is_empty() {
                    return Err(SharetabError::Validation(
                        "splitAmong cannot be empty".into(),
                    ));
                }
                if split_among.iter().any(Person::is_empty) {
                    return Err(SharetabError::Validation(
                        "splitAmong names cannot be empty".into(),
                    ));
                }
            }
            ExpenseSplit::Itemized { items } => {
                if items.is_empty() {
                    return Err(SharetabError::Validation("items cannot be empty".into()));
                }
                for (i, item) in items.iter().enumerate() {
                    item.validate()
                        .map_err(|reason| SharetabError::InvalidItem {
                            index: i + 1,
                            reason,
                        })?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people(names: &[&str]) -> Vec<Person> {
        names.iter().map(Person::new).collect()
    }

    #[test]
    fn test_equal_amount() {
        let expense = Expense::equal(
            TripId::new(),
            "Dinner",
            Money::from_units(80),
            ExtraCharges::new(Money::from_units(8), Money::from_units(4), Money::from_units(2)),
            "a",
            people(&["a", "b"]),
        );
        assert_eq!(expense.subtotal(), Money::from_units(80));
        assert_eq!(expense.amount(), Money::from_units(90));
        assert!(!expense.is_itemized());
    }

    #[test]
    fn test_itemized_subtotal_sums_items() {
        let items = vec![
            Item::new("A", Money::from_units(10), 2, "a", people(&["a"])),
            Item::new("B", Money::from_units(5), 1, "b", people(&["a", "b"]))
                .with_discount(Money::from_units(1)),
        ];
        let expense = Expense::itemized(
            TripId::new(),
            "Lunch",
            ExtraCharges::new(Money::from_units(3), Money::zero(), Money::zero()),
            "a",
            items,
        );
        assert_eq!(expense.subtotal(), Money::from_units(24));
        assert_eq!(expense.amount(), Money::from_units(27));
        assert_eq!(expense.people(), people(&["a", "b"]));
    }

    #[test]
    fn test_validate_equal_requires_split_among() {
        let expense = Expense::equal(
            TripId::new(),
            "Taxi",
            Money::from_units(30),
            ExtraCharges::none(),
            "a",
            Vec::new(),
        );
        let err = expense.validate().unwrap_err();
        assert_eq!(err.to_string(), "Validation error: splitAmong cannot be empty");
    }

    #[test]
    fn test_validate_reports_item_number() {
        let items = vec![
            Item::new("A", Money::from_units(10), 1, "a", people(&["a"])),
            Item::new("B", Money::from_units(5), 0, "b", people(&["b"])),
        ];
        let expense = Expense::itemized(TripId::new(), "Lunch", ExtraCharges::none(), "a", items);
        let err = expense.validate().unwrap_err();
        assert_eq!(err.to_string(), "Item 2: item quantity must be positive");
    }

    #[test]
    fn test_validate_rejects_negative_extras() {
        let expense = Expense::equal(
            TripId::new(),
            "Taxi",
            Money::from_units(30),
            ExtraCharges::new(Money::from_units(-1), Money::zero(), Money::zero()),
            "a",
            people(&["a"]),
        );
        assert!(expense.validate().unwrap_err().is_validation());
    }

    #[test]
    fn test_serde_round_trip_keeps_split_shape() {
        let expense = Expense::itemized(
            TripId::new(),
            "Lunch",
            ExtraCharges::new(Money::from_units(1), Money::zero(), Money::zero()),
            "a",
            vec![Item::new("A", Money::from_units(10), 1, "a", people(&["a", "b"]))],
        );

        let json = serde_json::to_value(&expense).unwrap();
        assert_eq!(json["split_type"], "items");
        assert_eq!(json["tax"], 1.0);

        let back: Expense = serde_json::from_value(json).unwrap();
        assert_eq!(back, expense);
    }
}
