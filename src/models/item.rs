//! Bill line items
//!
//! An item has its own payer and the subset of people who consumed it.

use serde::{Deserialize, Serialize};

use super::money::Money;
use super::person::Person;

/// A single line on an itemized bill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// What was bought
    #[serde(default)]
    pub description: String,

    /// Price of one unit
    #[serde(alias = "unitPrice")]
    pub unit_price: Money,

    /// Number of units
    pub quantity: u32,

    /// Discount applied to this line only
    #[serde(default, alias = "itemDiscount")]
    pub item_discount: Money,

    /// Who paid for the item
    #[serde(alias = "paidBy")]
    pub paid_by: Person,

    /// Who shares the item
    pub consumers: Vec<Person>,
}

impl Item {
    /// Create a new item with no line discount
    pub fn new(
        description: impl Into<String>,
        unit_price: Money,
        quantity: u32,
        paid_by: impl Into<Person>,
        consumers: Vec<Person>,
    ) -> Self {
        Self {
            description: description.into(),
            unit_price,
            quantity,
            item_discount: Money::zero(),
            paid_by: paid_by.into(),
            consumers,
        }
    }

    /// Set the line discount
    pub fn with_discount(mut self, discount: Money) -> Self {
        self.item_discount = discount;
        self
    }

    /// Price before the line discount, or `None` if it overflows
    pub fn gross(&self) -> Option<Money> {
        self.unit_price.times(self.quantity)
    }

    /// Price after the line discount
    ///
    /// Only meaningful for items that passed [`Item::validate`]; an
    /// overflowing gross counts as zero.
    pub fn amount(&self) -> Money {
        self.gross()
            .map_or(Money::zero(), |gross| gross - self.item_discount)
    }

    /// Check the item's own invariants
    ///
    /// Returns the reason the item is invalid; callers attach the position.
    pub fn validate(&self) -> Result<(), String> {
        if !self.unit_price.is_positive() {
            return Err("item price must be positive".into());
        }
        if self.quantity == 0 {
            return Err("item quantity must be positive".into());
        }
        if self.item_discount.is_negative() {
            return Err("item discount cannot be negative".into());
        }
        let gross = self
            .gross()
            .filter(|gross| gross.cents() <= Money::MAX_INPUT_CENTS)
            .ok_or_else(|| "item price too large".to_string())?;
        if self.item_discount > gross {
            return Err(format!(
                "item discount {} exceeds item price {}",
                self.item_discount, gross
            ));
        }
        if self.paid_by.is_empty() {
            return Err("item paidBy is required".into());
        }
        if self.consumers.is_empty() {
            return Err("item consumers cannot be empty".into());
        }
        for (i, consumer) in self.consumers.iter().enumerate() {
            if consumer.is_empty() {
                return Err(format!("consumer {} name cannot be empty", i + 1));
            }
            if self.consumers[..i].contains(consumer) {
                return Err(format!("consumer '{}' is listed twice", consumer));
            }
        }
        Ok(())
    }
}
