//! Recorded payments between trip members
//!
//! A payment is money actually handed over outside of any expense, usually to
//! act on a suggested settlement.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{PaymentId, TripId};
use super::money::Money;
use super::person::Person;

/// A payment from one person to another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier
    pub id: PaymentId,

    /// The trip the payment belongs to
    pub trip_id: TripId,

    /// Who paid
    pub from: Person,

    /// Who received the money
    pub to: Person,

    /// Amount handed over
    pub amount: Money,

    /// Optional note
    #[serde(default)]
    pub description: String,

    /// When the payment was made
    pub paid_at: DateTime<Utc>,
}

impl Payment {
    /// Create a new payment
    pub fn new(trip_id: TripId, from: Person, to: Person, amount: Money) -> Self {
        Self {
            id: PaymentId::new(),
            trip_id,
            from,
            to,
            amount,
            description: String::new(),
            paid_at: Utc::now(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Validate the payment
    pub fn validate(&self) -> Result<(), String> {
        if self.from.is_empty() {
            return Err("payer is required".into());
        }
        if self.to.is_empty() {
            return Err("recipient is required".into());
        }
        if self.from == self.to {
            return Err("cannot pay to yourself".into());
        }
        if !self.amount.is_positive() {
            return Err("amount must be greater than 0".into());
        }
        Ok(())
    }
}
