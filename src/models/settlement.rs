//! Balances and settlement instructions
//!
//! These are computed fresh on every request and never stored.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::money::Money;
use super::person::Person;

/// Net position per person: positive is owed money, negative owes money
pub type Balances = BTreeMap<Person, Money>;

/// A single directed payment instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub from: Person,
    pub to: Person,
    pub amount: Money,
}

impl Settlement {
    pub fn new(from: Person, to: Person, amount: Money) -> Self {
        Self { from, to, amount }
    }
}

/// Settlement instructions together with the balances they settle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementReport {
    pub settlements: Vec<Settlement>,
    pub individual_balances: Balances,
}

impl SettlementReport {
    /// Check if nobody owes anything
    pub fn is_settled(&self) -> bool {
        self.settlements.is_empty()
    }
}
