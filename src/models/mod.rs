//! Core data models for sharetab
//!
//! This module contains the data structures of the expense-sharing domain:
//! money, people, items, expenses, trips, payments and settlements.

pub mod expense;
pub mod ids;
pub mod item;
pub mod money;
pub mod payment;
pub mod person;
pub mod settlement;
pub mod trip;

pub use expense::{Expense, ExpenseSplit, ExtraCharges};
pub use ids::{ExpenseId, PaymentId, TripId};
pub use item::Item;
pub use money::{Money, MoneyParseError};
pub use payment::Payment;
pub use person::{unique_people, Person};
pub use settlement::{Balances, Settlement, SettlementReport};
pub use trip::Trip;
