//! sharetab - shared expense splitting and settlement
//!
//! Records what a group spent on a trip and works out who owes whom. Bills
//! can be split evenly or item by item; tax, service charge and discounts are
//! shared in proportion to what each person consumed, and the final balances
//! are netted into as few payments as possible. All arithmetic is done in
//! whole cents.
//!
//! # Architecture
//!
//! - `models`: plain data (money, people, items, expenses, trips, payments)
//! - `services`: the allocation/balance/settlement engine and the services
//!   that drive it from storage
//! - `storage`: JSON file repositories
//! - `audit`: append-only audit log
//! - `config`: paths and user settings
//! - `display`: terminal formatting
//! - `cli`: clap command handlers
//! - `error`: crate error type
//!
//! # Example
//!
//! ```rust
//! use sharetab::models::{ExtraCharges, Item, Money, Person};
//! use sharetab::services::calculate_single_bill;
//!
//! let items = vec![Item::new(
//!     "Pizza",
//!     Money::from_units(30),
//!     1,
//!     "ann",
//!     vec![Person::new("ann"), Person::new("bo")],
//! )];
//! let extras = ExtraCharges::new(Money::from_units(3), Money::zero(), Money::zero());
//!
//! let bill = calculate_single_bill(&items, &extras).unwrap();
//! assert_eq!(bill.per_person_charges[&Person::new("bo")], Money::from_cents(1650));
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{SharetabError, SharetabResult};
