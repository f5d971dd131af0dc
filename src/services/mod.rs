//! Service layer for sharetab
//!
//! The engine (`allocation`, `balance`, `settlement`) is pure: it takes
//! expenses and returns numbers, with no storage access. The trip, expense,
//! payment and settlement services sit on top of storage and handle lookup,
//! normalization, persistence and auditing.

pub mod allocation;
pub mod balance;
pub mod expense;
pub mod payment;
pub mod settlement;
pub mod trip;

pub use allocation::{
    allocate_charges, calculate_single_bill, participants_of, validate_bill, BillCalculation,
    ChargeAllocation, PersonChargeBreakdown,
};
pub use balance::aggregate_balances;
pub use expense::ExpenseService;
pub use payment::PaymentService;
pub use settlement::{
    apply_payments, apply_settlements, apply_transfers, minimize_settlements, SettlementService,
};
pub use trip::TripService;
