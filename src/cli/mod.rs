//! CLI command handlers
//!
//! Bridges the clap argument parsing with the service layer.

pub mod bill;
pub mod expense;
pub mod payment;
pub mod settle;
pub mod trip;

pub use bill::{handle_bill_command, BillFile};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use payment::{handle_payment_command, PaymentCommands};
pub use settle::handle_settle_command;
pub use trip::{handle_trip_command, TripCommands};

use clap::Args;

use crate::models::{ExtraCharges, Money};

/// Bill-wide extras shared by the commands that take them
#[derive(Args, Debug, Clone)]
pub struct ExtrasArgs {
    /// Tax on the whole bill
    #[arg(long, default_value = "0", value_parser = Money::parse)]
    pub tax: Money,

    /// Service charge on the whole bill
    #[arg(long, default_value = "0", value_parser = Money::parse)]
    pub service: Money,

    /// Discount on the whole bill
    #[arg(long, default_value = "0", value_parser = Money::parse)]
    pub discount: Money,
}

impl From<ExtrasArgs> for ExtraCharges {
    fn from(args: ExtrasArgs) -> Self {
        ExtraCharges::new(args.tax, args.service, args.discount)
    }
}
