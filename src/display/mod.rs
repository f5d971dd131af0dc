//! Display formatting for terminal output
//!
//! Every formatter takes the user's `Settings` so amounts carry the chosen
//! currency symbol and names follow the title-case preference.

pub mod bill;
pub mod expense;
pub mod payment;
pub mod settlement;
pub mod trip;

pub use bill::format_bill;
pub use expense::{format_expense_details, format_expense_list};
pub use payment::format_payment_list;
pub use settlement::format_settlement_report;
pub use trip::{format_trip_details, format_trip_list};
