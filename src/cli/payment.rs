//! Payment CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_payment_list;
use crate::error::SharetabResult;
use crate::models::Money;
use crate::services::PaymentService;
use crate::storage::Storage;

/// Payment subcommands
#[derive(Subcommand)]
pub enum PaymentCommands {
    /// Record money handed from one person to another
    Record {
        /// Trip code
        code: String,
        /// Who paid
        from: String,
        /// Who received
        to: String,
        /// Amount handed over
        #[arg(value_parser = Money::parse)]
        amount: Money,
        /// Optional note
        #[arg(short, long, default_value = "")]
        note: String,
    },
    /// List a trip's payments
    List {
        /// Trip code
        code: String,
    },
    /// Delete a recorded payment
    Delete {
        /// Payment ID
        payment: String,
    },
}

/// Handle a payment command
pub fn handle_payment_command(
    storage: &Storage,
    settings: &Settings,
    cmd: PaymentCommands,
) -> SharetabResult<()> {
    let service = PaymentService::new(storage);

    match cmd {
        PaymentCommands::Record {
            code,
            from,
            to,
            amount,
            note,
        } => {
            let payment = service.record(&code, &from, &to, amount, &note)?;
            println!(
                "Recorded payment {}: {} paid {} {}",
                payment.id,
                settings.format_person(&payment.from),
                settings.format_person(&payment.to),
                settings.format_money(payment.amount)
            );
        }
        PaymentCommands::List { code } => {
            println!("{}", format_payment_list(&service.list(&code)?, settings));
        }
        PaymentCommands::Delete { payment } => {
            let removed = service.delete(&payment)?;
            println!("Deleted payment {}", removed.id);
        }
    }

    Ok(())
}
