//! Expense CLI commands

use std::path::PathBuf;

use clap::Subcommand;

use super::bill::BillFile;
use super::ExtrasArgs;
use crate::config::Settings;
use crate::display::{format_expense_details, format_expense_list};
use crate::error::SharetabResult;
use crate::models::Money;
use crate::services::ExpenseService;
use crate::storage::Storage;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record an expense split evenly
    AddEqual {
        /// Trip code
        code: String,
        /// What the expense was for
        description: String,
        /// Amount before tax, service and discount
        #[arg(value_parser = Money::parse)]
        amount: Money,
        /// Who paid
        #[arg(short, long)]
        paid_by: String,
        /// People sharing the expense (comma-separated)
        #[arg(short = 'a', long, value_delimiter = ',', num_args = 1..)]
        among: Vec<String>,
        #[command(flatten)]
        extras: ExtrasArgs,
    },
    /// Record an itemized expense from a bill file
    AddItems {
        /// Trip code
        code: String,
        /// Path to the bill JSON file
        file: PathBuf,
        /// Description (overrides the one in the file)
        #[arg(short, long)]
        description: Option<String>,
    },
    /// List a trip's expenses
    List {
        /// Trip code
        code: String,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show one expense
    Show {
        /// Trip code
        code: String,
        /// Expense ID
        expense: String,
    },
    /// Remove an expense
    Remove {
        /// Trip code
        code: String,
        /// Expense ID
        expense: String,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> SharetabResult<()> {
    let service = ExpenseService::new(storage);

    match cmd {
        ExpenseCommands::AddEqual {
            code,
            description,
            amount,
            paid_by,
            among,
            extras,
        } => {
            let expense =
                service.add_equal(&code, &description, amount, extras.into(), &paid_by, &among)?;
            println!(
                "Recorded {} ({}) as {}",
                expense.description,
                settings.format_money(expense.amount()),
                expense.id
            );
        }
        ExpenseCommands::AddItems {
            code,
            file,
            description,
        } => {
            let bill = BillFile::load(&file)?;
            let description = description.unwrap_or(bill.description);
            let expense = service.add_itemized(&code, &description, bill.extras, bill.items)?;
            println!(
                "Recorded {} ({}) as {}",
                expense.description,
                settings.format_money(expense.amount()),
                expense.id
            );
        }
        ExpenseCommands::List { code, json } => {
            let expenses = service.list(&code)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&expenses)?);
            } else {
                println!("{}", format_expense_list(&expenses, settings));
            }
        }
        ExpenseCommands::Show { code, expense } => {
            let expense = service.get(&code, &expense)?;
            print!("{}", format_expense_details(&expense, settings));
        }
        ExpenseCommands::Remove { code, expense } => {
            let removed = service.remove(&code, &expense)?;
            println!("Removed {} ({})", removed.description, removed.id);
        }
    }

    Ok(())
}
