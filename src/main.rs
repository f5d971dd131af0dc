use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use sharetab::cli::{
    handle_bill_command, handle_expense_command, handle_payment_command, handle_settle_command,
    handle_trip_command, ExpenseCommands, PaymentCommands, TripCommands,
};
use sharetab::config::{paths::SharetabPaths, settings::Settings};
use sharetab::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "sharetab",
    version,
    about = "Split shared trip expenses and settle up with the fewest payments",
    long_about = "sharetab records who paid for what on a trip, shares itemized \
                  bills with their tax, service charge and discounts in proportion \
                  to what each person consumed, and works out the smallest set of \
                  payments that settles everyone up."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and default settings
    Init,

    /// Show paths and settings, or change a setting
    Config {
        /// Setting to change
        key: Option<String>,
        /// New value
        value: Option<String>,
    },

    /// Trip management commands
    #[command(subcommand)]
    Trip(TripCommands),

    /// Expense management commands
    #[command(subcommand)]
    Expense(ExpenseCommands),

    /// Split a single itemized bill without recording it
    Bill {
        /// Path to the bill JSON file
        file: PathBuf,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Work out who pays whom for a trip
    Settle {
        /// Trip code
        code: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
        /// Do not subtract recorded payments
        #[arg(long)]
        ignore_payments: bool,
    },

    /// Recorded payment commands
    #[command(subcommand)]
    Payment(PaymentCommands),

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("SHARETAB_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let paths = SharetabPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    let storage = Storage::open(paths.clone())?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing sharetab at: {}", paths.base_dir().display());
            if initialize_storage(&paths)? {
                println!("Initialization complete!");
            } else {
                println!("Already initialized.");
            }
            println!();
            println!("Run 'sharetab trip create <name> --by <you>' to start a trip.");
        }
        Some(Commands::Config { key, value }) => match (key, value) {
            (Some(key), Some(value)) => {
                settings.set(&key, &value)?;
                settings.save(&paths)?;
                println!("Set {} = {}", key, value);
            }
            (Some(key), None) => {
                anyhow::bail!("Missing value for setting '{}'", key);
            }
            _ => {
                println!("sharetab Configuration");
                println!("======================");
                println!("Base directory:  {}", paths.base_dir().display());
                println!("Data directory:  {}", paths.data_dir().display());
                println!("Audit log:       {}", paths.audit_log().display());
                println!();
                println!("Settings:");
                println!("  currency_symbol:         {:?}", settings.currency_symbol);
                println!(
                    "  apply_recorded_payments: {}",
                    settings.apply_recorded_payments
                );
                println!("  title_case_names:        {}", settings.title_case_names);
            }
        },
        Some(Commands::Trip(cmd)) => handle_trip_command(&storage, &settings, cmd)?,
        Some(Commands::Expense(cmd)) => handle_expense_command(&storage, &settings, cmd)?,
        Some(Commands::Bill { file, json }) => handle_bill_command(&file, json, &settings)?,
        Some(Commands::Settle {
            code,
            json,
            ignore_payments,
        }) => handle_settle_command(&storage, &settings, &code, json, ignore_payments)?,
        Some(Commands::Payment(cmd)) => handle_payment_command(&storage, &settings, cmd)?,
        Some(Commands::History { limit }) => {
            let entries = storage.audit().read_recent(limit)?;
            if entries.is_empty() {
                println!("No changes recorded.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
        None => {
            println!("sharetab - split shared expenses and settle up");
            println!();
            println!("Run 'sharetab --help' for usage information.");
        }
    }

    Ok(())
}
