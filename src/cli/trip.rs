//! Trip CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_trip_details, format_trip_list};
use crate::error::SharetabResult;
use crate::services::TripService;
use crate::storage::Storage;

/// Trip subcommands
#[derive(Subcommand)]
pub enum TripCommands {
    /// Create a new trip
    Create {
        /// Trip name
        name: String,
        /// Your name (the first participant)
        #[arg(long = "by")]
        creator: String,
    },
    /// List all trips
    List,
    /// Show a trip and its participants
    Show {
        /// Trip code
        code: String,
    },
    /// Add someone to a trip
    AddParticipant {
        /// Trip code
        code: String,
        /// Participant name
        name: String,
    },
}

/// Handle a trip command
pub fn handle_trip_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TripCommands,
) -> SharetabResult<()> {
    let service = TripService::new(storage);

    match cmd {
        TripCommands::Create { name, creator } => {
            let trip = service.create(&name, &creator)?;
            println!("Created trip: {}", trip.name);
            println!("Code: {}", trip.code);
        }
        TripCommands::List => {
            print!("{}", format_trip_list(&service.list()?));
        }
        TripCommands::Show { code } => {
            let trip = service.find_by_code(&code)?;
            print!("{}", format_trip_details(&trip, settings));
        }
        TripCommands::AddParticipant { code, name } => {
            let trip = service.add_participant(&code, &name)?;
            println!(
                "{} now has {} participants.",
                trip.name,
                trip.participants.len()
            );
        }
    }

    Ok(())
}
