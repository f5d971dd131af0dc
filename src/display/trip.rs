//! Trip display formatting

use crate::config::Settings;
use crate::models::Trip;

/// Format a list of trips
pub fn format_trip_list(trips: &[Trip]) -> String {
    if trips.is_empty() {
        return "No trips found.".to_string();
    }

    let name_width = trips.iter().map(|t| t.name.len()).max().unwrap_or(4).max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<6}  {:<name_width$}  {:>6}  {}\n",
        "Code", "Name", "People", "Created",
    ));
    output.push_str(&format!(
        "{:-<6}  {:-<name_width$}  {:->6}  {:-<10}\n",
        "", "", "", "",
    ));

    for trip in trips {
        output.push_str(&format!(
            "{:<6}  {:<name_width$}  {:>6}  {}\n",
            trip.code,
            trip.name,
            trip.participants.len(),
            trip.created_at.format("%Y-%m-%d"),
        ));
    }

    output
}

/// Format a trip's details
pub fn format_trip_details(trip: &Trip, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Trip: {}\n", trip.name));
    output.push_str(&format!("  Code:          {}\n", trip.code));
    output.push_str(&format!(
        "  Created:       {}\n",
        trip.created_at.format("%Y-%m-%d %H:%M")
    ));
    output.push_str("  Participants:\n");
    for person in &trip.participants {
        output.push_str(&format!("    - {}\n", settings.format_person(person)));
    }

    output
}
