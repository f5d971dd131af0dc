//! Trip model
//!
//! A trip groups the people sharing expenses. Trips are looked up by a short
//! human-friendly code.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ids::TripId;
use super::person::Person;

/// Length of a trip code
pub const TRIP_CODE_LENGTH: usize = 6;

/// Characters a trip code is drawn from
pub const TRIP_CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// A group of people sharing expenses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    /// Unique identifier
    pub id: TripId,

    /// Short code used to join and refer to the trip
    pub code: String,

    /// Trip name
    pub name: String,

    /// Everyone who appears on the trip, in the order they joined
    #[serde(default)]
    pub participants: Vec<Person>,

    /// When the trip was created
    pub created_at: DateTime<Utc>,
}

impl Trip {
    /// Create a new trip with its first participant and a fresh code
    pub fn new(name: impl Into<String>, first_participant: Person) -> Self {
        Self {
            id: TripId::new(),
            code: generate_code(),
            name: name.into(),
            participants: vec![first_participant],
            created_at: Utc::now(),
        }
    }

    /// Add a participant if not already present
    ///
    /// Returns true if the participant was added.
    pub fn add_participant(&mut self, person: Person) -> bool {
        if person.is_empty() || self.participants.contains(&person) {
            return false;
        }
        self.participants.push(person);
        true
    }

    /// Check whether a code refers to this trip (case-insensitive)
    pub fn has_code(&self, code: &str) -> bool {
        self.code.eq_ignore_ascii_case(code.trim())
    }
}

/// Generate a random trip code of uppercase letters and digits
pub fn generate_code() -> String {
    let mut rng = rand::thread_rng();
    (0..TRIP_CODE_LENGTH)
        .map(|_| TRIP_CODE_CHARSET[rng.gen_range(0..TRIP_CODE_CHARSET.len())] as char)
        .collect()
}
