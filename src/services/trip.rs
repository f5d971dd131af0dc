//! Trip service
//!
//! Creates trips, resolves them by code and manages the participant list.

use crate::audit::EntityType;
use crate::error::{SharetabError, SharetabResult};
use crate::models::trip::generate_code;
use crate::models::{Person, Trip};
use crate::storage::Storage;

/// Attempts at drawing an unused trip code before giving up
const CODE_ATTEMPTS: usize = 16;

/// Service for trip management
pub struct TripService<'a> {
    storage: &'a Storage,
}

impl<'a> TripService<'a> {
    /// Create a new trip service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a trip with its first participant
    pub fn create(&self, name: &str, first_participant: &str) -> SharetabResult<Trip> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SharetabError::Validation("trip name is required".into()));
        }
        let creator = Person::new(first_participant);
        if creator.is_empty() {
            return Err(SharetabError::Validation(
                "participant name is required".into(),
            ));
        }

        let mut trip = Trip::new(name, creator);
        let mut attempts = 1;
        while self.storage.trips.code_exists(&trip.code)? {
            if attempts == CODE_ATTEMPTS {
                return Err(SharetabError::Storage(
                    "Could not generate an unused trip code".into(),
                ));
            }
            trip.code = generate_code();
            attempts += 1;
        }

        self.storage.trips.upsert(trip.clone())?;
        self.storage.trips.save()?;

        self.storage.log_create(
            EntityType::Trip,
            trip.code.clone(),
            Some(trip.name.clone()),
            &trip,
        )?;

        Ok(trip)
    }

    /// Look up a trip by code (case-insensitive)
    pub fn find_by_code(&self, code: &str) -> SharetabResult<Trip> {
        self.storage
            .trips
            .get_by_code(code)?
            .ok_or_else(|| SharetabError::trip_not_found(code.trim()))
    }

    /// All trips, oldest first
    pub fn list(&self) -> SharetabResult<Vec<Trip>> {
        self.storage.trips.get_all()
    }

    /// Add a participant to a trip
    ///
    /// Adding someone already on the trip is not an error; the trip is
    /// returned unchanged.
    pub fn add_participant(&self, code: &str, name: &str) -> SharetabResult<Trip> {
        let person = Person::new(name);
        if person.is_empty() {
            return Err(SharetabError::Validation(
                "participant name is required".into(),
            ));
        }
        self.ensure_participants(code, std::slice::from_ref(&person))
    }

    /// Make sure everyone named is on the trip, saving only if someone was added
    pub(crate) fn ensure_participants(
        &self,
        code: &str,
        people: &[Person],
    ) -> SharetabResult<Trip> {
        let before = self.find_by_code(code)?;
        let mut trip = before.clone();

        let added: Vec<&Person> = people
            .iter()
            .filter(|person| trip.add_participant((*person).clone()))
            .collect();
        if added.is_empty() {
            return Ok(trip);
        }

        self.storage.trips.upsert(trip.clone())?;
        self.storage.trips.save()?;

        let names: Vec<&str> = added.iter().map(|p| p.as_str()).collect();
        self.storage.log_update(
            EntityType::Trip,
            trip.code.clone(),
            Some(trip.name.clone()),
            &before,
            &trip,
            Some(format!("added participants: {}", names.join(", "))),
        )?;

        Ok(trip)
    }
}
