//! Trip repository for JSON storage
//!
//! Manages loading and saving trips to trips.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SharetabError;
use crate::models::{Trip, TripId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable trip data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub(crate) struct TripData {
    trips: Vec<Trip>,
}

/// Repository for trip persistence
pub struct TripRepository {
    path: PathBuf,
    data: RwLock<HashMap<TripId, Trip>>,
    /// Index: uppercase code -> trip_id
    by_code: RwLock<HashMap<String, TripId>>,
}

fn code_key(code: &str) -> String {
    code.trim().to_uppercase()
}

impl TripRepository {
    /// Create a new trip repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_code: RwLock::new(HashMap::new()),
        }
    }

    /// Load trips from disk and rebuild the code index
    pub fn load(&self) -> Result<(), SharetabError> {
        let file_data: TripData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            SharetabError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_code = self.by_code.write().map_err(|e| {
            SharetabError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        by_code.clear();

        for trip in file_data.trips {
            by_code.insert(code_key(&trip.code), trip.id);
            data.insert(trip.id, trip);
        }

        Ok(())
    }

    /// Save trips to disk, oldest first
    pub fn save(&self) -> Result<(), SharetabError> {
        let file_data = TripData {
            trips: self.get_all()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get a trip by ID
    pub fn get(&self, id: TripId) -> Result<Option<Trip>, SharetabError> {
        let data = self.data.read().map_err(|e| {
            SharetabError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).cloned())
    }

    /// Get a trip by its code (case-insensitive)
    pub fn get_by_code(&self, code: &str) -> Result<Option<Trip>, SharetabError> {
        let data = self.data.read().map_err(|e| {
            SharetabError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        let by_code = self.by_code.read().map_err(|e| {
            SharetabError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(by_code
            .get(&code_key(code))
            .and_then(|id| data.get(id))
            .cloned())
    }

    /// Check whether a code is already taken
    pub fn code_exists(&self, code: &str) -> Result<bool, SharetabError> {
        let by_code = self.by_code.read().map_err(|e| {
            SharetabError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(by_code.contains_key(&code_key(code)))
    }

    /// Get all trips, oldest first
    pub fn get_all(&self) -> Result<Vec<Trip>, SharetabError> {
        let data = self.data.read().map_err(|e| {
            SharetabError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut trips: Vec<_> = data.values().cloned().collect();
        trips.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.code.cmp(&b.code)));
        Ok(trips)
    }

    /// Insert or update a trip
    ///
    /// Fails if another trip already uses the same code.
    pub fn upsert(&self, trip: Trip) -> Result<(), SharetabError> {
        let mut data = self.data.write().map_err(|e| {
            SharetabError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_code = self.by_code.write().map_err(|e| {
            SharetabError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let key = code_key(&trip.code);
        if let Some(existing) = by_code.get(&key) {
            if *existing != trip.id {
                return Err(SharetabError::Duplicate {
                    entity_type: "Trip",
                    identifier: trip.code,
                });
            }
        }

        if let Some(old) = data.get(&trip.id) {
            by_code.remove(&code_key(&old.code));
        }

        by_code.insert(key, trip.id);
        data.insert(trip.id, trip);
        Ok(())
    }

    /// Number of trips
    pub fn count(&self) -> Result<usize, SharetabError> {
        let data = self.data.read().map_err(|e| {
            SharetabError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.len())
    }
}
