//! Payment repository for JSON storage
//!
//! Manages loading and saving recorded payments to payments.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SharetabError;
use crate::models::{Payment, PaymentId, TripId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable payment data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub(crate) struct PaymentData {
    payments: Vec<Payment>,
}

/// Repository for payment persistence
pub struct PaymentRepository {
    path: PathBuf,
    data: RwLock<HashMap<PaymentId, Payment>>,
}

impl PaymentRepository {
    /// Create a new payment repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load payments from disk
    pub fn load(&self) -> Result<(), SharetabError> {
        let file_data: PaymentData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            SharetabError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        for payment in file_data.payments {
            data.insert(payment.id, payment);
        }

        Ok(())
    }

    /// Save payments to disk, oldest first
    pub fn save(&self) -> Result<(), SharetabError> {
        let data = self.data.read().map_err(|e| {
            SharetabError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut payments: Vec<_> = data.values().cloned().collect();
        payments.sort_by(|a, b| a.paid_at.cmp(&b.paid_at).then(a.id.cmp(&b.id)));

        write_json_atomic(&self.path, &PaymentData { payments })
    }

    /// Get the payments of a trip, oldest first
    pub fn get_by_trip(&self, trip_id: TripId) -> Result<Vec<Payment>, SharetabError> {
        let data = self.data.read().map_err(|e| {
            SharetabError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut payments: Vec<_> = data
            .values()
            .filter(|p| p.trip_id == trip_id)
            .cloned()
            .collect();
        payments.sort_by(|a, b| a.paid_at.cmp(&b.paid_at).then(a.id.cmp(&b.id)));
        Ok(payments)
    }

    /// Find a payment by full or short id
    pub fn find(&self, reference: &str) -> Result<Option<Payment>, SharetabError> {
        let data = self.data.read().map_err(|e| {
            SharetabError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.values().find(|p| p.id.matches(reference)).cloned())
    }

    /// Insert or update a payment
    pub fn upsert(&self, payment: Payment) -> Result<(), SharetabError> {
        let mut data = self.data.write().map_err(|e| {
            SharetabError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.insert(payment.id, payment);
        Ok(())
    }

    /// Delete a payment, returning it if it existed
    pub fn delete(&self, id: PaymentId) -> Result<Option<Payment>, SharetabError> {
        let mut data = self.data.write().map_err(|e| {
            SharetabError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        Ok(data.remove(&id))
    }
}
