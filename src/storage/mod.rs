//! Storage layer for sharetab
//!
//! JSON file repositories with atomic writes, in-memory caches behind
//! `RwLock`, and an audit trail for every mutation.

pub mod expenses;
pub mod file_io;
pub mod init;
pub mod payments;
pub mod trips;

pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use payments::PaymentRepository;
pub use trips::TripRepository;

use serde::Serialize;
use tracing::info;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::SharetabPaths;
use crate::error::SharetabError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: SharetabPaths,
    audit: AuditLogger,
    pub trips: TripRepository,
    pub expenses: ExpenseRepository,
    pub payments: PaymentRepository,
}

impl Storage {
    /// Create a new Storage instance, creating directories as needed
    pub fn new(paths: SharetabPaths) -> Result<Self, SharetabError> {
        paths.ensure_directories()?;

        Ok(Self {
            audit: AuditLogger::new(paths.audit_log()),
            trips: TripRepository::new(paths.trips_file()),
            expenses: ExpenseRepository::new(paths.expenses_file()),
            payments: PaymentRepository::new(paths.payments_file()),
            paths,
        })
    }

    /// Open storage and load everything from disk
    pub fn open(paths: SharetabPaths) -> Result<Self, SharetabError> {
        let storage = Self::new(paths)?;
        storage.load_all()?;
        Ok(storage)
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &SharetabPaths {
        &self.paths
    }

    /// The audit logger for this data directory
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), SharetabError> {
        self.trips.load()?;
        self.expenses.load()?;
        self.payments.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), SharetabError> {
        self.trips.save()?;
        self.expenses.save()?;
        self.payments.save()?;
        Ok(())
    }

    /// Check if `init` has been run for this data directory
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    /// Record a created entity in the audit log
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), SharetabError> {
        info!(entity = %entity_type, id = %entity_id, "created");
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    /// Record a modified entity in the audit log
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        summary: Option<String>,
    ) -> Result<(), SharetabError> {
        info!(entity = %entity_type, id = %entity_id, "updated");
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            summary,
        ))
    }

    /// Record a removed entity in the audit log
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), SharetabError> {
        info!(entity = %entity_type, id = %entity_id, "deleted");
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }
}
