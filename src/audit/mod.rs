//! Append-only audit trail for sharetab
//!
//! Every mutation of a trip, expense or payment is written as one JSON line
//! to `audit.log`, carrying the entity state before and after the change.
//!
//! ```rust,ignore
//! use sharetab::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! let entry = AuditEntry::create(EntityType::Trip, trip.code.clone(), Some(trip.name.clone()), &trip);
//! logger.log(&entry)?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
