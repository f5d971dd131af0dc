//! Custom error types for sharetab
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for sharetab operations
#[derive(Error, Debug)]
pub enum SharetabError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for bill-level input (tax, participants, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// A single item of a bill failed validation (index is 1-based)
    #[error("Item {index}: {reason}")]
    InvalidItem { index: usize, reason: String },

    /// A recorded expense failed validation (index is 1-based)
    #[error("Expense {index}: {reason}")]
    InvalidExpense { index: usize, reason: String },

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl SharetabError {
    /// Create a "not found" error for trips
    pub fn trip_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Trip",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for payments
    pub fn payment_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Payment",
            identifier: identifier.into(),
        }
    }

    /// Attach an expense position to a validation failure
    ///
    /// Item-level failures keep their item number in the reason so the caller
    /// can point at both the expense and the line item.
    pub fn in_expense(self, index: usize) -> Self {
        match self {
            Self::Validation(reason) => Self::InvalidExpense { index, reason },
            Self::InvalidItem {
                index: item,
                reason,
            } => Self::InvalidExpense {
                index,
                reason: format!("item {}: {}", item, reason),
            },
            other => other,
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::InvalidItem { .. } | Self::InvalidExpense { .. }
        )
    }
}

impl From<std::io::Error> for SharetabError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SharetabError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for sharetab operations
pub type SharetabResult<T> = Result<T, SharetabError>;
