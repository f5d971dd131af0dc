//! Strongly-typed ID wrappers for stored entities
//!
//! Using newtype wrappers prevents accidentally mixing up IDs from different
//! entity types at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Get the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Parse an ID from a string
            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                s.parse()
            }

            /// Check whether a user-supplied reference points at this ID
            ///
            /// Accepts the full UUID, the short display form
            #[doc = concat!("(`", $display_prefix, "1a2b3c4d`)")]
            /// or the bare short hex prefix.
            pub fn matches(&self, reference: &str) -> bool {
                let reference = reference.trim().to_lowercase();
                let reference = reference
                    .strip_prefix($display_prefix)
                    .unwrap_or(reference.as_str());
                if reference.len() < 8 {
                    return false;
                }
                self.0.to_string().starts_with(reference)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, &self.0.to_string()[..8])
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(TripId, "trp-");
define_id!(ExpenseId, "exp-");
define_id!(PaymentId, "pmt-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        let id = ExpenseId::new();
        let display = id.to_string();
        assert!(display.starts_with("exp-"));
        assert_eq!(display.len(), 12);
    }

    #[test]
    fn test_id_serialization() {
        let id = TripId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: TripId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_id_parse() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id = PaymentId::parse(uuid_str).unwrap();
        assert_eq!(id.as_uuid().to_string(), uuid_str);
    }

    #[test]
    fn test_matches_short_and_full_forms() {
        let id = ExpenseId::parse("550e8400-e29b-41d4-a716-446655440000").unwrap();

        assert!(id.matches("exp-550e8400"));
        assert!(id.matches("550e8400"));
        assert!(id.matches("EXP-550E8400"));
        assert!(id.matches("550e8400-e29b-41d4-a716-446655440000"));
        assert!(!id.matches("550e"));
        assert!(!id.matches("exp-deadbeef"));
    }
}
