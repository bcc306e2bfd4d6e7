//! Type-safe ID wrappers for people and parcels

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Number of digest bytes kept in a [`PersonId`]
const PERSON_ID_BYTES: usize = 8;

/// Content-addressed identifier of a person
///
/// Derived from the normalized (name, phone, email) triple. Recipient
/// authorization compares these values, never object identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PersonId(String);

impl PersonId {
    /// Derive the identifier from already-normalized fields
    pub fn derive(name: &str, phone: &str, email: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(name.as_bytes());
        hasher.update(b"\n");
        hasher.update(phone.as_bytes());
        hasher.update(b"\n");
        hasher.update(email.as_bytes());
        let digest = hasher.finalize();

        let hex = digest[..PERSON_ID_BYTES]
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect();
        Self(hex)
    }

    /// Get the underlying string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Type-safe wrapper for parcel tracking codes
///
/// Format: three-letter prefix followed by digits (e.g., "TRK0123456789")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrackingCode(String);

impl TrackingCode {
    /// Create a new TrackingCode from a string
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Get the underlying string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The letter prefix, if the code is long enough to have one
    pub fn prefix(&self) -> Option<&str> {
        self.0.get(..3)
    }

    /// The numeric suffix, if the code is long enough to have one
    pub fn digits(&self) -> Option<&str> {
        self.0.get(3..)
    }
}

impl fmt::Display for TrackingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TrackingCode {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for TrackingCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_id_is_deterministic() {
        let a = PersonId::derive("Ivan", "+375291234567", "ivan@example.com");
        let b = PersonId::derive("Ivan", "+375291234567", "ivan@example.com");
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), PERSON_ID_BYTES * 2);
        assert!(a.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_person_id_depends_on_every_field() {
        let base = PersonId::derive("Ivan", "+375291234567", "ivan@example.com");
        assert_ne!(base, PersonId::derive("Petr", "+375291234567", "ivan@example.com"));
        assert_ne!(base, PersonId::derive("Ivan", "+375331234567", "ivan@example.com"));
        assert_ne!(base, PersonId::derive("Ivan", "+375291234567", "petr@example.com"));
    }

    #[test]
    fn test_person_id_field_boundaries() {
        // Moving characters between fields must not collide
        let a = PersonId::derive("Ann", "a+375291234567", "x@example.com");
        let b = PersonId::derive("Anna", "+375291234567", "x@example.com");
        assert_ne!(a, b);
    }

    #[test]
    fn test_tracking_code_parts() {
        let code = TrackingCode::new("TRK0123456789");
        assert_eq!(code.prefix(), Some("TRK"));
        assert_eq!(code.digits(), Some("0123456789"));
        assert_eq!(format!("{}", code), "TRK0123456789");
    }

    #[test]
    fn test_tracking_code_short() {
        let code = TrackingCode::from("AB");
        assert_eq!(code.prefix(), None);
    }
}
