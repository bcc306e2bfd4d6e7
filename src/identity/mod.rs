//! People and identifiers
//!
//! Senders and recipients are value-like records built only through validated
//! construction. Each carries a [`PersonId`] derived from its normalized
//! name, phone and email, so two records with the same fields are the same
//! person as far as the station is concerned.

mod ids;
mod person;

pub use ids::{PersonId, TrackingCode};
pub use person::{Party, Person, Recipient, Sender};
