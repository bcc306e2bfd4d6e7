//! Postomat - automated parcel-locker station
//!
//! A station holds a fixed bank of lockers in three sizes. Senders drop
//! parcels into the first free locker that fits, recipients collect them with
//! their tracking code, and the station keeps track of storage deadlines,
//! notifications, maintenance and security events.
//!
//! # Architecture
//!
//! - **identity**: Validated senders/recipients, person ids, tracking codes
//! - **parcel**: Parcel lifecycle and the tracking-code registry
//! - **locker**: Single locker slot state machine
//! - **notify**: Notification records and delivery backends
//! - **station**: The station, security monitor, maintenance and statistics
//! - **config**: YAML station configuration and validation
//!
//! Field validation lives in the `postomat-validator` crate.

// Core modules
pub mod config;
pub mod error;
pub mod identity;
pub mod locker;
pub mod logging;
pub mod notify;
pub mod parcel;
pub mod station;

// Re-exports
pub use error::{PostomatError, Result};
pub use postomat_validator as validator;
pub use station::{SharedStation, Station, StationError};
