//! Error types for Postomat
//!
//! Each layer owns a focused error enum (validation, parcel lifecycle, locker
//! faults, notification delivery, station operations). `PostomatError` wraps
//! them together with configuration and I/O failures for callers that just
//! want one error type.

use crate::locker::LockerFault;
use crate::notify::NotifyError;
use crate::parcel::TransitionError;
use crate::station::StationError;
use postomat_validator::ValidationError;
use thiserror::Error;

/// Result type alias for Postomat operations
pub type Result<T> = std::result::Result<T, PostomatError>;

/// Crate-wide error type
#[derive(Error, Debug)]
pub enum PostomatError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed identity or description fields
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Illegal parcel lifecycle transition
    #[error("Parcel error: {0}")]
    Transition(#[from] TransitionError),

    /// Locker occupancy, size or functional violations
    #[error("Locker error: {0}")]
    Locker(#[from] LockerFault),

    /// Notification delivery failure
    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    /// Station operation was rejected
    #[error("{0}")]
    Station(#[from] StationError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}
