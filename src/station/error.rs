//! Station operation failures

use crate::identity::TrackingCode;
use crate::locker::LockerFault;
use crate::parcel::{ParcelSize, ParcelStatus, TransitionError};
use thiserror::Error;

/// Why a station operation was refused
///
/// The `Display` text is the message shown to the person at the terminal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StationError {
    #[error("Station is locked for security reasons")]
    Locked,

    #[error("Suspicious activity detected, operation blocked")]
    SuspiciousActivity,

    #[error("Parcel {0} is already in the station")]
    Duplicate(TrackingCode),

    #[error("Parcel {0} has already been delivered")]
    AlreadyDelivered(TrackingCode),

    #[error("No free locker fits a parcel of size {0}")]
    NoCapacity(ParcelSize),

    #[error("Parcel {0} not found")]
    NotFound(TrackingCode),

    #[error("You are not allowed to collect parcel {0}")]
    Unauthorized(TrackingCode),

    #[error("Parcel is not ready for pickup (status: {0})")]
    NotReady(ParcelStatus),

    #[error("Storage period of parcel {0} has expired")]
    Expired(TrackingCode),

    #[error("Locker {0} not found")]
    LockerMissing(u32),

    #[error("Locker {locker} does not hold parcel {tracking}")]
    WrongResident { locker: u32, tracking: TrackingCode },

    #[error("Locker error: {0}")]
    Locker(#[from] LockerFault),

    #[error("Parcel error: {0}")]
    Transition(#[from] TransitionError),

    #[error("Failed to send notification")]
    NotificationFailed,

    #[error("Technician name is required")]
    MissingTechnician,

    #[error("No working free locker to break")]
    NoEligibleLocker,
}
