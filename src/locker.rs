//! Locker slots
//!
//! A locker is one physical compartment with a fixed size class. It is either
//! empty or holds exactly one parcel, and it may be broken. A broken locker
//! refuses every operation except [`Locker::close`] and [`Locker::repair`],
//! whether or not it holds a parcel.
//!
//! The locker only remembers *which* parcel it holds (its tracking code); the
//! station's parcel index owns the parcel itself.

use crate::identity::TrackingCode;
use crate::parcel::{Parcel, ParcelSize, TransitionError};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use thiserror::Error;

/// Locker-level failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LockerFault {
    #[error("locker {0} is out of order")]
    NotFunctional(u32),

    #[error("locker {0} is already occupied")]
    Occupied(u32),

    #[error("parcel of size {parcel} does not fit locker {locker} of size {locker_size}")]
    TooSmall {
        locker: u32,
        locker_size: ParcelSize,
        parcel: ParcelSize,
    },

    #[error("locker {0} is empty")]
    Empty(u32),

    #[error(transparent)]
    Transition(#[from] TransitionError),
}

/// A single storage slot
#[derive(Debug, Clone)]
pub struct Locker {
    number: u32,
    size: ParcelSize,
    functional: bool,
    resident: Option<TrackingCode>,
    last_maintenance: Option<DateTime<Utc>>,
}

impl Locker {
    /// Create an empty, functional locker
    pub fn new(number: u32, size: ParcelSize) -> Self {
        Self {
            number,
            size,
            functional: true,
            resident: None,
            last_maintenance: None,
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn size(&self) -> ParcelSize {
        self.size
    }

    pub fn is_functional(&self) -> bool {
        self.functional
    }

    pub fn is_occupied(&self) -> bool {
        self.resident.is_some()
    }

    /// Tracking code of the parcel inside, if any
    pub fn resident(&self) -> Option<&TrackingCode> {
        self.resident.as_ref()
    }

    pub fn last_maintenance(&self) -> Option<DateTime<Utc>> {
        self.last_maintenance
    }

    /// Free, working, and large enough for `size`
    pub fn can_accept(&self, size: ParcelSize) -> bool {
        self.functional && !self.is_occupied() && size.fits_in(self.size)
    }

    pub(crate) fn set_number(&mut self, number: u32) {
        self.number = number;
    }

    /// Open the door
    pub fn open(&self) -> Result<(), LockerFault> {
        if !self.functional {
            return Err(LockerFault::NotFunctional(self.number));
        }
        Ok(())
    }

    /// Close the door; always succeeds
    pub fn close(&self) {}

    /// Store `parcel` and move it to `InStation`
    ///
    /// The locker is only marked occupied once the parcel accepted the
    /// transition, so a rejected parcel leaves the locker untouched.
    pub fn put_parcel(
        &mut self,
        parcel: &mut Parcel,
        now: DateTime<Utc>,
        storage_window: Duration,
    ) -> Result<(), LockerFault> {
        if !self.functional {
            return Err(LockerFault::NotFunctional(self.number));
        }
        if self.is_occupied() {
            return Err(LockerFault::Occupied(self.number));
        }
        if !parcel.size().fits_in(self.size) {
            return Err(LockerFault::TooSmall {
                locker: self.number,
                locker_size: self.size,
                parcel: parcel.size(),
            });
        }

        parcel.place_in_locker(self.number, now, storage_window)?;
        self.resident = Some(parcel.tracking_code().clone());
        Ok(())
    }

    /// Remove the resident parcel and return its tracking code
    ///
    /// The caller performs the parcel's delivery transition.
    pub fn take_parcel(&mut self) -> Result<TrackingCode, LockerFault> {
        if !self.functional {
            return Err(LockerFault::NotFunctional(self.number));
        }
        self.resident.take().ok_or(LockerFault::Empty(self.number))
    }

    /// Put the locker out of order
    pub fn break_down(&mut self) {
        self.functional = false;
    }

    /// Restore the locker and stamp the maintenance time
    pub fn repair(&mut self, now: DateTime<Utc>) {
        self.functional = true;
        self.last_maintenance = Some(now);
    }

    /// Stamp a preventive check without changing state
    pub fn service(&mut self, now: DateTime<Utc>) {
        self.last_maintenance = Some(now);
    }

    /// Snapshot for display and JSON output
    pub fn info(&self) -> LockerInfo {
        LockerInfo {
            number: self.number,
            size: self.size,
            occupied: self.is_occupied(),
            functional: self.functional,
            parcel: self.resident.clone(),
            last_maintenance: self.last_maintenance,
        }
    }
}

impl std::fmt::Display for Locker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let occupancy = if self.is_occupied() { "occupied" } else { "free" };
        let condition = if self.functional { "working" } else { "out of order" };
        write!(f, "Locker {} [{}] {} ({})", self.number, self.size, occupancy, condition)
    }
}

/// Read-only view of a locker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LockerInfo {
    pub number: u32,
    pub size: ParcelSize,
    pub occupied: bool,
    pub functional: bool,
    pub parcel: Option<TrackingCode>,
    pub last_maintenance: Option<DateTime<Utc>>,
}
