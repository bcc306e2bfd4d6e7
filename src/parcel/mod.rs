//! Parcels and their lifecycle
//!
//! ```text
//! Created --place_in_locker--> InStation --deliver--> Delivered
//!                                  |
//!                                  +------expire----> Expired
//! ```
//!
//! Transitions are one-directional; anything else is a [`TransitionError`].

mod lifecycle;
mod tracking;

pub use lifecycle::{
    Parcel, ParcelInfo, ParcelSize, ParcelStatus, TransitionError, DEFAULT_STORAGE_DAYS,
};
pub use tracking::{TrackingRegistry, TRACKING_DIGITS, TRACKING_PREFIXES};
