//! The station and its subsystems
//!
//! - [`Station`]: locker bank, parcel index and the user-facing operations
//! - [`SecurityMonitor`]: per-user counters, alert log, lockout
//! - [`MaintenanceReport`]: outcome of a maintenance visit
//! - [`Clock`]: injectable time source
//! - [`SharedStation`]: mutex-guarded handle for multi-threaded callers

mod clock;
mod error;
mod maintenance;
mod security;
mod shared;
mod stats;
mod terminal;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::StationError;
pub use maintenance::{MaintenanceReport, DEFAULT_REPAIR_PROBABILITY};
pub use security::{
    Alert, AlertKind, SecurityLevel, SecurityMonitor, SecurityStatus,
    DEFAULT_SUSPICIOUS_THRESHOLD,
};
pub use shared::SharedStation;
pub use stats::StationStatistics;
pub use terminal::Station;
