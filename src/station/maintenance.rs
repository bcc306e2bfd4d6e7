//! Maintenance reports

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Default chance that a broken locker is fixed during one maintenance visit
pub const DEFAULT_REPAIR_PROBABILITY: f64 = 0.85;

/// Outcome of one maintenance visit
///
/// Reports are appended to the station's log and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaintenanceReport {
    pub timestamp: DateTime<Utc>,
    pub technician: String,
    pub lockers_checked: usize,
    pub broken_before: usize,
    pub lockers_repaired: usize,
    pub failed_repairs: usize,
    pub broken_after: usize,
    pub issues: Vec<String>,
}

impl MaintenanceReport {
    /// Whether every broken locker was fixed
    pub fn is_clean(&self) -> bool {
        self.broken_after == 0
    }
}

impl std::fmt::Display for MaintenanceReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Maintenance by {}: {} checked, {} broken, {} repaired, {} need replacement",
            self.technician,
            self.lockers_checked,
            self.broken_before,
            self.lockers_repaired,
            self.failed_repairs
        )
    }
}
