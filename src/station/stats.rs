//! Station statistics snapshot

use super::SecurityLevel;
use serde::Serialize;

/// Counts describing a station at one instant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationStatistics {
    pub id: String,
    pub address: String,
    pub is_operational: bool,
    pub security_level: SecurityLevel,
    pub total_lockers: usize,
    pub occupied_lockers: usize,
    pub free_lockers: usize,
    pub functional_lockers: usize,
    pub broken_lockers: usize,
    pub active_parcels: usize,
    pub total_notifications: usize,
    pub security_alerts: usize,
    pub total_user_operations: u64,
}

impl StationStatistics {
    /// Share of lockers holding a parcel, in percent
    pub fn occupancy_percent(&self) -> f64 {
        if self.total_lockers == 0 {
            return 0.0;
        }
        self.occupied_lockers as f64 * 100.0 / self.total_lockers as f64
    }
}
