//! The parcel-locker station
//!
//! [`Station`] owns the locker bank, the index of parcels currently held, the
//! security monitor and the notification and maintenance histories. Every
//! public operation that a user triggers (`send`, `receive`, `notify`) first
//! passes the security gate, then checks its preconditions, and only commits
//! in its final step, so a refused operation leaves the station unchanged
//! apart from the security counters and alerts.
//!
//! # Example
//!
//! ```
//! use postomat::identity::{Recipient, Sender};
//! use postomat::parcel::{Parcel, ParcelSize};
//! use postomat::station::{SecurityLevel, Station};
//!
//! let mut station =
//!     Station::new("PM001", "Nezavisimosti ave, 4", 5, SecurityLevel::Medium).unwrap();
//!
//! let sender = Sender::new("Ivan", "+375291234567", "ivan@example.com", "Lenina st, 1").unwrap();
//! let recipient = Recipient::new("Petr", "+375331234567", "petr@example.com").unwrap();
//! let registry = station.tracking_registry();
//! let parcel =
//!     Parcel::new(&registry, sender, recipient.clone(), ParcelSize::Small, "Books").unwrap();
//! let code = parcel.tracking_code().clone();
//!
//! let locker = station.send(parcel, "courier").unwrap();
//! assert!(locker >= 1);
//!
//! let delivered = station.receive(&code, &recipient, "petr").unwrap();
//! assert_eq!(delivered.tracking_code(), &code);
//! ```

use super::{
    AlertKind, Clock, MaintenanceReport, SecurityLevel, SecurityMonitor, SecurityStatus,
    StationError, StationStatistics, SystemClock,
};
use crate::config::{validate_config_result, StationConfig};
use crate::identity::{Party, Recipient, TrackingCode};
use crate::locker::{Locker, LockerInfo};
use crate::notify::{LogNotifier, Notification, Notifier};
use crate::parcel::{Parcel, ParcelSize, ParcelStatus, TrackingRegistry};
use crate::Result;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// Alert count above which the station summary reports `ATTENTION`
const ATTENTION_ALERTS: usize = 10;

/// An automated parcel-locker station
pub struct Station {
    config: StationConfig,
    lockers: Vec<Locker>,
    parcels: HashMap<TrackingCode, Parcel>,
    /// Codes of parcels already handed over; never accepted again
    delivered: HashSet<TrackingCode>,
    security: SecurityMonitor,
    notifications: Vec<Notification>,
    maintenance_log: Vec<MaintenanceReport>,
    registry: Arc<TrackingRegistry>,
    rng: Box<dyn RngCore + Send>,
    clock: Box<dyn Clock>,
    notifier: Box<dyn Notifier>,
}

impl Station {
    /// Build a station from the four essential settings, defaulting the rest
    ///
    /// # Errors
    /// Fails with [`crate::PostomatError::Config`] on an empty id, an invalid
    /// address or zero lockers.
    pub fn new(
        id: impl Into<String>,
        address: impl Into<String>,
        locker_count: u32,
        security_level: SecurityLevel,
    ) -> Result<Self> {
        let config = StationConfig::new(id, address)
            .with_locker_count(locker_count)
            .with_security_level(security_level);
        Self::from_config(config)
    }

    /// Build a station with an entropy-seeded generator
    pub fn from_config(config: StationConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Build a station drawing all of its randomness from `rng`
    ///
    /// The locker order, repair outcomes, locker breaking and the tracking
    /// registry's codes all derive from `rng`, so a seeded generator makes the
    /// whole station reproducible.
    pub fn with_rng(config: StationConfig, rng: impl RngCore + Send + 'static) -> Result<Self> {
        validate_config_result(&config)?;

        let mut rng: Box<dyn RngCore + Send> = Box::new(rng);
        let lockers = build_lockers(config.locker_count, rng.as_mut());
        let registry = Arc::new(TrackingRegistry::with_rng(StdRng::seed_from_u64(
            rng.next_u64(),
        )));
        let security = SecurityMonitor::new(
            config.security.level,
            config.security.suspicious_threshold,
        );

        tracing::info!(
            station = %config.station_id,
            lockers = lockers.len(),
            level = %config.security.level,
            "Station created"
        );

        Ok(Self {
            config,
            lockers,
            parcels: HashMap::new(),
            delivered: HashSet::new(),
            security,
            notifications: Vec::new(),
            maintenance_log: Vec::new(),
            registry,
            rng,
            clock: Box::new(SystemClock),
            notifier: Box::new(LogNotifier),
        })
    }

    /// Replace the delivery backend (defaults to [`LogNotifier`])
    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    /// Replace the time source (defaults to [`SystemClock`])
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Share a tracking registry with other stations or test fixtures
    pub fn with_tracking_registry(mut self, registry: Arc<TrackingRegistry>) -> Self {
        self.registry = registry;
        self
    }

    pub fn id(&self) -> &str {
        &self.config.station_id
    }

    pub fn address(&self) -> &str {
        &self.config.address
    }

    pub fn config(&self) -> &StationConfig {
        &self.config
    }

    pub fn security_level(&self) -> SecurityLevel {
        self.security.level()
    }

    pub fn is_operational(&self) -> bool {
        self.security.is_operational()
    }

    /// Registry to create parcels for this station with
    pub fn tracking_registry(&self) -> Arc<TrackingRegistry> {
        Arc::clone(&self.registry)
    }

    /// The locker bank in scan order
    pub fn lockers(&self) -> &[Locker] {
        &self.lockers
    }

    pub fn lockers_info(&self) -> Vec<LockerInfo> {
        self.lockers.iter().map(Locker::info).collect()
    }

    /// A parcel currently in the index
    pub fn parcel(&self, code: &TrackingCode) -> Option<&Parcel> {
        self.parcels.get(code)
    }

    /// Number of parcels in the index
    pub fn parcel_count(&self) -> usize {
        self.parcels.len()
    }

    /// Notifications delivered so far, oldest first
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn maintenance_log(&self) -> &[MaintenanceReport] {
        &self.maintenance_log
    }

    pub fn alerts(&self) -> &[super::Alert] {
        self.security.alerts()
    }

    /// First free, working locker in bank order that fits `size`
    pub fn find_available_locker(&self, size: ParcelSize) -> Option<&Locker> {
        self.available_locker_index(size).map(|i| &self.lockers[i])
    }

    fn available_locker_index(&self, size: ParcelSize) -> Option<usize> {
        let index = self.lockers.iter().position(|l| l.can_accept(size));
        tracing::debug!(
            size = %size,
            found = ?index.map(|i| self.lockers[i].number()),
            "Locker scan"
        );
        index
    }

    /// Place `parcel` in the first suitable locker and notify its recipient
    ///
    /// Returns the locker number.
    ///
    /// # Errors
    /// Security refusals, [`StationError::Duplicate`] if the code is already
    /// held, [`StationError::AlreadyDelivered`] if it was collected before,
    /// [`StationError::NoCapacity`] if no locker fits, and locker or
    /// lifecycle faults (e.g. the parcel was already placed elsewhere).
    pub fn send(
        &mut self,
        mut parcel: Parcel,
        user: &str,
    ) -> std::result::Result<u32, StationError> {
        let now = self.clock.now();
        self.security.gate(user, now)?;

        let code = parcel.tracking_code().clone();
        if self.parcels.contains_key(&code) {
            return Err(StationError::Duplicate(code));
        }
        if self.delivered.contains(&code) {
            return Err(StationError::AlreadyDelivered(code));
        }

        let index = self
            .available_locker_index(parcel.size())
            .ok_or(StationError::NoCapacity(parcel.size()))?;

        let window = self.config.storage_window();
        let locker = &mut self.lockers[index];
        locker.put_parcel(&mut parcel, now, window)?;
        let number = locker.number();

        let recipient = parcel.recipient().clone();
        self.parcels.insert(code.clone(), parcel);

        tracing::info!(
            station = %self.config.station_id,
            tracking = %code,
            locker = number,
            user,
            "Parcel sent"
        );

        let message = format!(
            "Parcel {} arrived at the station at {}. Locker {}",
            code, self.config.address, number
        );
        self.dispatch(recipient, code, message);

        Ok(number)
    }

    /// Hand the parcel `code` over to `claimant`
    ///
    /// # Errors
    /// Security refusals, [`StationError::NotFound`],
    /// [`StationError::Unauthorized`] (also logs an `unauthorized_access`
    /// alert), [`StationError::NotReady`], [`StationError::Expired`] (the
    /// parcel is marked expired), [`StationError::LockerMissing`] and locker
    /// faults.
    pub fn receive(
        &mut self,
        code: &TrackingCode,
        claimant: &Recipient,
        user: &str,
    ) -> std::result::Result<Parcel, StationError> {
        let now = self.clock.now();
        self.security.gate(user, now)?;

        let (authorized, status, expired, locker_number) = {
            let parcel = self
                .parcels
                .get(code)
                .ok_or_else(|| StationError::NotFound(code.clone()))?;
            (
                parcel.recipient().id() == claimant.id(),
                parcel.status(),
                parcel.is_expired_at(now),
                parcel.locker_number(),
            )
        };

        if !authorized {
            self.security.log_alert(
                AlertKind::UnauthorizedAccess,
                format!("Attempt to collect {} by someone other than the recipient", code),
                now,
            );
            return Err(StationError::Unauthorized(code.clone()));
        }

        if status != ParcelStatus::InStation {
            return Err(StationError::NotReady(status));
        }

        if expired {
            if let Some(parcel) = self.parcels.get_mut(code) {
                parcel.expire()?;
            }
            tracing::warn!(tracking = %code, "Parcel expired at pickup");
            return Err(StationError::Expired(code.clone()));
        }

        let number = locker_number.unwrap_or_default();
        let locker = self
            .lockers
            .iter_mut()
            .find(|l| l.number() == number)
            .ok_or(StationError::LockerMissing(number))?;
        if locker.resident() != Some(code) {
            return Err(StationError::WrongResident {
                locker: number,
                tracking: code.clone(),
            });
        }

        locker.open()?;
        let taken = locker.take_parcel()?;
        locker.close();
        debug_assert_eq!(&taken, code);

        let mut parcel = self
            .parcels
            .remove(code)
            .ok_or_else(|| StationError::NotFound(code.clone()))?;
        parcel.deliver(now)?;
        self.delivered.insert(code.clone());

        tracing::info!(
            station = %self.config.station_id,
            tracking = %code,
            locker = number,
            user,
            "Parcel received"
        );
        Ok(parcel)
    }

    /// Send a message about parcel `code` to its recipient
    ///
    /// Without a message (or with a blank one) a default reminder is sent.
    ///
    /// # Errors
    /// Security refusals, [`StationError::NotFound`] and
    /// [`StationError::NotificationFailed`] when the backend refused delivery.
    pub fn notify(
        &mut self,
        code: &TrackingCode,
        message: Option<&str>,
        user: &str,
    ) -> std::result::Result<(), StationError> {
        let now = self.clock.now();
        self.security.gate(user, now)?;

        let recipient = self
            .parcels
            .get(code)
            .ok_or_else(|| StationError::NotFound(code.clone()))?
            .recipient()
            .clone();

        let message = match message.map(str::trim).filter(|m| !m.is_empty()) {
            Some(message) => message.to_string(),
            None => format!("Reminder: parcel {} is waiting at the station", code),
        };

        if self.dispatch(recipient, code.clone(), message) {
            Ok(())
        } else {
            Err(StationError::NotificationFailed)
        }
    }

    /// Deliver one notification; failures are logged and reported as `false`
    fn dispatch(&mut self, recipient: Recipient, code: TrackingCode, message: String) -> bool {
        let now = self.clock.now();
        let mut notification = Notification::new(recipient, code, message)
            .with_channel(self.config.notifications.channel);
        notification.created_at = now;
        notification.record_attempt();

        match self.notifier.deliver(&notification) {
            Ok(()) => {
                notification.mark_sent(now);
                self.notifications.push(notification);
                true
            }
            Err(e) => {
                tracing::warn!(
                    tracking = %notification.tracking_code,
                    to = notification.address(),
                    error = %e,
                    "Notification not delivered"
                );
                false
            }
        }
    }

    /// Repair broken lockers and stamp the working ones
    ///
    /// Each broken locker is repaired independently with the configured
    /// probability. The report is appended to the maintenance log and a copy
    /// is returned.
    pub fn perform_maintenance(
        &mut self,
        technician: &str,
    ) -> std::result::Result<MaintenanceReport, StationError> {
        let technician = technician.trim();
        if technician.is_empty() {
            return Err(StationError::MissingTechnician);
        }

        let now = self.clock.now();
        let probability = self.config.maintenance.repair_probability.clamp(0.0, 1.0);

        let broken_before: Vec<u32> = self
            .lockers
            .iter()
            .filter(|l| !l.is_functional())
            .map(Locker::number)
            .collect();
        let mut issues: Vec<String> = broken_before
            .iter()
            .map(|n| format!("Locker {} was broken", n))
            .collect();

        let mut repaired = 0;
        let mut failed = 0;
        for locker in &mut self.lockers {
            if locker.is_functional() {
                locker.service(now);
            } else if self.rng.gen_bool(probability) {
                locker.repair(now);
                repaired += 1;
                issues.push(format!("Locker {} repaired", locker.number()));
            } else {
                failed += 1;
                issues.push(format!("Locker {} needs replacement", locker.number()));
            }
        }

        let report = MaintenanceReport {
            timestamp: now,
            technician: technician.to_string(),
            lockers_checked: self.lockers.len(),
            broken_before: broken_before.len(),
            lockers_repaired: repaired,
            failed_repairs: failed,
            broken_after: self.lockers.iter().filter(|l| !l.is_functional()).count(),
            issues,
        };

        tracing::info!(
            station = %self.config.station_id,
            technician,
            repaired,
            failed,
            "Maintenance performed"
        );

        self.maintenance_log.push(report.clone());
        Ok(report)
    }

    /// Break one free, working locker chosen at random
    ///
    /// Returns the broken locker's number and logs a `manual_failure` alert.
    pub fn break_random_locker(&mut self) -> std::result::Result<u32, StationError> {
        let eligible: Vec<usize> = self
            .lockers
            .iter()
            .enumerate()
            .filter(|(_, l)| l.is_functional() && !l.is_occupied())
            .map(|(i, _)| i)
            .collect();

        let &index = eligible
            .choose(&mut self.rng)
            .ok_or(StationError::NoEligibleLocker)?;

        let locker = &mut self.lockers[index];
        locker.break_down();
        let number = locker.number();

        let now = self.clock.now();
        self.security.log_alert(
            AlertKind::ManualFailure,
            format!("Locker {} was forcibly broken", number),
            now,
        );
        Ok(number)
    }

    pub fn security_status(&self) -> SecurityStatus {
        self.security.status(self.config.security.recent_alerts)
    }

    /// Unlock the station and clear alerts and operation counters
    pub fn reset_security(&mut self) {
        self.security.reset();
    }

    /// Expire every held parcel past its deadline and tell the senders
    ///
    /// Expired parcels stay in their lockers and in the index until
    /// collected by staff. Returns the parcels expired by this sweep, ordered
    /// by tracking code.
    pub fn check_expired_parcels(&mut self) -> Vec<Parcel> {
        let now = self.clock.now();

        let mut due: Vec<TrackingCode> = self
            .parcels
            .values()
            .filter(|p| p.status() == ParcelStatus::InStation && p.is_expired_at(now))
            .map(|p| p.tracking_code().clone())
            .collect();
        due.sort();

        let mut expired = Vec::with_capacity(due.len());
        for code in due {
            let Some(parcel) = self.parcels.get_mut(&code) else {
                continue;
            };
            if parcel.expire().is_err() {
                continue;
            }
            let parcel = parcel.clone();

            tracing::warn!(tracking = %code, "Parcel storage period expired");

            let sender = Recipient::from(parcel.sender());
            let message = format!("Parcel {} was not collected. Storage period expired.", code);
            self.dispatch(sender, code, message);
            expired.push(parcel);
        }
        expired
    }

    pub fn statistics(&self) -> StationStatistics {
        let total = self.lockers.len();
        let occupied = self.lockers.iter().filter(|l| l.is_occupied()).count();
        let functional = self.lockers.iter().filter(|l| l.is_functional()).count();

        StationStatistics {
            id: self.config.station_id.clone(),
            address: self.config.address.clone(),
            is_operational: self.security.is_operational(),
            security_level: self.security.level(),
            total_lockers: total,
            occupied_lockers: occupied,
            free_lockers: total - occupied,
            functional_lockers: functional,
            broken_lockers: total - functional,
            active_parcels: self.parcels.len(),
            total_notifications: self.notifications.len(),
            security_alerts: self.security.alerts().len(),
            total_user_operations: self.security.total_operations(),
        }
    }
}

impl fmt::Debug for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Station")
            .field("id", &self.config.station_id)
            .field("lockers", &self.lockers.len())
            .field("parcels", &self.parcels.len())
            .field("operational", &self.security.is_operational())
            .finish()
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.statistics();
        let status = if stats.is_operational { "operational" } else { "locked" };
        let condition = if !stats.is_operational {
            "LOCKED"
        } else if stats.security_alerts > ATTENTION_ALERTS {
            "ATTENTION"
        } else {
            "NORMAL"
        };

        writeln!(f, "Station {}", stats.id)?;
        writeln!(f, "Address: {}", stats.address)?;
        writeln!(f, "Status: {}", status)?;
        writeln!(f, "Security: {} ({})", stats.security_level, condition)?;
        writeln!(f, "Lockers: {} free of {}", stats.free_lockers, stats.total_lockers)?;
        write!(f, "Parcels: {}", stats.active_parcels)
    }
}

/// Lay out `count` lockers (half small, 30% medium, the rest large), shuffle
/// them and number them 1..=count in their final order
fn build_lockers(count: u32, rng: &mut dyn RngCore) -> Vec<Locker> {
    let small = count * 5 / 10;
    let medium = count * 3 / 10;

    let mut lockers: Vec<Locker> = (0..count)
        .map(|i| {
            let size = if i < small {
                ParcelSize::Small
            } else if i < small + medium {
                ParcelSize::Medium
            } else {
                ParcelSize::Large
            };
            Locker::new(i + 1, size)
        })
        .collect();

    lockers.shuffle(rng);
    for (number, locker) in (1..).zip(lockers.iter_mut()) {
        locker.set_number(number);
    }
    lockers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Sender;
    use crate::notify::MemoryNotifier;
    use crate::station::ManualClock;
    use chrono::Duration;

    fn sender() -> Sender {
        Sender::new("Ivan", "+375291234567", "ivan@ex.com", "Lenina st, 1").unwrap()
    }

    fn recipient() -> Recipient {
        Recipient::new("Petr", "+375331234567", "petr@ex.com").unwrap()
    }

    fn fixture(lockers: u32, level: SecurityLevel) -> (Station, MemoryNotifier) {
        let notifier = MemoryNotifier::new();
        let config = StationConfig::new("PM001", "Nezavisimosti ave, 4")
            .with_locker_count(lockers)
            .with_security_level(level);
        let station = Station::with_rng(config, StdRng::seed_from_u64(11))
            .unwrap()
            .with_notifier(notifier.clone());
        (station, notifier)
    }

    fn parcel(station: &Station, size: ParcelSize) -> Parcel {
        Parcel::new(&station.tracking_registry(), sender(), recipient(), size, "Books").unwrap()
    }

    #[test]
    fn test_locker_distribution() {
        let cases = [(5, (2, 1, 2)), (20, (10, 6, 4)), (1, (0, 0, 1)), (7, (3, 2, 2))];
        for (count, expected) in cases {
            let lockers = build_lockers(count, &mut StdRng::seed_from_u64(3));
            let by_size = |size| lockers.iter().filter(|l| l.size() == size).count() as u32;
            let counts = (
                by_size(ParcelSize::Small),
                by_size(ParcelSize::Medium),
                by_size(ParcelSize::Large),
            );
            assert_eq!(counts, expected);
            let numbers: Vec<u32> = lockers.iter().map(Locker::number).collect();
            assert_eq!(numbers, (1..=count).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_construction_failures() {
        assert!(Station::new("", "Lenina st, 1", 5, SecurityLevel::Low).is_err());
        assert!(Station::new("PM001", "", 5, SecurityLevel::Low).is_err());
        assert!(Station::new("PM001", "Lenina st, 1", 0, SecurityLevel::Low).is_err());
        assert!(Station::new("PM001", "Lenina st, 1", 1, SecurityLevel::Low).is_ok());
    }

    #[test]
    fn test_send_notifies_recipient() {
        let (mut station, notifier) = fixture(5, SecurityLevel::Medium);
        let p = parcel(&station, ParcelSize::Medium);
        let code = p.tracking_code().clone();

        let number = station.send(p, "courier").unwrap();
        let held = station.parcel(&code).unwrap();
        assert_eq!(held.status(), ParcelStatus::InStation);
        assert_eq!(held.locker_number(), Some(number));

        let delivered = notifier.delivered();
        assert_eq!(delivered.len(), 1);
        assert!(delivered[0].message.contains(&format!("Locker {}", number)));
        assert_eq!(station.notifications().len(), 1);
        assert!(station.notifications()[0].is_sent());
        assert_eq!(station.notifications()[0].attempts, 1);
    }

    #[test]
    fn test_send_picks_first_fitting_locker_in_bank_order() {
        let (mut station, _) = fixture(10, SecurityLevel::Medium);
        let expected = station
            .lockers()
            .iter()
            .find(|l| l.size() == ParcelSize::Large)
            .map(Locker::number)
            .unwrap();

        let p = parcel(&station, ParcelSize::Large);
        assert_eq!(station.send(p, "courier").unwrap(), expected);
    }

    #[test]
    fn test_no_capacity() {
        let (mut station, _) = fixture(1, SecurityLevel::Medium);
        station.send(parcel(&station, ParcelSize::Small), "c").unwrap();
        let err = station.send(parcel(&station, ParcelSize::Small), "c").unwrap_err();
        assert_eq!(err, StationError::NoCapacity(ParcelSize::Small));
        assert_eq!(station.parcel_count(), 1);
    }

    #[test]
    fn test_notify_default_and_custom_message() {
        let (mut station, notifier) = fixture(5, SecurityLevel::Medium);
        let p = parcel(&station, ParcelSize::Small);
        let code = p.tracking_code().clone();
        station.send(p, "courier").unwrap();

        station.notify(&code, None, "op").unwrap();
        station.notify(&code, Some("  "), "op").unwrap();
        station.notify(&code, Some("Come today"), "op").unwrap();

        let messages: Vec<String> = notifier.delivered().into_iter().map(|n| n.message).collect();
        let reminder = format!("Reminder: parcel {} is waiting at the station", code);
        assert_eq!(messages[1], reminder);
        assert_eq!(messages[2], reminder);
        assert_eq!(messages[3], "Come today");
    }

    #[test]
    fn test_notify_unknown_and_offline() {
        let (mut station, notifier) = fixture(5, SecurityLevel::Medium);
        let missing = TrackingCode::new("ABC0000000000");
        assert_eq!(
            station.notify(&missing, None, "op"),
            Err(StationError::NotFound(missing.clone()))
        );

        let p = parcel(&station, ParcelSize::Small);
        let code = p.tracking_code().clone();
        notifier.set_offline(true);
        // Send still succeeds when the arrival notice is lost
        station.send(p, "courier").unwrap();
        assert!(station.notifications().is_empty());
        assert_eq!(
            station.notify(&code, None, "op"),
            Err(StationError::NotificationFailed)
        );
    }

    #[test]
    fn test_lazy_expiry_on_receive() {
        let clock = Arc::new(ManualClock::default());
        let (station, _) = fixture(5, SecurityLevel::Medium);
        let mut station = station.with_clock(Arc::clone(&clock));

        let p = parcel(&station, ParcelSize::Small);
        let code = p.tracking_code().clone();
        station.send(p, "courier").unwrap();

        clock.advance(Duration::days(3) + Duration::seconds(1));
        assert_eq!(
            station.receive(&code, &recipient(), "petr").unwrap_err(),
            StationError::Expired(code.clone())
        );
        assert_eq!(station.parcel(&code).unwrap().status(), ParcelStatus::Expired);
        assert_eq!(
            station.receive(&code, &recipient(), "petr").unwrap_err(),
            StationError::NotReady(ParcelStatus::Expired)
        );
    }

    #[test]
    fn test_receive_at_deadline_succeeds() {
        let clock = Arc::new(ManualClock::default());
        let (station, _) = fixture(5, SecurityLevel::Medium);
        let mut station = station.with_clock(Arc::clone(&clock));

        let p = parcel(&station, ParcelSize::Small);
        let code = p.tracking_code().clone();
        station.send(p, "courier").unwrap();

        clock.advance(Duration::days(3));
        let delivered = station.receive(&code, &recipient(), "petr").unwrap();
        assert_eq!(delivered.status(), ParcelStatus::Delivered);
        assert_eq!(delivered.delivered_at(), Some(clock.now()));
    }

    #[test]
    fn test_receive_from_broken_locker() {
        let (mut station, _) = fixture(1, SecurityLevel::Medium);
        let p = parcel(&station, ParcelSize::Small);
        let code = p.tracking_code().clone();
        station.send(p, "courier").unwrap();
        station.lockers[0].break_down();

        let err = station.receive(&code, &recipient(), "petr").unwrap_err();
        assert_eq!(err, StationError::Locker(crate::locker::LockerFault::NotFunctional(1)));
        // Nothing moved
        assert!(station.lockers()[0].is_occupied());
        assert_eq!(station.parcel(&code).unwrap().status(), ParcelStatus::InStation);
    }

    #[test]
    fn test_delivered_code_is_never_accepted_again() {
        let (mut station, _) = fixture(5, SecurityLevel::Medium);
        let p = parcel(&station, ParcelSize::Small);
        let code = p.tracking_code().clone();
        let copy = p.clone();

        station.send(p, "courier").unwrap();
        station.receive(&code, &recipient(), "petr").unwrap();

        assert_eq!(
            station.send(copy, "courier"),
            Err(StationError::AlreadyDelivered(code.clone()))
        );
        assert_eq!(station.parcel_count(), 0);
        assert!(station.lockers().iter().all(|l| !l.is_occupied()));
        assert_eq!(
            station.receive(&code, &recipient(), "petr").unwrap_err(),
            StationError::NotFound(code)
        );
    }

    #[test]
    fn test_receive_with_stale_locker_number() {
        let (mut station, _) = fixture(1, SecurityLevel::Medium);
        let p = parcel(&station, ParcelSize::Small);
        let code = p.tracking_code().clone();
        let number = station.send(p, "courier").unwrap();
        station.lockers[0].set_number(99);

        let err = station.receive(&code, &recipient(), "petr").unwrap_err();
        assert_eq!(err, StationError::LockerMissing(number));
        let held = station.parcel(&code).unwrap();
        assert_eq!(held.status(), ParcelStatus::InStation);
        assert_eq!(held.locker_number(), Some(number));
        assert_eq!(station.lockers()[0].resident(), Some(&code));
    }

    #[test]
    fn test_receive_refuses_locker_holding_another_parcel() {
        let (mut station, _) = fixture(2, SecurityLevel::Medium);
        let first = parcel(&station, ParcelSize::Small);
        let second = parcel(&station, ParcelSize::Small);
        let first_code = first.tracking_code().clone();
        let second_code = second.tracking_code().clone();
        station.send(first, "courier").unwrap();
        station.send(second, "courier").unwrap();

        // Swap the numbers so each parcel points at the other's locker
        let a = station.lockers[0].number();
        let b = station.lockers[1].number();
        station.lockers[0].set_number(b);
        station.lockers[1].set_number(a);

        let held = station.parcel(&first_code).unwrap().locker_number().unwrap();
        let err = station.receive(&first_code, &recipient(), "petr").unwrap_err();
        assert_eq!(
            err,
            StationError::WrongResident {
                locker: held,
                tracking: first_code.clone(),
            }
        );
        assert_eq!(station.parcel_count(), 2);
        assert_eq!(station.lockers()[0].resident(), Some(&first_code));
        assert_eq!(station.lockers()[1].resident(), Some(&second_code));
        assert_eq!(
            station.parcel(&first_code).unwrap().status(),
            ParcelStatus::InStation
        );
    }

    #[test]
    fn test_maintenance_requires_technician() {
        let (mut station, _) = fixture(5, SecurityLevel::Medium);
        assert_eq!(station.perform_maintenance("  "), Err(StationError::MissingTechnician));
        assert!(station.maintenance_log().is_empty());
    }

    #[test]
    fn test_maintenance_always_repairs_with_probability_one() {
        let config = StationConfig::new("PM001", "Lenina st, 1")
            .with_locker_count(6)
            .with_repair_probability(1.0);
        let mut station = Station::with_rng(config, StdRng::seed_from_u64(5)).unwrap();
        let a = station.break_random_locker().unwrap();
        let b = station.break_random_locker().unwrap();
        assert_ne!(a, b);

        let report = station.perform_maintenance("Sergei").unwrap();
        assert_eq!(report.broken_before, 2);
        assert_eq!(report.lockers_repaired, 2);
        assert_eq!(report.failed_repairs, 0);
        assert!(report.is_clean());
        assert_eq!(report.issues.len(), 4);
        assert!(station.lockers().iter().all(|l| l.last_maintenance().is_some()));
        assert_eq!(station.maintenance_log().len(), 1);
    }

    #[test]
    fn test_break_random_locker_skips_occupied() {
        let (mut station, _) = fixture(1, SecurityLevel::High);
        station.send(parcel(&station, ParcelSize::Small), "c").unwrap();
        assert_eq!(station.break_random_locker(), Err(StationError::NoEligibleLocker));

        let (mut station, _) = fixture(2, SecurityLevel::High);
        station.break_random_locker().unwrap();
        assert_eq!(station.alerts().len(), 1);
        assert_eq!(station.alerts()[0].kind, AlertKind::ManualFailure);
        // manual failures never lock
        assert!(station.is_operational());
    }

    #[test]
    fn test_statistics_and_display() {
        let (mut station, _) = fixture(5, SecurityLevel::Medium);
        station.send(parcel(&station, ParcelSize::Small), "c").unwrap();
        station.break_random_locker().unwrap();

        let stats = station.statistics();
        assert_eq!(stats.total_lockers, 5);
        assert_eq!(stats.occupied_lockers, 1);
        assert_eq!(stats.free_lockers, 4);
        assert_eq!(stats.broken_lockers, 1);
        assert_eq!(stats.functional_lockers, 4);
        assert_eq!(stats.active_parcels, 1);
        assert_eq!(stats.total_notifications, 1);
        assert_eq!(stats.security_alerts, 1);
        assert_eq!(stats.total_user_operations, 1);
        assert_eq!(stats.occupancy_percent(), 20.0);

        let text = station.to_string();
        assert!(text.starts_with("Station PM001\n"));
        assert!(text.contains("Security: MEDIUM (NORMAL)"));
        assert!(text.contains("Lockers: 4 free of 5"));
    }

    #[test]
    fn test_display_attention_and_locked() {
        let (mut station, _) = fixture(20, SecurityLevel::Medium);
        for _ in 0..11 {
            station.break_random_locker().unwrap();
        }
        assert!(station.to_string().contains("(ATTENTION)"));

        let (mut station, _) = fixture(5, SecurityLevel::High);
        let p = parcel(&station, ParcelSize::Small);
        let code = p.tracking_code().clone();
        station.send(p, "c").unwrap();
        let stranger = Recipient::new("Olga", "+375441234567", "olga@ex.com").unwrap();
        assert!(station.receive(&code, &stranger, "olga").is_err());
        assert!(station.to_string().contains("Security: HIGH (LOCKED)"));
    }

    #[test]
    fn test_seeded_stations_share_layout() {
        let (a, _) = fixture(20, SecurityLevel::Low);
        let (b, _) = fixture(20, SecurityLevel::Low);
        let sizes = |s: &Station| s.lockers().iter().map(Locker::size).collect::<Vec<_>>();
        assert_eq!(sizes(&a), sizes(&b));
    }
}
