//! Parcel data structure and lifecycle transitions

use super::TrackingRegistry;
use crate::identity::{Recipient, Sender, TrackingCode};
use chrono::{DateTime, Duration, Utc};
use postomat_validator::{parse_description, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Default number of days a parcel is kept before it expires
pub const DEFAULT_STORAGE_DAYS: u32 = 3;

/// Size class of parcels and lockers
///
/// Ordered `Small < Medium < Large`; a parcel fits any locker at least its size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParcelSize {
    Small,
    Medium,
    Large,
}

impl ParcelSize {
    pub const ALL: [ParcelSize; 3] = [ParcelSize::Small, ParcelSize::Medium, ParcelSize::Large];

    /// Whether a parcel of this size fits a locker of `locker_size`
    pub fn fits_in(self, locker_size: ParcelSize) -> bool {
        self <= locker_size
    }

    /// Single-letter label used on locker doors
    pub fn label(self) -> &'static str {
        match self {
            ParcelSize::Small => "S",
            ParcelSize::Medium => "M",
            ParcelSize::Large => "L",
        }
    }
}

impl fmt::Display for ParcelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Parcel lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParcelStatus {
    #[default]
    Created,
    InStation,
    Delivered,
    Expired,
}

impl fmt::Display for ParcelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParcelStatus::Created => write!(f, "created"),
            ParcelStatus::InStation => write!(f, "in_station"),
            ParcelStatus::Delivered => write!(f, "delivered"),
            ParcelStatus::Expired => write!(f, "expired"),
        }
    }
}

/// Illegal lifecycle transition
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("cannot {action} parcel {tracking_code}: status is {status}")]
pub struct TransitionError {
    pub tracking_code: TrackingCode,
    pub action: &'static str,
    pub status: ParcelStatus,
}

/// A tracked shipment
#[derive(Debug, Clone, Serialize)]
pub struct Parcel {
    tracking_code: TrackingCode,
    sender: Sender,
    recipient: Recipient,
    size: ParcelSize,
    description: String,
    status: ParcelStatus,
    created_at: DateTime<Utc>,
    placed_at: Option<DateTime<Utc>>,
    delivered_at: Option<DateTime<Utc>>,
    locker_number: Option<u32>,
    storage_until: Option<DateTime<Utc>>,
}

impl Parcel {
    /// Create a parcel, reserving a fresh tracking code from `registry`
    ///
    /// # Errors
    /// Returns [`ValidationError::Description`] if the description contains
    /// digits or other disallowed characters. No tracking code is reserved in
    /// that case.
    pub fn new(
        registry: &TrackingRegistry,
        sender: Sender,
        recipient: Recipient,
        size: ParcelSize,
        description: &str,
    ) -> Result<Self, ValidationError> {
        let description = parse_description(description)?;
        let tracking_code = registry.generate();

        Ok(Self {
            tracking_code,
            sender,
            recipient,
            size,
            description,
            status: ParcelStatus::Created,
            created_at: Utc::now(),
            placed_at: None,
            delivered_at: None,
            locker_number: None,
            storage_until: None,
        })
    }

    pub fn tracking_code(&self) -> &TrackingCode {
        &self.tracking_code
    }

    pub fn sender(&self) -> &Sender {
        &self.sender
    }

    pub fn recipient(&self) -> &Recipient {
        &self.recipient
    }

    pub fn size(&self) -> ParcelSize {
        self.size
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status(&self) -> ParcelStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn placed_at(&self) -> Option<DateTime<Utc>> {
        self.placed_at
    }

    pub fn delivered_at(&self) -> Option<DateTime<Utc>> {
        self.delivered_at
    }

    pub fn locker_number(&self) -> Option<u32> {
        self.locker_number
    }

    /// Storage deadline; set when the parcel is placed
    pub fn storage_until(&self) -> Option<DateTime<Utc>> {
        self.storage_until
    }

    fn require(&self, expected: ParcelStatus, action: &'static str) -> Result<(), TransitionError> {
        if self.status == expected {
            Ok(())
        } else {
            Err(TransitionError {
                tracking_code: self.tracking_code.clone(),
                action,
                status: self.status,
            })
        }
    }

    /// Created -> InStation
    ///
    /// Records the locker and sets the deadline to `now + storage_window`.
    pub fn place_in_locker(
        &mut self,
        locker_number: u32,
        now: DateTime<Utc>,
        storage_window: Duration,
    ) -> Result<(), TransitionError> {
        self.require(ParcelStatus::Created, "place")?;
        self.status = ParcelStatus::InStation;
        self.placed_at = Some(now);
        self.locker_number = Some(locker_number);
        self.storage_until = Some(now + storage_window);
        Ok(())
    }

    /// InStation -> Delivered
    pub fn deliver(&mut self, now: DateTime<Utc>) -> Result<(), TransitionError> {
        self.require(ParcelStatus::InStation, "deliver")?;
        self.status = ParcelStatus::Delivered;
        self.delivered_at = Some(now);
        Ok(())
    }

    /// InStation -> Expired
    pub fn expire(&mut self) -> Result<(), TransitionError> {
        self.require(ParcelStatus::InStation, "expire")?;
        self.status = ParcelStatus::Expired;
        Ok(())
    }

    /// Whether `now` is strictly past the storage deadline
    ///
    /// A parcel without a deadline never expires; at the deadline itself it is
    /// still collectable.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.storage_until.is_some_and(|deadline| now > deadline)
    }

    /// [`Parcel::is_expired_at`] against the system clock
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Snapshot for display and JSON output
    pub fn info(&self) -> ParcelInfo {
        ParcelInfo {
            tracking: self.tracking_code.clone(),
            sender: self.sender.to_string(),
            recipient: self.recipient.to_string(),
            size: self.size,
            description: self.description.clone(),
            status: self.status,
            created_at: self.created_at,
            locker: self.locker_number,
            storage_until: self.storage_until,
        }
    }
}

impl fmt::Display for Parcel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parcel {} [{}] - {}", self.tracking_code, self.size, self.status)
    }
}

/// Read-only view of a parcel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParcelInfo {
    pub tracking: TrackingCode,
    pub sender: String,
    pub recipient: String,
    pub size: ParcelSize,
    pub description: String,
    pub status: ParcelStatus,
    pub created_at: DateTime<Utc>,
    pub locker: Option<u32>,
    pub storage_until: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parties() -> (Sender, Recipient) {
        let sender = Sender::new("Ivan", "+375291234567", "ivan@ex.com", "ул. Ленина, 1").unwrap();
        let recipient = Recipient::new("Petr", "+375331234567", "petr@ex.com").unwrap();
        (sender, recipient)
    }

    fn new_parcel(registry: &TrackingRegistry) -> Parcel {
        let (sender, recipient) = parties();
        Parcel::new(registry, sender, recipient, ParcelSize::Small, "Книги").unwrap()
    }

    fn window() -> Duration {
        Duration::days(DEFAULT_STORAGE_DAYS as i64)
    }

    #[test]
    fn test_size_ordering() {
        assert!(ParcelSize::Small < ParcelSize::Medium);
        assert!(ParcelSize::Medium < ParcelSize::Large);
        assert!(ParcelSize::Small.fits_in(ParcelSize::Large));
        assert!(ParcelSize::Medium.fits_in(ParcelSize::Medium));
        assert!(!ParcelSize::Large.fits_in(ParcelSize::Medium));
    }

    #[test]
    fn test_new_parcel() {
        let registry = TrackingRegistry::seeded(1);
        let parcel = new_parcel(&registry);
        assert_eq!(parcel.status(), ParcelStatus::Created);
        assert_eq!(parcel.description(), "Книги");
        assert!(parcel.locker_number().is_none());
        assert!(parcel.storage_until().is_none());
        assert!(registry.contains(parcel.tracking_code()));
    }

    #[test]
    fn test_description_with_digits_rejected() {
        let registry = TrackingRegistry::seeded(1);
        let (sender, recipient) = parties();
        let result = Parcel::new(&registry, sender, recipient, ParcelSize::Large, "Books 5 pcs");
        assert_eq!(result.unwrap_err(), ValidationError::Description);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_place_and_deliver() {
        let registry = TrackingRegistry::seeded(2);
        let mut parcel = new_parcel(&registry);
        let now = Utc::now();

        parcel.place_in_locker(4, now, window()).unwrap();
        assert_eq!(parcel.status(), ParcelStatus::InStation);
        assert_eq!(parcel.locker_number(), Some(4));
        assert_eq!(parcel.placed_at(), Some(now));
        assert_eq!(parcel.storage_until(), Some(now + window()));

        parcel.deliver(now).unwrap();
        assert_eq!(parcel.status(), ParcelStatus::Delivered);
        assert_eq!(parcel.delivered_at(), Some(now));
    }

    #[test]
    fn test_transitions_are_one_directional() {
        let registry = TrackingRegistry::seeded(3);
        let mut parcel = new_parcel(&registry);
        let now = Utc::now();

        assert!(parcel.deliver(now).is_err());
        assert!(parcel.expire().is_err());

        parcel.place_in_locker(1, now, window()).unwrap();
        let err = parcel.place_in_locker(2, now, window()).unwrap_err();
        assert_eq!(err.status, ParcelStatus::InStation);
        assert_eq!(err.action, "place");

        parcel.expire().unwrap();
        assert_eq!(parcel.status(), ParcelStatus::Expired);
        assert!(parcel.deliver(now).is_err());
        assert!(parcel.place_in_locker(1, now, window()).is_err());
    }

    #[test]
    fn test_expiry_boundary() {
        let registry = TrackingRegistry::seeded(4);
        let mut parcel = new_parcel(&registry);
        let placed = Utc::now();

        assert!(!parcel.is_expired_at(placed + Duration::days(100)));

        parcel.place_in_locker(1, placed, window()).unwrap();
        let deadline = parcel.storage_until().unwrap();

        assert!(!parcel.is_expired_at(deadline - Duration::seconds(1)));
        assert!(!parcel.is_expired_at(deadline));
        assert!(parcel.is_expired_at(deadline + Duration::milliseconds(1)));
        assert!(!parcel.is_expired());
    }

    #[test]
    fn test_info_and_display() {
        let registry = TrackingRegistry::seeded(5);
        let parcel = new_parcel(&registry);
        let info = parcel.info();
        assert_eq!(&info.tracking, parcel.tracking_code());
        assert_eq!(info.recipient, "Recipient: Petr");
        assert_eq!(info.status, ParcelStatus::Created);
        assert!(parcel.to_string().contains("[S] - created"));
    }
}
