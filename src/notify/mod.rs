//! Recipient notifications
//!
//! The station hands every message to a [`Notifier`]. Delivery is best effort:
//! a failed delivery is logged and dropped, it never fails a station operation.
//!
//! # Example
//!
//! ```
//! use postomat::notify::{MemoryNotifier, Notification, Notifier};
//! use postomat::identity::{Recipient, TrackingCode};
//!
//! let notifier = MemoryNotifier::new();
//! let recipient = Recipient::new("Petr", "+375331234567", "petr@ex.com").unwrap();
//! let note = Notification::new(recipient, TrackingCode::new("TRK0000000001"), "Parcel arrived");
//!
//! notifier.deliver(&note).unwrap();
//! assert_eq!(notifier.delivered().len(), 1);
//! ```

mod notification;
mod notifier;

pub use notification::{Notification, NotificationChannel};
pub use notifier::{LogNotifier, MemoryNotifier, Notifier, NotifyError};
