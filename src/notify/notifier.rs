//! Notification delivery backends

use super::Notification;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;

/// Delivery errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotifyError {
    #[error("recipient unreachable: {0}")]
    Unreachable(String),

    #[error("delivery rejected: {0}")]
    Rejected(String),
}

/// Trait for pluggable delivery backends (SMS gateway, mailer, ...)
pub trait Notifier: Send + Sync {
    /// Attempt to deliver `notification`
    fn deliver(&self, notification: &Notification) -> Result<(), NotifyError>;
}

/// Writes every notification to the log and reports success
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn deliver(&self, notification: &Notification) -> Result<(), NotifyError> {
        tracing::info!(
            channel = %notification.channel,
            to = notification.address(),
            tracking = %notification.tracking_code,
            "{}",
            notification.message
        );
        Ok(())
    }
}

/// In-memory outbox
///
/// Clones share the same outbox, so a caller can keep one handle and give
/// another to a station. Delivery can be switched off to simulate an outage.
#[derive(Debug, Clone, Default)]
pub struct MemoryNotifier {
    outbox: Arc<Mutex<Vec<Notification>>>,
    offline: Arc<AtomicBool>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following delivery fail (`true`) or succeed again (`false`)
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Notifications delivered so far
    pub fn delivered(&self) -> Vec<Notification> {
        self.outbox
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for MemoryNotifier {
    fn deliver(&self, notification: &Notification) -> Result<(), NotifyError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(NotifyError::Unreachable(notification.address().to_string()));
        }
        self.outbox
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification.clone());
        Ok(())
    }
}
