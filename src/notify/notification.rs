//! Notification records

use crate::identity::{Party, Recipient, TrackingCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a notification reaches its recipient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationChannel {
    #[default]
    Sms,
    Email,
}

impl NotificationChannel {
    /// The recipient's address on this channel
    pub fn address_of<'a>(&self, recipient: &'a Recipient) -> &'a str {
        match self {
            NotificationChannel::Sms => recipient.phone(),
            NotificationChannel::Email => recipient.email(),
        }
    }
}

impl fmt::Display for NotificationChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationChannel::Sms => write!(f, "SMS"),
            NotificationChannel::Email => write!(f, "Email"),
        }
    }
}

/// A message about one parcel, addressed to one person
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub recipient: Recipient,
    pub tracking_code: TrackingCode,
    pub message: String,
    pub channel: NotificationChannel,
    pub created_at: DateTime<Utc>,
    pub sent_at: Option<DateTime<Utc>>,
    pub attempts: u32,
}

impl Notification {
    /// Create an unsent SMS notification
    pub fn new(
        recipient: Recipient,
        tracking_code: TrackingCode,
        message: impl Into<String>,
    ) -> Self {
        Self {
            recipient,
            tracking_code,
            message: message.into(),
            channel: NotificationChannel::default(),
            created_at: Utc::now(),
            sent_at: None,
            attempts: 0,
        }
    }

    /// Set the delivery channel
    pub fn with_channel(mut self, channel: NotificationChannel) -> Self {
        self.channel = channel;
        self
    }

    /// Channel address (phone or email) this notification goes to
    pub fn address(&self) -> &str {
        self.channel.address_of(&self.recipient)
    }

    pub fn is_sent(&self) -> bool {
        self.sent_at.is_some()
    }

    pub(crate) fn record_attempt(&mut self) {
        self.attempts += 1;
    }

    pub(crate) fn mark_sent(&mut self, at: DateTime<Utc>) {
        self.sent_at = Some(at);
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.is_sent() { "sent" } else { "pending" };
        let preview: String = self.message.chars().take(30).collect();
        write!(f, "{} {}: {}...", self.channel, status, preview)
    }
}
