//! Security monitor
//!
//! Counts operations per user, keeps an append-only alert log and decides
//! whether an operation may proceed. Under [`SecurityLevel::High`] a serious
//! alert (unauthorized access or suspicious activity) locks the whole station
//! until an administrator calls [`SecurityMonitor::reset`].
//!
//! # Gate rules
//!
//! - A locked station refuses everything and does not count the attempt.
//! - Otherwise the user's counter is incremented first.
//! - Once a counter exceeds the threshold, every further operation by that
//!   user logs a `suspicious_activity` alert. Only `High` also refuses it.

use super::StationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Default number of operations a single user may perform before alerts start
pub const DEFAULT_SUSPICIOUS_THRESHOLD: u32 = 50;

/// How strictly the station reacts to security events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecurityLevel::Low => write!(f, "LOW"),
            SecurityLevel::Medium => write!(f, "MEDIUM"),
            SecurityLevel::High => write!(f, "HIGH"),
        }
    }
}

/// Case-insensitive, as accepted by `--security-level`
impl std::str::FromStr for SecurityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(SecurityLevel::Low),
            "medium" => Ok(SecurityLevel::Medium),
            "high" => Ok(SecurityLevel::High),
            other => Err(format!("unknown security level: {}", other)),
        }
    }
}

/// Kind of security event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    UnauthorizedAccess,
    SuspiciousActivity,
    ManualFailure,
}

impl AlertKind {
    /// Alerts that lock the station under [`SecurityLevel::High`]
    pub fn is_serious(self) -> bool {
        matches!(
            self,
            AlertKind::UnauthorizedAccess | AlertKind::SuspiciousActivity
        )
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertKind::UnauthorizedAccess => write!(f, "unauthorized_access"),
            AlertKind::SuspiciousActivity => write!(f, "suspicious_activity"),
            AlertKind::ManualFailure => write!(f, "manual_failure"),
        }
    }
}

/// One entry in the alert log
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub timestamp: DateTime<Utc>,
    pub kind: AlertKind,
    pub description: String,
}

/// Snapshot returned by [`SecurityMonitor::status`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecurityStatus {
    pub level: SecurityLevel,
    pub is_operational: bool,
    pub alerts_count: usize,
    pub total_user_operations: u64,
    pub active_users: usize,
    pub recent_alerts: Vec<Alert>,
}

/// Per-station security state
#[derive(Debug, Clone)]
pub struct SecurityMonitor {
    level: SecurityLevel,
    threshold: u32,
    operational: bool,
    counters: HashMap<String, u32>,
    alerts: Vec<Alert>,
}

impl SecurityMonitor {
    pub fn new(level: SecurityLevel, threshold: u32) -> Self {
        Self {
            level,
            threshold,
            operational: true,
            counters: HashMap::new(),
            alerts: Vec::new(),
        }
    }

    pub fn level(&self) -> SecurityLevel {
        self.level
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// `false` once the station has been locked
    pub fn is_operational(&self) -> bool {
        self.operational
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    /// Operations counted for `user` since the last reset
    pub fn operation_count(&self, user: &str) -> u32 {
        self.counters.get(user).copied().unwrap_or(0)
    }

    pub fn total_operations(&self) -> u64 {
        self.counters.values().map(|&count| u64::from(count)).sum()
    }

    pub fn active_users(&self) -> usize {
        self.counters.len()
    }

    /// Admit or refuse one operation by `user`
    ///
    /// # Errors
    /// [`StationError::Locked`] if the station is locked,
    /// [`StationError::SuspiciousActivity`] if the user is over the threshold
    /// and the level is `High`.
    pub fn gate(&mut self, user: &str, now: DateTime<Utc>) -> Result<(), StationError> {
        if !self.operational {
            tracing::debug!(user, "Gate refused: station locked");
            return Err(StationError::Locked);
        }

        let count = {
            let counter = self.counters.entry(user.to_string()).or_insert(0);
            *counter += 1;
            *counter
        };
        tracing::debug!(user, count, "Gate passed");

        if count > self.threshold {
            self.log_alert(
                AlertKind::SuspiciousActivity,
                format!("User {} performed {} operations", user, count),
                now,
            );
            if self.level == SecurityLevel::High {
                return Err(StationError::SuspiciousActivity);
            }
        }

        Ok(())
    }

    /// Append an alert, locking the station if it is serious and the level is `High`
    pub fn log_alert(
        &mut self,
        kind: AlertKind,
        description: impl Into<String>,
        now: DateTime<Utc>,
    ) {
        let description = description.into();
        tracing::warn!(kind = %kind, "{}", description);

        self.alerts.push(Alert {
            timestamp: now,
            kind,
            description,
        });

        if self.level == SecurityLevel::High && kind.is_serious() && self.operational {
            self.operational = false;
            tracing::warn!(kind = %kind, "Station locked");
        }
    }

    /// Unlock the station and clear alerts and counters
    pub fn reset(&mut self) {
        self.operational = true;
        self.alerts.clear();
        self.counters.clear();
        tracing::info!("Security state reset");
    }

    /// Current state with at most `recent` of the newest alerts
    pub fn status(&self, recent: usize) -> SecurityStatus {
        let skip = self.alerts.len().saturating_sub(recent);
        SecurityStatus {
            level: self.level,
            is_operational: self.operational,
            alerts_count: self.alerts.len(),
            total_user_operations: self.total_operations(),
            active_users: self.active_users(),
            recent_alerts: self.alerts[skip..].to_vec(),
        }
    }
}
