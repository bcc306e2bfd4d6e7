//! Station configuration file

use crate::notify::NotificationChannel;
use crate::parcel::DEFAULT_STORAGE_DAYS;
use crate::station::{SecurityLevel, DEFAULT_REPAIR_PROBABILITY, DEFAULT_SUSPICIOUS_THRESHOLD};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

fn default_station_id() -> String {
    "PM001".to_string()
}

fn default_address() -> String {
    "Nezavisimosti ave, 4".to_string()
}

fn default_locker_count() -> u32 {
    20
}

fn default_threshold() -> u32 {
    DEFAULT_SUSPICIOUS_THRESHOLD
}

fn default_recent_alerts() -> usize {
    5
}

fn default_storage_days() -> u32 {
    DEFAULT_STORAGE_DAYS
}

fn default_repair_probability() -> f64 {
    DEFAULT_REPAIR_PROBABILITY
}

/// Security settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(default)]
    pub level: SecurityLevel,

    /// Operations per user before `suspicious_activity` alerts start
    #[serde(default = "default_threshold")]
    pub suspicious_threshold: u32,

    /// Number of newest alerts included in the security status
    #[serde(default = "default_recent_alerts")]
    pub recent_alerts: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            level: SecurityLevel::default(),
            suspicious_threshold: default_threshold(),
            recent_alerts: default_recent_alerts(),
        }
    }
}

/// Parcel storage settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_days")]
    pub storage_days: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            storage_days: default_storage_days(),
        }
    }
}

/// Maintenance settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceConfig {
    /// Chance in `[0, 1]` that a broken locker is repaired
    #[serde(default = "default_repair_probability")]
    pub repair_probability: f64,
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        Self {
            repair_probability: default_repair_probability(),
        }
    }
}

/// Notification settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationConfig {
    #[serde(default)]
    pub channel: NotificationChannel,
}

/// Everything needed to build a station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationConfig {
    #[serde(default = "default_station_id")]
    pub station_id: String,

    #[serde(default = "default_address")]
    pub address: String,

    #[serde(default = "default_locker_count")]
    pub locker_count: u32,

    #[serde(default)]
    pub security: SecurityConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub maintenance: MaintenanceConfig,

    #[serde(default)]
    pub notifications: NotificationConfig,
}

impl StationConfig {
    /// Configuration for `station_id` at `address` with every other setting defaulted
    pub fn new(station_id: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            station_id: station_id.into(),
            address: address.into(),
            ..Self::default()
        }
    }

    pub fn with_locker_count(mut self, locker_count: u32) -> Self {
        self.locker_count = locker_count;
        self
    }

    pub fn with_security_level(mut self, level: SecurityLevel) -> Self {
        self.security.level = level;
        self
    }

    pub fn with_repair_probability(mut self, probability: f64) -> Self {
        self.maintenance.repair_probability = probability;
        self
    }

    /// How long a placed parcel may wait for pickup
    pub fn storage_window(&self) -> chrono::Duration {
        chrono::Duration::days(i64::from(self.storage.storage_days))
    }

    /// Load configuration from the default path (~/.config/postomat/config.yaml)
    pub fn load_default() -> Result<Self> {
        let path = Self::default_path();
        Self::load(&path)
    }

    /// Load configuration from a specific path
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(crate::PostomatError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        tracing::info!(path = %path.display(), "Loading station configuration");

        let content = fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;

        tracing::debug!(
            station = %config.station_id,
            lockers = config.locker_count,
            level = %config.security.level,
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Save configuration to a specific path
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        tracing::info!(path = %path.display(), "Saving station configuration");

        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;

        Ok(())
    }

    /// Get the default config path (~/.config/postomat/config.yaml)
    pub fn default_path() -> PathBuf {
        let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(".config");
        path.push("postomat");
        path.push("config.yaml");
        path
    }
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            station_id: default_station_id(),
            address: default_address(),
            locker_count: default_locker_count(),
            security: SecurityConfig::default(),
            storage: StorageConfig::default(),
            maintenance: MaintenanceConfig::default(),
            notifications: NotificationConfig::default(),
        }
    }
}
