//! Configuration system
//!
//! Loads ~/.config/postomat/config.yaml with settings for:
//! - Station identity and locker bank size
//! - Security level and suspicious-activity threshold
//! - Storage period
//! - Maintenance repair probability
//! - Notification channel

mod station_config;
pub mod validation;

pub use station_config::{
    MaintenanceConfig, NotificationConfig, SecurityConfig, StationConfig, StorageConfig,
};
pub use validation::{validate_config, validate_config_result, ConfigIssue};
