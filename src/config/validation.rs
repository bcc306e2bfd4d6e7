//! Configuration validation
//!
//! Collects every problem in a [`StationConfig`] instead of stopping at the
//! first one:
//! - Station id and address are present and well formed
//! - At least one locker
//! - Probabilities inside `[0, 1]`
//! - Positive storage period and alert threshold

use super::StationConfig;
use crate::PostomatError;

/// A single configuration problem
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub field: String,
    pub message: String,
}

impl ConfigIssue {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation result
pub type ValidationResult = std::result::Result<(), Vec<ConfigIssue>>;

/// Validate a station configuration
pub fn validate_config(config: &StationConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if config.station_id.trim().is_empty() {
        errors.push(ConfigIssue::new("station_id", "Station id cannot be empty"));
    }

    if config.address.trim().is_empty() {
        errors.push(ConfigIssue::new("address", "Address cannot be empty"));
    } else if !postomat_validator::validate_address(&config.address) {
        errors.push(ConfigIssue::new(
            "address",
            format!("Invalid address: {}", config.address),
        ));
    }

    if config.locker_count == 0 {
        errors.push(ConfigIssue::new(
            "locker_count",
            "Locker count must be greater than 0",
        ));
    }

    let probability = config.maintenance.repair_probability;
    if !(0.0..=1.0).contains(&probability) {
        errors.push(ConfigIssue::new(
            "maintenance.repair_probability",
            format!("Probability must be between 0 and 1, got {}", probability),
        ));
    }

    if config.storage.storage_days == 0 {
        errors.push(ConfigIssue::new(
            "storage.storage_days",
            "Storage period must be at least one day",
        ));
    }

    if config.security.suspicious_threshold == 0 {
        errors.push(ConfigIssue::new(
            "security.suspicious_threshold",
            "Threshold must be greater than 0",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate configuration and return a Result
pub fn validate_config_result(config: &StationConfig) -> crate::Result<()> {
    validate_config(config).map_err(|errors| {
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        PostomatError::Config(format!(
            "Configuration validation failed:\n  - {}",
            messages.join("\n  - ")
        ))
    })
}
