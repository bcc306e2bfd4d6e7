//! Field validation for the postomat parcel-locker station
//!
//! Stateless predicates over the free-text fields that identify people and
//! parcels, plus phone normalization into the canonical `+375XXXXXXXXX` form.
//!
//! Every field has two entry points:
//! - `validate_*` - a plain pass/fail predicate
//! - `parse_*` - returns the canonical normal form or a [`ValidationError`]
//!
//! # Example
//!
//! ```
//! use postomat_validator::{normalize_phone, parse_email, validate_phone};
//!
//! assert!(validate_phone("8 029 123-45-67"));
//! assert_eq!(normalize_phone("80291234567").as_deref(), Some("+375291234567"));
//! assert_eq!(parse_email(" User@Example.BY ").unwrap(), "user@example.by");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Mobile operator codes accepted after the country code
pub const OPERATOR_CODES: [&str; 5] = ["24", "25", "29", "33", "44"];

/// Country calling code used by the canonical phone form
pub const COUNTRY_CODE: &str = "+375";

/// Number of subscriber digits after the country code (operator code included)
const SUBSCRIBER_DIGITS: usize = 9;

const MIN_NAME_CHARS: usize = 2;
const MIN_ADDRESS_CHARS: usize = 5;
const TRACKING_LETTERS: usize = 3;
const TRACKING_DIGITS: std::ops::RangeInclusive<usize> = 5..=15;

/// Errors produced when a field fails validation
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationError {
    #[error("name must have at least 2 characters and contain only letters, spaces or hyphens")]
    Name,

    #[error("invalid phone number: use +375 and operator 24, 25, 29, 33 or 44, e.g. +375291234567")]
    Phone,

    #[error("invalid email address, e.g. name@domain.by")]
    Email,

    #[error("address must have at least 5 characters and cannot consist only of digits")]
    Address,

    #[error("parcel description must not contain digits")]
    Description,

    #[error("tracking code must be 3 uppercase letters followed by 5 to 15 digits")]
    Tracking,
}

impl ValidationError {
    /// Name of the field that failed
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Name => "name",
            ValidationError::Phone => "phone",
            ValidationError::Email => "email",
            ValidationError::Address => "address",
            ValidationError::Description => "description",
            ValidationError::Tracking => "tracking",
        }
    }
}

/// Result type for validation
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Latin or Cyrillic letter
fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
        || ('а'..='я').contains(&c)
        || ('А'..='Я').contains(&c)
        || c == 'ё'
        || c == 'Ё'
}

/// Check a person's name
///
/// At least 2 characters after trimming; letters, whitespace and hyphens only.
pub fn validate_name(name: &str) -> bool {
    let name = name.trim();
    name.chars().count() >= MIN_NAME_CHARS
        && name
            .chars()
            .all(|c| is_letter(c) || c.is_whitespace() || c == '-')
}

/// Normalize a phone number to `+375XXXXXXXXX`
///
/// Accepted national formats (spaces, hyphens and parentheses are ignored):
/// - `+375XXXXXXXXX`
/// - `80XXXXXXXXX`
/// - `375XXXXXXXXX`
/// - `8XXXXXXXXX`
///
/// The first two subscriber digits must be one of [`OPERATOR_CODES`].
/// Returns `None` when the number is not valid.
pub fn normalize_phone(phone: &str) -> Option<String> {
    let cleaned: String = phone
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')'))
        .collect();

    let subscriber = if let Some(rest) = cleaned.strip_prefix(COUNTRY_CODE) {
        rest
    } else if cleaned.len() == SUBSCRIBER_DIGITS + 2 && cleaned.starts_with("80") {
        &cleaned[2..]
    } else if let Some(rest) = cleaned.strip_prefix("375") {
        rest
    } else if cleaned.len() == SUBSCRIBER_DIGITS + 1 && cleaned.starts_with('8') {
        &cleaned[1..]
    } else {
        return None;
    };

    if subscriber.len() != SUBSCRIBER_DIGITS || !subscriber.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    if !OPERATOR_CODES.contains(&&subscriber[..2]) {
        return None;
    }

    Some(format!("{}{}", COUNTRY_CODE, subscriber))
}

/// Check a phone number (see [`normalize_phone`] for the accepted formats)
pub fn validate_phone(phone: &str) -> bool {
    normalize_phone(phone).is_some()
}

/// Check an email address of the form `user@domain.zone`
///
/// The comparison is case-insensitive. Consecutive dots are rejected anywhere.
pub fn validate_email(email: &str) -> bool {
    let email = email.trim().to_lowercase();
    if email.contains("..") {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    let local_ok = local.len() >= 2
        && local.starts_with(|c: char| c.is_ascii_alphanumeric())
        && local.ends_with(|c: char| c.is_ascii_alphanumeric())
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-'));
    if !local_ok {
        return false;
    }

    let Some((host, zone)) = domain.rsplit_once('.') else {
        return false;
    };

    host.starts_with(|c: char| c.is_ascii_alphanumeric())
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-'))
        && zone.len() >= 2
        && zone.chars().all(|c| c.is_ascii_alphabetic())
}

/// Check a postal address: at least 5 characters, not only digits
pub fn validate_address(address: &str) -> bool {
    let address = address.trim();
    address.chars().count() >= MIN_ADDRESS_CHARS && !address.chars().all(|c| c.is_ascii_digit())
}

/// Check a parcel description
///
/// Optional (empty is valid). Letters, whitespace and `. , ! ? -` only, never digits.
pub fn validate_description(description: &str) -> bool {
    let description = description.trim();
    if description.is_empty() {
        return true;
    }

    if description.chars().any(|c| c.is_numeric()) {
        return false;
    }

    description.chars().all(|c| {
        is_letter(c) || c.is_whitespace() || matches!(c, '.' | ',' | '!' | '?' | '-')
    })
}

/// Check a tracking code: 3 uppercase letters followed by 5 to 15 digits
pub fn validate_tracking(tracking: &str) -> bool {
    let tracking = tracking.trim();
    let letters: Vec<char> = tracking.chars().take(TRACKING_LETTERS).collect();
    if letters.len() != TRACKING_LETTERS || !letters.iter().all(|c| c.is_ascii_uppercase()) {
        return false;
    }

    let digits: Vec<char> = tracking.chars().skip(TRACKING_LETTERS).collect();
    TRACKING_DIGITS.contains(&digits.len()) && digits.iter().all(|c| c.is_ascii_digit())
}

/// Validate and trim a name
pub fn parse_name(name: &str) -> Result<String> {
    if validate_name(name) {
        Ok(name.trim().to_string())
    } else {
        Err(ValidationError::Name)
    }
}

/// Validate and normalize a phone number
pub fn parse_phone(phone: &str) -> Result<String> {
    normalize_phone(phone).ok_or(ValidationError::Phone)
}

/// Validate, trim and lowercase an email address
pub fn parse_email(email: &str) -> Result<String> {
    if validate_email(email) {
        Ok(email.trim().to_lowercase())
    } else {
        Err(ValidationError::Email)
    }
}

/// Validate and trim an address
pub fn parse_address(address: &str) -> Result<String> {
    if validate_address(address) {
        Ok(address.trim().to_string())
    } else {
        Err(ValidationError::Address)
    }
}

/// Validate and trim a parcel description
pub fn parse_description(description: &str) -> Result<String> {
    if validate_description(description) {
        Ok(description.trim().to_string())
    } else {
        Err(ValidationError::Description)
    }
}

/// Validate and trim a tracking code
pub fn parse_tracking(tracking: &str) -> Result<String> {
    if validate_tracking(tracking) {
        Ok(tracking.trim().to_string())
    } else {
        Err(ValidationError::Tracking)
    }
}
