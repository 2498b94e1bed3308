use chrono_tz::Tz;

use crate::constants::DEFAULT_TIMEZONE;

/// Error types for timezone configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimezoneError {
    InvalidTimezone(String),
}

impl std::fmt::Display for TimezoneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimezoneError::InvalidTimezone(tz) => write!(f, "Invalid timezone: {}", tz),
        }
    }
}

impl std::error::Error for TimezoneError {}

/// Parse an IANA timezone name, surrounding whitespace ignored
pub fn parse_timezone(tz_str: &str) -> Result<Tz, TimezoneError> {
    tz_str
        .trim()
        .parse()
        .map_err(|_| TimezoneError::InvalidTimezone(tz_str.to_string()))
}

/// Parse an optional timezone setting; unset or blank means the default
pub fn parse_timezone_setting(value: Option<&str>) -> Result<Tz, TimezoneError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(name) => parse_timezone(name),
        None => parse_timezone(DEFAULT_TIMEZONE),
    }
}
