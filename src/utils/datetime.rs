/// Unix timestamp parsing and ISO 8601 rendering
use std::sync::LazyLock;

use chrono::{DateTime, SecondsFormat, Utc};
use chrono_tz::Tz;
use tracing::{debug, info, warn};

use crate::constants::{
    FRACTIONAL_SECONDS_ENV, ONE_YEAR_SECONDS, TIMESTAMP_WINDOW_YEARS, TIMEZONE_ENV,
};
use crate::utils::string_utils::{drop_prefix, is_numeric};
use crate::utils::timezone::parse_timezone_setting;

/// Settings for the shared date formatter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatterConfig {
    pub timezone: Tz,
    pub fractional_seconds: bool,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            timezone: Tz::UTC,
            fractional_seconds: false,
        }
    }
}

impl FormatterConfig {
    /// Build a config from raw setting values
    ///
    /// An unknown timezone falls back to UTC with a warning.
    pub fn from_values(timezone: Option<&str>, fractional_seconds: Option<&str>) -> Self {
        let timezone = parse_timezone_setting(timezone).unwrap_or_else(|e| {
            warn!("{}, falling back to UTC", e);
            Tz::UTC
        });

        let fractional_seconds = fractional_seconds
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            timezone,
            fractional_seconds,
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let timezone = std::env::var(TIMEZONE_ENV).ok();
        let fractional = std::env::var(FRACTIONAL_SECONDS_ENV).ok();
        Self::from_values(timezone.as_deref(), fractional.as_deref())
    }
}

/// Renders instants as RFC 3339 / ISO 8601 strings in a fixed timezone
///
/// A zero UTC offset is written as `Z`, anything else as `+HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Iso8601Formatter {
    timezone: Tz,
    seconds_format: SecondsFormat,
}

static SHARED_FORMATTER: LazyLock<Iso8601Formatter> = LazyLock::new(|| {
    let config = FormatterConfig::from_env();
    debug!(
        "Date formatter configured: timezone={}, fractional_seconds={}",
        config.timezone, config.fractional_seconds
    );
    Iso8601Formatter::new(config)
});

impl Iso8601Formatter {
    pub fn new(config: FormatterConfig) -> Self {
        let seconds_format = if config.fractional_seconds {
            SecondsFormat::Millis
        } else {
            SecondsFormat::Secs
        };

        Self {
            timezone: config.timezone,
            seconds_format,
        }
    }

    /// UTC, whole seconds
    pub fn utc() -> Self {
        Self::new(FormatterConfig::default())
    }

    /// Process-wide formatter, configured from the environment on first use
    pub fn shared() -> &'static Iso8601Formatter {
        &SHARED_FORMATTER
    }

    pub fn format(&self, instant: &DateTime<Utc>) -> String {
        instant
            .with_timezone(&self.timezone)
            .to_rfc3339_opts(self.seconds_format, true)
    }
}

/// Why a string was not accepted as a Unix timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampRejection {
    Empty,
    NotNumeric,
    Zero,
    OutOfRange { seconds: i64 },
    Unrepresentable,
}

impl std::fmt::Display for TimestampRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimestampRejection::Empty => write!(f, "Timestamp is empty"),
            TimestampRejection::NotNumeric => {
                write!(f, "Timestamp is not an optionally signed run of digits")
            }
            TimestampRejection::Zero => write!(f, "Timestamp is zero"),
            TimestampRejection::OutOfRange { seconds } => write!(
                f,
                "Timestamp {} is not within +/- {} years of now",
                seconds, TIMESTAMP_WINDOW_YEARS
            ),
            TimestampRejection::Unrepresentable => {
                write!(f, "Timestamp cannot be represented as a date")
            }
        }
    }
}

impl std::error::Error for TimestampRejection {}

/// Build an instant from fractional epoch seconds
///
/// Negative values floor to the earlier second with a positive nanosecond part.
pub fn datetime_from_epoch_seconds(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }

    let mut whole = seconds.floor();
    let mut nanos = ((seconds - whole) * 1_000_000_000.0).round();
    if nanos >= 1_000_000_000.0 {
        whole += 1.0;
        nanos = 0.0;
    }

    if whole < i64::MIN as f64 || whole > i64::MAX as f64 {
        return None;
    }

    DateTime::from_timestamp(whole as i64, nanos as u32)
}

/// Validate a Unix timestamp string against `now` (whole epoch seconds)
///
/// Only an optional leading `-` followed by digits is accepted. `"1.5"` is
/// rejected even though it parses as a float.
pub fn parse_unix_timestamp(text: &str, now: i64) -> Result<DateTime<Utc>, TimestampRejection> {
    if text.is_empty() {
        return Err(TimestampRejection::Empty);
    }

    if !is_numeric(drop_prefix(text, "-")) {
        return Err(TimestampRejection::NotNumeric);
    }

    // Non-ASCII digits pass the numeric check but not the float parser
    let seconds: f64 = text.parse().map_err(|_| TimestampRejection::NotNumeric)?;
    if seconds == 0.0 {
        return Err(TimestampRejection::Zero);
    }
    debug!("unix timestamp for now: {}", now);

    let window = ONE_YEAR_SECONDS * TIMESTAMP_WINDOW_YEARS;
    let lower_bound = now.saturating_sub(window);
    let upper_bound = now.saturating_add(window);
    let truncated = seconds as i64;

    if truncated <= lower_bound || truncated >= upper_bound {
        return Err(TimestampRejection::OutOfRange { seconds: truncated });
    }
    debug!("unix timestamp within +/- {} years", TIMESTAMP_WINDOW_YEARS);

    datetime_from_epoch_seconds(seconds).ok_or(TimestampRejection::Unrepresentable)
}

/// Render a Unix timestamp string with an explicit clock and formatter
pub fn date_string_from_unix_timestamp_at(
    text: &str,
    now: i64,
    formatter: &Iso8601Formatter,
) -> Option<String> {
    debug!("Converting unix timestamp string [{}]", text);

    match parse_unix_timestamp(text, now) {
        Ok(instant) => Some(formatter.format(&instant)),
        Err(rejection) => {
            info!("string [{}] rejected: {}", text, rejection);
            None
        }
    }
}

/// Render a Unix timestamp string as ISO 8601 using the shared formatter
///
/// Returns `None` for empty, non-integer, zero, or far-off (more than 100
/// years from now) input.
pub fn date_string_from_unix_timestamp(text: &str) -> Option<String> {
    date_string_from_unix_timestamp_at(text, Utc::now().timestamp(), Iso8601Formatter::shared())
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2025-10-09T08:53:20Z
    const NOW: i64 = 1_760_000_000;
    const WINDOW: i64 = ONE_YEAR_SECONDS * TIMESTAMP_WINDOW_YEARS;

    fn convert(text: &str) -> Option<String> {
        date_string_from_unix_timestamp_at(text, NOW, &Iso8601Formatter::utc())
    }

    #[test]
    fn test_converts_epoch_seconds() {
        assert_eq!(convert("1700000000").as_deref(), Some("2023-11-14T22:13:20Z"));
        assert_eq!(convert("1").as_deref(), Some("1970-01-01T00:00:01Z"));
        assert_eq!(convert("-86400").as_deref(), Some("1969-12-31T00:00:00Z"));
    }

    #[test]
    fn test_rejects_bad_input() {
        assert_eq!(convert(""), None);
        assert_eq!(convert("abc"), None);
        assert_eq!(convert("-"), None);
        assert_eq!(convert("1.5"), None);
        assert_eq!(convert("1e9"), None);
        assert_eq!(convert("+1700000000"), None);
        assert_eq!(convert(" 1700000000"), None);
        assert_eq!(convert("--5"), None);
    }

    #[test]
    fn test_rejects_zero() {
        assert_eq!(convert("0"), None);
        assert_eq!(convert("-0"), None);
        assert_eq!(convert("0000"), None);
    }

    #[test]
    fn test_rejection_reasons() {
        assert_eq!(parse_unix_timestamp("", NOW), Err(TimestampRejection::Empty));
        assert_eq!(parse_unix_timestamp("1.5", NOW), Err(TimestampRejection::NotNumeric));
        assert_eq!(parse_unix_timestamp("١٢٣", NOW), Err(TimestampRejection::NotNumeric));
        assert_eq!(parse_unix_timestamp("0", NOW), Err(TimestampRejection::Zero));
        assert_eq!(
            parse_unix_timestamp("99999999999999999999999", NOW),
            Err(TimestampRejection::OutOfRange { seconds: i64::MAX })
        );
    }

    #[test]
    fn test_window_bounds_are_exclusive() {
        let upper = (NOW + WINDOW).to_string();
        let just_below_upper = (NOW + WINDOW - 1).to_string();
        let lower = (NOW - WINDOW).to_string();
        let just_above_lower = (NOW - WINDOW + 1).to_string();

        assert_eq!(
            parse_unix_timestamp(&upper, NOW),
            Err(TimestampRejection::OutOfRange { seconds: NOW + WINDOW })
        );
        assert!(parse_unix_timestamp(&just_below_upper, NOW).is_ok());
        assert!(parse_unix_timestamp(&lower, NOW).is_err());
        assert!(parse_unix_timestamp(&just_above_lower, NOW).is_ok());
    }

    #[test]
    fn test_more_than_a_century_away_is_rejected() {
        let far_future = (NOW + WINDOW + ONE_YEAR_SECONDS).to_string();
        let far_past = format!("-{}", WINDOW);
        assert_eq!(convert(&far_future), None);
        assert_eq!(convert(&far_past), None);
    }

    #[test]
    fn test_fractional_seconds_formatter() {
        let formatter = Iso8601Formatter::new(FormatterConfig {
            timezone: Tz::UTC,
            fractional_seconds: true,
        });
        assert_eq!(
            date_string_from_unix_timestamp_at("1700000000", NOW, &formatter).as_deref(),
            Some("2023-11-14T22:13:20.000Z")
        );

        let instant = datetime_from_epoch_seconds(1_700_000_000.5).unwrap();
        assert_eq!(formatter.format(&instant), "2023-11-14T22:13:20.500Z");
        assert_eq!(Iso8601Formatter::utc().format(&instant), "2023-11-14T22:13:20Z");
    }

    #[test]
    fn test_timezone_formatter() {
        let formatter = Iso8601Formatter::new(FormatterConfig {
            timezone: Tz::Europe__Paris,
            fractional_seconds: false,
        });
        assert_eq!(
            date_string_from_unix_timestamp_at("1700000000", NOW, &formatter).as_deref(),
            Some("2023-11-14T23:13:20+01:00")
        );
    }

    #[test]
    fn test_datetime_from_epoch_seconds() {
        let instant = datetime_from_epoch_seconds(-1.5).unwrap();
        assert_eq!(instant.timestamp(), -2);
        assert_eq!(instant.timestamp_subsec_nanos(), 500_000_000);

        assert!(datetime_from_epoch_seconds(f64::NAN).is_none());
        assert!(datetime_from_epoch_seconds(f64::INFINITY).is_none());
        assert!(datetime_from_epoch_seconds(1e300).is_none());
    }

    #[test]
    fn test_formatter_config_from_values() {
        assert_eq!(FormatterConfig::from_values(None, None), FormatterConfig::default());

        let config = FormatterConfig::from_values(Some("Asia/Tokyo"), Some("TRUE"));
        assert_eq!(config.timezone, Tz::Asia__Tokyo);
        assert!(config.fractional_seconds);

        let fallback = FormatterConfig::from_values(Some("Not/AZone"), Some("no"));
        assert_eq!(fallback.timezone, Tz::UTC);
        assert!(!fallback.fractional_seconds);
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn logs_for(text: &str) -> String {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let _ = date_string_from_unix_timestamp_at(text, NOW, &Iso8601Formatter::utc());
        });

        let bytes = logs.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_now_is_logged_only_after_input_gates() {
        for rejected in ["", "abc", "1.5", "0"] {
            let logs = logs_for(rejected);
            assert!(logs.contains("rejected"), "input {:?}: {}", rejected, logs);
            assert!(!logs.contains("for now"), "input {:?}: {}", rejected, logs);
        }

        let logs = logs_for("1700000000");
        assert!(logs.contains("unix timestamp for now: 1760000000"));
        assert!(logs.contains("within +/- 100 years"));
    }

    #[test]
    fn test_shared_formatter_uses_real_clock() {
        // 1700000000 stays within the window for the rest of the century
        let rendered = date_string_from_unix_timestamp("1700000000").unwrap();
        assert!(rendered.starts_with("2023-11-1"));
        assert_eq!(date_string_from_unix_timestamp("0"), None);
        assert!(std::ptr::eq(Iso8601Formatter::shared(), Iso8601Formatter::shared()));
    }
}
