/// Seconds in a 365-day year (no leap-year adjustment)
pub const ONE_YEAR_SECONDS: i64 = 31_536_000;

/// Accepted distance, in years, between a timestamp and the current time
pub const TIMESTAMP_WINDOW_YEARS: i64 = 100;

/// Environment variable naming the IANA time zone used for rendered dates
pub const TIMEZONE_ENV: &str = "STRINGKIT_TIMEZONE";

/// Environment variable enabling millisecond output in rendered dates
pub const FRACTIONAL_SECONDS_ENV: &str = "STRINGKIT_FRACTIONAL_SECONDS";

/// Time zone used when none is configured
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Log directive for the application
pub const LOG_DIRECTIVE: &str = "stringkit=info";
