//! String convenience helpers: prefix/suffix trimming, case-insensitive
//! prefix/suffix checks, line splitting, numeric and percent-encoding
//! detection, whitespace trimming, and Unix timestamp to ISO 8601 conversion.
//!
//! Every function is pure apart from logging through `tracing`. The date
//! formatter used by [`date_string_from_unix_timestamp`] is built once per
//! process from the environment and is read-only afterwards.

pub mod constants;
pub mod utils;

pub use utils::datetime::{
    FormatterConfig, Iso8601Formatter, TimestampRejection, date_string_from_unix_timestamp,
    date_string_from_unix_timestamp_at, parse_unix_timestamp,
};
pub use utils::lines::separated_into_lines;
pub use utils::percent::{PercentDecodeError, is_percent_encoded, percent_decode};
pub use utils::string_utils::{
    drop_prefix, drop_suffix, has_prefix, has_suffix, is_numeric, trimmed_string,
};
