//! Conversions for the content service's nanosecond timestamps.
//!
//! Timestamps are divided down to milliseconds first, so every date produced
//! here agrees with a millisecond-based date library reading the same value.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

const NANOS_PER_MILLI: u64 = 1_000_000;

/// Convert nanoseconds since the epoch to a UTC datetime.
pub fn nanos_to_datetime(nanos: u64) -> DateTime<Utc> {
    let millis = (nanos / NANOS_PER_MILLI) as i64;
    DateTime::from_timestamp_millis(millis).unwrap_or_default()
}

/// `YYYY-MM-DD` for the timestamp, or for `today` when it is absent.
pub fn nanos_to_date(nanos: Option<u64>, today: NaiveDate) -> String {
    nanos
        .map(|n| nanos_to_datetime(n).date_naive())
        .unwrap_or(today)
        .format("%Y-%m-%d")
        .to_string()
}

/// ISO-8601 with millisecond precision and a `Z` suffix.
pub fn nanos_to_iso(nanos: u64) -> String {
    nanos_to_datetime(nanos).to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// RFC 2822, as RSS `pubDate` expects.
pub fn nanos_to_rfc2822(nanos: u64) -> String {
    nanos_to_datetime(nanos).to_rfc2822()
}

/// The build date used for static routes.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}
