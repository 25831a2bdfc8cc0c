//! Time and timestamp helpers.
//!
//! Two notions of time coexist:
//! - [`Timestamp`] — an absolute UTC instant, used for readings returned by
//!   the polling endpoints (they carry an explicit offset).
//! - [`WallClock`] — the local wall-clock time written by the stream source.
//!   Its date part is the day key of the live aggregate.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// UTC timestamp used for reading `recorded_at` fields and history windows.
pub type Timestamp = DateTime<Utc>;

/// Wall-clock time as reported by the stream source (no timezone attached).
pub type WallClock = NaiveDateTime;

/// Naive layouts accepted in addition to RFC 3339.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Parse the wall-clock time of a stream timestamp.
///
/// RFC 3339 values keep the local time they were written in (the offset is
/// dropped, not applied), so the date part stays the one the source saw.
#[must_use]
pub fn parse_wall_clock(value: &str) -> Option<WallClock> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// Parse an absolute timestamp. Values without an offset are taken as UTC.
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<Timestamp> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.to_utc());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Day key of a wall-clock time.
#[must_use]
pub fn day_of(time: &WallClock) -> NaiveDate {
    time.date()
}
