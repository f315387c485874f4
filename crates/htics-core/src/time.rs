//! Timestamp parsing and calendar formatting.
//!
//! Source documents carry UTC instants as `YYYY-MM-DDTHH:MM:SSZ` text. The
//! calendar wants the compact `YYYYMMDDTHHMMSSZ` form.

use chrono::{DateTime, NaiveDateTime, TimeZone, Timelike, Utc};
use thiserror::Error;

/// chrono format of source timestamps.
pub const SOURCE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// chrono format of calendar date-time values.
pub const COMPACT_FORMAT: &str = "%Y%m%dT%H%M%SZ";

// `d` stands for any ASCII digit, every other byte must match literally.
const SOURCE_LAYOUT: &[u8] = b"dddd-dd-ddTdd:dd:ddZ";

/// Why a source timestamp was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TimestampError {
    /// The text does not follow `YYYY-MM-DDTHH:MM:SSZ` exactly.
    #[error("expected YYYY-MM-DDTHH:MM:SSZ")]
    Layout,
    /// The layout matches but a component is out of range.
    #[error("invalid date or time: {0}")]
    Invalid(#[from] chrono::ParseError),
    /// Second 60; calendars have no leap seconds.
    #[error("second out of range")]
    LeapSecond,
}

/// Parses a strict `YYYY-MM-DDTHH:MM:SSZ` UTC timestamp.
///
/// Fractional seconds, numeric offsets, a missing `Z` or a missing time
/// component are all rejected.
///
/// # Errors
///
/// Returns [`TimestampError`] if the text deviates from the layout or names an
/// impossible date or time.
pub fn parse_utc_timestamp(text: &str) -> Result<DateTime<Utc>, TimestampError> {
    if !matches_layout(text) {
        return Err(TimestampError::Layout);
    }
    let naive = NaiveDateTime::parse_from_str(text, SOURCE_FORMAT)?;
    // chrono reads `:60` as a leap second, stored in the nanosecond field.
    if naive.nanosecond() >= 1_000_000_000 {
        return Err(TimestampError::LeapSecond);
    }
    Ok(Utc.from_utc_datetime(&naive))
}

/// Formats an instant as a calendar date-time (`20240920T100000Z`).
pub fn format_compact(instant: &DateTime<Utc>) -> String {
    instant.format(COMPACT_FORMAT).to_string()
}

fn matches_layout(text: &str) -> bool {
    text.len() == SOURCE_LAYOUT.len()
        && text
            .bytes()
            .zip(SOURCE_LAYOUT)
            .all(|(byte, &expected)| match expected {
                b'd' => byte.is_ascii_digit(),
                _ => byte == expected,
            })
}
