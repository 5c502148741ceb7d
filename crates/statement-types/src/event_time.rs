//! RFC 3339 encoding for event timestamps.
//!
//! Timestamps are written in UTC with a `Z` suffix. The fractional second
//! carries at most nine digits with trailing zeros removed, and is omitted
//! entirely on a whole second:
//!
//! ```text
//! 1970-01-01T00:16:40Z
//! 1970-01-01T00:16:40.5Z
//! 2024-03-01T12:00:00.000000001Z
//! ```
//!
//! Years outside `0..=9999` cannot be written as RFC 3339 and fail to
//! serialize. Decoding accepts any RFC 3339 offset and normalizes to UTC.
//!
//! Use with `#[serde(with = "statement_types::event_time")]`.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Smallest year representable in RFC 3339.
pub const MIN_YEAR: i32 = 0;

/// Largest year representable in RFC 3339.
pub const MAX_YEAR: i32 = 9999;

/// Format a timestamp as RFC 3339 with trimmed fractional seconds.
///
/// Returns `None` if the year is outside [`MIN_YEAR`]..=[`MAX_YEAR`].
///
/// # Examples
///
/// ```
/// use chrono::DateTime;
/// use statement_types::event_time::format;
///
/// let t = DateTime::from_timestamp(1000, 250_000_000);
/// assert_eq!(
///     t.and_then(|t| format(&t)).as_deref(),
///     Some("1970-01-01T00:16:40.25Z")
/// );
/// ```
pub fn format(time: &DateTime<Utc>) -> Option<String> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&time.year()) {
        return None;
    }

    let whole = time.format("%Y-%m-%dT%H:%M:%S");
    let nanos = time.timestamp_subsec_nanos();
    if nanos == 0 {
        return Some(format!("{whole}Z"));
    }

    let fraction = format!("{nanos:09}");
    Some(format!("{whole}.{}Z", fraction.trim_end_matches('0')))
}

/// Parse an RFC 3339 timestamp into UTC.
///
/// # Errors
///
/// Returns the underlying [`chrono::ParseError`] if the input is not
/// valid RFC 3339.
pub fn parse(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw).map(|t| t.with_timezone(&Utc))
}

/// Serde serializer for event timestamps.
///
/// # Errors
///
/// Fails if the year cannot be represented in RFC 3339.
pub fn serialize<S>(time: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let encoded = format(time).ok_or_else(|| {
        serde::ser::Error::custom(format!(
            "event time year {} outside of range [{MIN_YEAR},{MAX_YEAR}]",
            time.year()
        ))
    })?;
    serializer.serialize_str(&encoded)
}

/// Serde deserializer for event timestamps.
///
/// # Errors
///
/// Fails if the value is not a string or not valid RFC 3339.
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(seconds: i64, nanos: u32) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(seconds, nanos)
    }

    #[test]
    fn whole_second_has_no_fraction() {
        let encoded = at(1000, 0).and_then(|t| format(&t));
        assert_eq!(encoded.as_deref(), Some("1970-01-01T00:16:40Z"));
    }

    #[test]
    fn fraction_is_trimmed() {
        let encoded = at(1000, 500_000_000).and_then(|t| format(&t));
        assert_eq!(encoded.as_deref(), Some("1970-01-01T00:16:40.5Z"));

        let encoded = at(1000, 120_000).and_then(|t| format(&t));
        assert_eq!(encoded.as_deref(), Some("1970-01-01T00:16:40.00012Z"));
    }

    #[test]
    fn single_nanosecond_keeps_all_digits() {
        let encoded = at(1_709_294_400, 1).and_then(|t| format(&t));
        assert_eq!(encoded.as_deref(), Some("2024-03-01T12:00:00.000000001Z"));
    }

    #[test]
    fn year_past_9999_is_rejected() {
        // 10000-01-01T00:00:00Z
        let encoded = at(253_402_300_800, 0).map(|t| format(&t));
        assert_eq!(encoded, Some(None));
    }

    #[test]
    fn negative_seconds_before_epoch() {
        let encoded = at(-1, 0).and_then(|t| format(&t));
        assert_eq!(encoded.as_deref(), Some("1969-12-31T23:59:59Z"));
    }

    #[test]
    fn parse_normalizes_offset_to_utc() {
        let parsed = parse("1970-01-01T01:16:40.5+01:00").ok();
        assert_eq!(parsed, at(1000, 500_000_000));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse("yesterday").is_err());
    }
}
