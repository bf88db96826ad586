//! Lenient timestamp parsing for records read from the external store.
//!
//! Records arrive with timestamps in whatever shape the hosted datastore
//! produced. A timestamp that cannot be read is not an error: the record is
//! kept with `None` and the aggregator reports it as a data-quality warning.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::{self, Deserializer, Visitor};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses a record timestamp into local wall-clock time.
///
/// Accepted shapes:
/// - RFC 3339 with an offset (`2026-01-15T09:00:00+02:00`), read as its own wall-clock time
/// - Postgres style with a short offset (`2026-01-15 09:00:00+02`)
/// - Naive date-times with `T` or space separators, optional fractional seconds
/// - A bare date, read as midnight
///
/// # Example
///
/// ```
/// use taxi_engine::models::parse_timestamp;
///
/// let ts = parse_timestamp("2026-01-15T09:30:00+02:00").unwrap();
/// assert_eq!(ts.to_string(), "2026-01-15 09:30:00");
/// assert!(parse_timestamp("yesterday").is_none());
/// ```
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Some(dt.naive_local());
    }
    for format in NAIVE_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(ts);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Deserializes an optional timestamp, mapping anything unreadable to `None`.
pub(crate) fn lenient<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientTimestampVisitor)
}

struct LenientTimestampVisitor;

impl<'de> Visitor<'de> for LenientTimestampVisitor {
    type Value = Option<NaiveDateTime>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a timestamp string or null")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(parse_timestamp(v))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(LenientTimestampVisitor)
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<Self::Value, E> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_rfc3339_keeps_wall_clock_time() {
        assert_eq!(
            parse_timestamp("2026-01-15T21:00:00+02:00"),
            Some(make_datetime("2026-01-15 21:00:00"))
        );
        assert_eq!(
            parse_timestamp("2026-01-15T19:00:00Z"),
            Some(make_datetime("2026-01-15 19:00:00"))
        );
    }

    #[test]
    fn test_postgres_short_offset() {
        assert_eq!(
            parse_timestamp("2026-01-15 08:15:00.123+02"),
            Some(
                NaiveDateTime::parse_from_str("2026-01-15 08:15:00.123", "%Y-%m-%d %H:%M:%S%.f")
                    .unwrap()
            )
        );
    }

    #[test]
    fn test_naive_formats() {
        assert_eq!(
            parse_timestamp("2026-01-15T09:00:00"),
            Some(make_datetime("2026-01-15 09:00:00"))
        );
        assert_eq!(
            parse_timestamp("2026-01-15 09:00:00"),
            Some(make_datetime("2026-01-15 09:00:00"))
        );
    }

    #[test]
    fn test_bare_date_is_midnight() {
        assert_eq!(
            parse_timestamp("2026-01-15"),
            Some(make_datetime("2026-01-15 00:00:00"))
        );
    }

    #[test]
    fn test_garbage_is_none() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("   "), None);
        assert_eq!(parse_timestamp("not a date"), None);
        assert_eq!(parse_timestamp("2026-13-45T99:00:00"), None);
    }

    #[derive(Debug, serde::Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "lenient")]
        at: Option<NaiveDateTime>,
    }

    #[test]
    fn test_lenient_deserializer_accepts_non_strings() {
        let holder: Holder = serde_json::from_str(r#"{"at": 12345}"#).unwrap();
        assert!(holder.at.is_none());

        let holder: Holder = serde_json::from_str(r#"{"at": null}"#).unwrap();
        assert!(holder.at.is_none());

        let holder: Holder = serde_json::from_str(r#"{}"#).unwrap();
        assert!(holder.at.is_none());

        let holder: Holder = serde_json::from_str(r#"{"at": "2026-01-15T09:00:00"}"#).unwrap();
        assert_eq!(holder.at, Some(make_datetime("2026-01-15 09:00:00")));
    }
}
