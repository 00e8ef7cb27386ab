//! Lenient date parsing for sort keys
//!
//! Records carry dates as RFC 3339 strings, bare dates, US-style dates or
//! epoch numbers depending on the producing system. Anything unrecognized
//! parses to `None`, which sorts below every real instant.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

use crate::resolve::coerce_text;

/// Epoch values at or above this are milliseconds (≈ March 1973 in ms,
/// year 5138 in seconds)
const EPOCH_MILLIS_THRESHOLD: i64 = 100_000_000_000;

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

/// Parse a record value into a UTC instant
pub fn parse_instant(value: Option<&Value>) -> Option<DateTime<Utc>> {
    match value? {
        Value::Number(n) => n.as_i64().and_then(from_epoch),
        other => parse_text(&coerce_text(Some(other))),
    }
}

/// Parse text into a UTC instant; zone-less forms are taken as UTC
pub fn parse_text(raw: &str) -> Option<DateTime<Utc>> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Some(dt) = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
    {
        return Some(Utc.from_utc_datetime(&dt));
    }

    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
    {
        return date.and_hms_opt(0, 0, 0).map(|dt| Utc.from_utc_datetime(&dt));
    }

    if text.bytes().all(|b| b.is_ascii_digit()) {
        return text.parse::<i64>().ok().and_then(from_epoch);
    }

    None
}

fn from_epoch(raw: i64) -> Option<DateTime<Utc>> {
    if raw >= EPOCH_MILLIS_THRESHOLD {
        DateTime::from_timestamp_millis(raw)
    } else {
        DateTime::from_timestamp(raw, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ymd(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_rfc3339_with_offset() {
        let parsed = parse_text("2024-03-05T10:00:00-05:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 3, 5, 15, 0, 0).unwrap());
    }

    #[test]
    fn test_zone_less_forms() {
        assert_eq!(
            parse_text("2024-03-05 08:30").unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 5, 8, 30, 0).unwrap()
        );
        assert_eq!(
            parse_text("2024-03-05T08:30:15").unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 5, 8, 30, 15).unwrap()
        );
        assert_eq!(parse_text("2024-03-05").unwrap(), ymd(2024, 3, 5));
        assert_eq!(parse_text("03/05/2024").unwrap(), ymd(2024, 3, 5));
    }

    #[test]
    fn test_epoch_seconds_and_millis() {
        let expected = ymd(2024, 1, 1);
        assert_eq!(parse_instant(Some(&json!(1_704_067_200))), Some(expected));
        assert_eq!(parse_instant(Some(&json!(1_704_067_200_000i64))), Some(expected));
        assert_eq!(parse_instant(Some(&json!("1704067200"))), Some(expected));
    }

    #[test]
    fn test_unparseable_is_none() {
        assert_eq!(parse_instant(None), None);
        assert_eq!(parse_instant(Some(&json!(null))), None);
        assert_eq!(parse_instant(Some(&json!("next Tuesday"))), None);
        assert_eq!(parse_instant(Some(&json!("2024-13-45"))), None);
        assert_eq!(parse_instant(Some(&json!(1.5))), None);
        assert_eq!(parse_instant(Some(&json!({ "date": "2024-01-01" }))), None);
    }
}
