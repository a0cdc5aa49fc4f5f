//! Free-text date-range parsing.
//!
//! Gallery pages carry ranges like "December 5 - 19 2025". The pattern
//! accepts an optional second month name before the end day, but both
//! endpoints are computed from the first month: downstream consumers
//! were built against that behavior, so cross-month ranges like
//! "August 25 - September 11 2023" intentionally keep the narrow
//! interpretation.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, SecondsFormat, TimeZone, Utc};
use regex::Regex;

use super::dom::collapse_ws;

static RANGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z]+)\s+(\d{1,2})\s*-\s*(?:([A-Za-z]+)\s+)?(\d{1,2})\s+(\d{4})$")
        .expect("date range pattern is valid")
});

/// Parse a `<Month> <Day> - <Day> <Year>` range into UTC-midnight
/// endpoints. `None` when the text does not match or names an invalid
/// calendar date; callers log and leave the date fields absent.
pub fn parse_date_range(raw: &str) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let text = collapse_ws(raw);
    if text.is_empty() {
        return None;
    }

    let caps = RANGE_PATTERN.captures(&text)?;
    let month = &caps[1];
    let start_day: u32 = caps[2].parse().ok()?;
    let end_day: u32 = caps[4].parse().ok()?;
    let year: i32 = caps[5].parse().ok()?;

    let start = month_day_year(month, start_day, year)?;
    let end = month_day_year(month, end_day, year)?;
    Some((start, end))
}

fn month_day_year(month: &str, day: u32, year: i32) -> Option<DateTime<Utc>> {
    let text = format!("{} {} {}", month, day, year);
    let date = NaiveDate::parse_from_str(&text, "%B %d %Y")
        .or_else(|_| NaiveDate::parse_from_str(&text, "%b %d %Y"))
        .ok()?;
    Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
}

/// ISO-8601 with millisecond precision and a `Z` suffix, matching the
/// record shape the import pipeline expects.
pub fn to_iso(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_month_range_parses_to_utc_midnights() {
        let (start, end) = parse_date_range("December 5 - 19 2025").unwrap();
        assert_eq!(to_iso(start), "2025-12-05T00:00:00.000Z");
        assert_eq!(to_iso(end), "2025-12-19T00:00:00.000Z");
    }

    #[test]
    fn abbreviated_month_names_are_accepted() {
        let (start, _) = parse_date_range("Sep 4 - 7 2025").unwrap();
        assert_eq!(to_iso(start), "2025-09-04T00:00:00.000Z");
    }

    #[test]
    fn extra_whitespace_is_tolerated() {
        let (start, end) = parse_date_range("  September 4  -  7   2025 ").unwrap();
        assert_eq!(to_iso(start), "2025-09-04T00:00:00.000Z");
        assert_eq!(to_iso(end), "2025-09-07T00:00:00.000Z");
    }

    #[test]
    fn cross_month_range_keeps_first_month_for_both_endpoints() {
        let (start, end) = parse_date_range("August 25 - September 11 2023").unwrap();
        assert_eq!(to_iso(start), "2023-08-25T00:00:00.000Z");
        assert_eq!(to_iso(end), "2023-08-11T00:00:00.000Z");
    }

    #[test]
    fn garbage_and_invalid_dates_return_none() {
        assert!(parse_date_range("not a date").is_none());
        assert!(parse_date_range("").is_none());
        assert!(parse_date_range("February 30 - 31 2025").is_none());
        assert!(parse_date_range("Smarch 1 - 2 2025").is_none());
    }
}
