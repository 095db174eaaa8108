//! Timestamp parsing and bucket key derivation.
//!
//! A bucket key is a string that uniquely identifies the time bucket a sample
//! falls into for a given granularity: `YYYY-MM-DD` for day, `YYYY-Www` for
//! ISO week, `YYYY-MM` for month, `YYYY` for year. Keys from different
//! granularities are not comparable. All keys are derived from the UTC
//! calendar date of the parsed timestamp.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc};

use crate::error::{ChartError, Result};
use crate::types::Granularity;

/// Parse an ISO-8601 timestamp into a UTC instant.
///
/// Accepts full RFC 3339 (`2023-01-01T12:30:00Z`, with offset), a naive
/// datetime (`2023-01-01T12:30:00`, read as UTC), or a bare calendar date
/// (`2023-01-01`, read as UTC midnight). Anything else is rejected with
/// [`ChartError::InvalidTimestamp`].
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(ndt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Ok(Utc.from_utc_datetime(&ndt));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)));
    }
    Err(ChartError::invalid_timestamp(raw))
}

/// Map a timestamp to its bucket key for the given granularity.
pub fn bucket_key(timestamp: &str, granularity: Granularity) -> Result<String> {
    let instant = parse_timestamp(timestamp)?;
    Ok(match granularity {
        Granularity::Day => instant.format("%Y-%m-%d").to_string(),
        Granularity::Week => iso_week_key(instant),
        Granularity::Month => instant.format("%Y-%m").to_string(),
        Granularity::Year => instant.year().to_string(),
    })
}

/// ISO-8601 week key, `YYYY-Www`.
///
/// Week 1 is the week containing the first Thursday of the year, so the week
/// year can differ from the calendar year at the boundaries (Dec 31 2018 is
/// `2019-W1`). The week number is deliberately not zero-padded (`2019-W1`,
/// not `2019-W01`) — that is the format the rest of the pipeline, including
/// drill-down labels, was built against.
fn iso_week_key(instant: DateTime<Utc>) -> String {
    let week = instant.iso_week();
    format!("{}-W{}", week.year(), week.week())
}

/// Extract the calendar year from a clicked point label.
///
/// Labels arrive in whatever shape the current view produced: a raw
/// timestamp, a day/month/week bucket key, or a bare year. All of them start
/// with the four-digit year, so that prefix is all that is read. Returns
/// `None` for labels that do not start with four digits; drill-down treats
/// that as "no matching samples" rather than an error.
pub fn label_year(label: &str) -> Option<i32> {
    let prefix = label.get(..4)?;
    if !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    prefix.parse().ok()
}

/// Chronological sort key for an x-axis label.
///
/// Bucket keys sort lexicographically except for week keys, where the
/// non-padded week number puts `W10` before `W2`. The chart axis sorts with
/// this key instead; labels are only ever compared within a single series,
/// so the tuple shapes of the different label forms never mix.
pub fn axis_sort_key(label: &str) -> (i32, u32, u32) {
    if let Some(rest) = label.get(5..) {
        if label.as_bytes().get(5) == Some(&b'W') {
            let week: u32 = rest[1..].parse().unwrap_or(0);
            let year = label_year(label).unwrap_or(0);
            return (year, week, 0);
        }
    }
    if let Ok(instant) = parse_timestamp(label) {
        return (instant.year(), instant.ordinal(), instant.num_seconds_from_midnight());
    }
    // Year and month keys are not full dates; fall back to their parts.
    let year = label_year(label).unwrap_or(0);
    let month: u32 = label
        .get(5..7)
        .and_then(|m| m.parse().ok())
        .unwrap_or(0);
    (year, month, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn day_key_uses_utc_date() {
        assert_eq!(
            bucket_key("2023-01-01T23:30:00Z", Granularity::Day).unwrap(),
            "2023-01-01"
        );
        // An offset timestamp buckets by its UTC date, not the local one.
        assert_eq!(
            bucket_key("2023-01-01T23:30:00+02:00", Granularity::Day).unwrap(),
            "2023-01-01"
        );
        assert_eq!(
            bucket_key("2023-01-01T23:30:00-02:00", Granularity::Day).unwrap(),
            "2023-01-02"
        );
    }

    #[test]
    fn month_and_year_keys() {
        assert_eq!(
            bucket_key("2023-06-15", Granularity::Month).unwrap(),
            "2023-06"
        );
        assert_eq!(bucket_key("2023-06-15", Granularity::Year).unwrap(), "2023");
    }

    #[test]
    fn iso_week_boundary_belongs_to_next_year() {
        // Dec 31 2018 is a Monday and opens ISO week 1 of 2019.
        assert_eq!(
            bucket_key("2018-12-31", Granularity::Week).unwrap(),
            "2019-W1"
        );
        // Jan 1 2023 is a Sunday and closes ISO week 52 of 2022.
        assert_eq!(
            bucket_key("2023-01-01", Granularity::Week).unwrap(),
            "2022-W52"
        );
        assert_eq!(
            bucket_key("2023-01-02", Granularity::Week).unwrap(),
            "2023-W1"
        );
    }

    #[test]
    fn week_number_is_not_zero_padded() {
        let key = bucket_key("2023-01-18", Granularity::Week).unwrap();
        assert_eq!(key, "2023-W3");
    }

    #[test]
    fn malformed_timestamp_is_rejected() {
        assert!(parse_timestamp("not-a-date").is_err());
        assert!(parse_timestamp("2023-13-40").is_err());
        assert!(parse_timestamp("").is_err());
    }

    #[test]
    fn label_year_reads_leading_digits() {
        assert_eq!(label_year("2023"), Some(2023));
        assert_eq!(label_year("2023-06"), Some(2023));
        assert_eq!(label_year("2023-W3"), Some(2023));
        assert_eq!(label_year("2023-06-15T10:00:00Z"), Some(2023));
        assert_eq!(label_year("n/a"), None);
        assert_eq!(label_year(""), None);
    }

    #[test]
    fn axis_sort_orders_week_keys_numerically() {
        let mut keys = vec!["2023-W10", "2023-W2", "2022-W52", "2023-W1"];
        keys.sort_by_key(|k| axis_sort_key(k));
        assert_eq!(keys, vec!["2022-W52", "2023-W1", "2023-W2", "2023-W10"]);
    }

    #[test]
    fn axis_sort_orders_mixed_day_keys() {
        let mut keys = vec!["2023-06-15", "2023-01-02", "2023-01-01"];
        keys.sort_by_key(|k| axis_sort_key(k));
        assert_eq!(keys, vec!["2023-01-01", "2023-01-02", "2023-06-15"]);
    }
}
