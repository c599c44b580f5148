//! Recency filtering
//!
//! Timestamps arrive either as unix seconds (`data-timestamp="1681739102.0"`)
//! or as ISO-8601 strings (`datetime="2023-04-17T13:45:02.000Z"`). Both are
//! converted to a UTC instant before comparing against the age threshold.

use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};

/// Parses a site-supplied timestamp into a UTC instant
///
/// Accepts:
/// - unix seconds, integral or fractional (`"1681739102"`, `"1681739102.5"`)
/// - RFC 3339 with any offset (`"2023-04-17T15:45:02+02:00"`)
/// - ISO-8601 without an offset, read as UTC (`"2023-04-17T13:45:02.000"`)
///
/// Returns `None` for anything else.
///
/// # Example
///
/// ```
/// use ideas_harvester::recency::parse_timestamp;
///
/// let from_unix = parse_timestamp("1681739102.0").unwrap();
/// let from_iso = parse_timestamp("2023-04-17T13:45:02Z").unwrap();
/// assert_eq!(from_unix, from_iso);
/// ```
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(seconds) = raw.parse::<f64>() {
        return from_unix_seconds(seconds);
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }

    // Naive local representations are anchored to UTC, never to the host clock
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn from_unix_seconds(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }

    let whole = seconds.trunc();
    let nanos = ((seconds - whole) * 1_000_000_000.0).round() as u32;
    Utc.timestamp_opt(whole as i64, nanos.min(999_999_999)).single()
}

/// Decides whether a post published at `published` is recent enough
///
/// Included iff `now - published <= max_oldness_seconds`. The boundary is
/// inclusive and instants in the future always pass.
pub fn is_within_age(published: DateTime<Utc>, max_oldness_seconds: u64, now: DateTime<Utc>) -> bool {
    // chrono durations top out at i64::MAX milliseconds
    let seconds = i64::try_from(max_oldness_seconds)
        .unwrap_or(i64::MAX)
        .min(i64::MAX / 1000);
    let max_age = Duration::seconds(seconds);
    now.signed_duration_since(published) <= max_age
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(raw: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(raw).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_parse_unix_integer() {
        assert_eq!(parse_timestamp("1681739102"), Some(at("2023-04-17T13:45:02Z")));
    }

    #[test]
    fn test_parse_unix_fractional() {
        let parsed = parse_timestamp("1681739102.5").unwrap();
        assert_eq!(parsed.timestamp(), 1681739102);
        assert_eq!(parsed.timestamp_subsec_millis(), 500);
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        assert_eq!(
            parse_timestamp("2023-04-17T15:45:02+02:00"),
            Some(at("2023-04-17T13:45:02Z"))
        );
    }

    #[test]
    fn test_parse_naive_is_utc() {
        assert_eq!(
            parse_timestamp("2023-04-17T13:45:02.000"),
            Some(at("2023-04-17T13:45:02Z"))
        );
        assert_eq!(
            parse_timestamp("2023-04-17 13:45:02"),
            Some(at("2023-04-17T13:45:02Z"))
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("   "), None);
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp("NaN"), None);
        assert_eq!(parse_timestamp("inf"), None);
    }

    #[test]
    fn test_within_age() {
        let now = at("2023-04-17T13:45:02Z");
        assert!(is_within_age(now - Duration::seconds(60), 360, now));
        assert!(!is_within_age(now - Duration::seconds(361), 360, now));
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let now = at("2023-04-17T13:45:02Z");
        assert!(is_within_age(now - Duration::seconds(360), 360, now));
        assert!(!is_within_age(
            now - Duration::seconds(360) - Duration::milliseconds(1),
            360,
            now
        ));
    }

    #[test]
    fn test_future_instant_included() {
        let now = at("2023-04-17T13:45:02Z");
        assert!(is_within_age(now + Duration::hours(2), 1, now));
    }

    #[test]
    fn test_huge_threshold_does_not_overflow() {
        let now = at("2023-04-17T13:45:02Z");
        assert!(is_within_age(at("1971-01-01T00:00:00Z"), u64::MAX, now));
    }
}
