//! Tests for window module

use super::*;
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use test_case::test_case;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ============================================================================
// Window Tests
// ============================================================================

#[test]
fn test_window_bounds() {
    let window = Window::for_date(date(2024, 1, 1));
    assert_eq!(window.from_bound(), "2024-01-01T00:00:00.000000Z");
    assert_eq!(window.to_bound(), "2024-01-01T23:59:59.999999Z");
    assert!(window.from < window.to);
    assert_eq!(window.to_string(), "2024-01-01");
}

#[test]
fn test_window_contains() {
    let window = Window::for_date(date(2024, 3, 10));
    assert!(window.contains(Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap()));
    assert!(window.contains(Utc.with_ymd_and_hms(2024, 3, 10, 23, 59, 59).unwrap()));
    assert!(!window.contains(Utc.with_ymd_and_hms(2024, 3, 11, 0, 0, 0).unwrap()));
}

// ============================================================================
// Start Date Parsing Tests
// ============================================================================

#[test_case("2024-01-01" ; "plain date")]
#[test_case("2024-01-01T00:00:00Z" ; "utc suffix")]
#[test_case("2024-01-01T00:00:00.100000Z" ; "nudged microseconds")]
#[test_case("2024-01-01T00:00:00+0000" ; "numeric offset")]
#[test_case("2024-01-01T22:00:00-05:00" ; "offset is not interpreted")]
#[test_case("2024-01-01 12:30:00" ; "space separator")]
#[test_case("  2024-01-01  " ; "surrounding whitespace")]
fn test_parse_start_date_accepts(input: &str) {
    assert_eq!(parse_start_date(input).unwrap(), date(2024, 1, 1));
}

#[test_case("" ; "empty")]
#[test_case("2024/01/01" ; "slashes")]
#[test_case("01-01-2024" ; "day first")]
#[test_case("2024-13-01" ; "month out of range")]
#[test_case("2024-02-30" ; "day out of range")]
#[test_case("2024-01-01X" ; "garbage suffix")]
fn test_parse_start_date_rejects(input: &str) {
    let err = parse_start_date(input).unwrap_err();
    assert!(matches!(err, crate::Error::InvalidDate { .. }), "{err}");
}

// ============================================================================
// Windows Iterator Tests
// ============================================================================

#[test]
fn test_windows_three_days() {
    let now = Utc.with_ymd_and_hms(2024, 1, 3, 12, 0, 0).unwrap();
    let dates: Vec<String> = windows("2024-01-01", now)
        .unwrap()
        .map(|w| w.to_string())
        .collect();
    assert_eq!(dates, vec!["2024-01-01", "2024-01-02", "2024-01-03"]);
}

#[test]
fn test_windows_today_yields_one() {
    let now = Utc.with_ymd_and_hms(2024, 5, 5, 0, 0, 1).unwrap();
    let all: Vec<Window> = windows("2024-05-05T00:00:00.100000Z", now).unwrap().collect();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].date, date(2024, 5, 5));
}

#[test]
fn test_windows_future_start_is_empty() {
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    assert_eq!(windows("2024-02-01", now).unwrap().count(), 0);
}

#[test]
fn test_windows_invalid_start() {
    let now = Utc::now();
    assert!(windows("not-a-date", now).is_err());
}

#[test]
fn test_windows_count_contiguous_ascending() {
    let now = Utc.with_ymd_and_hms(2024, 3, 2, 18, 30, 0).unwrap();
    let start = "2024-02-20";
    let expected = (now.date_naive() - date(2024, 2, 20)).num_days() as usize + 1;

    let iter = windows(start, now).unwrap();
    assert_eq!(iter.len(), expected);

    let all: Vec<Window> = iter.collect();
    assert_eq!(all.len(), expected);

    for pair in all.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        assert!(a.date < b.date);
        assert_eq!(b.from - a.from, Duration::hours(24));
        assert_eq!(b.from - a.to, Duration::microseconds(1));
    }
    // Leap day is covered
    assert!(all.iter().any(|w| w.date == date(2024, 2, 29)));
}

#[test]
fn test_windows_restartable() {
    let now = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
    let first: Vec<Window> = windows("2024-01-01", now).unwrap().collect();
    let second: Vec<Window> = windows("2024-01-01", now).unwrap().collect();
    assert_eq!(first, second);
}

#[test]
fn test_windows_fused() {
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut iter = windows("2024-01-01", now).unwrap();
    assert!(iter.next().is_some());
    assert!(iter.next().is_none());
    assert!(iter.next().is_none());
}
