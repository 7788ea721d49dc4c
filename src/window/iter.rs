//! Window iteration
//!
//! `windows` is a pure function of its inputs: calling it twice with the same
//! start date and `now` yields the same sequence.

use super::types::Window;
use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use std::sync::LazyLock;

/// Leading calendar date, optionally followed by a time/zone suffix
static START_DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4}-\d{2}-\d{2})(?:[T ].*)?$").expect("start date regex is valid")
});

/// Parse the calendar date out of a start date string.
///
/// Accepts `YYYY-MM-DD` with an optional suffix such as
/// `T00:00:00.100000Z` or `T00:00:00+0000`. The suffix is stripped, never
/// interpreted: `2024-01-01T23:00:00-05:00` is still `2024-01-01`.
pub fn parse_start_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    let captures = START_DATE_REGEX
        .captures(trimmed)
        .ok_or_else(|| Error::invalid_date(input, "expected YYYY-MM-DD"))?;

    let date = &captures[1];
    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| Error::invalid_date(input, e.to_string()))
}

/// Build the lazy window sequence from `start_date` through the day containing `now`
pub fn windows(start_date: &str, now: DateTime<Utc>) -> Result<Windows> {
    let first = parse_start_date(start_date)?;
    Ok(Windows::new(first, now.date_naive()))
}

/// Ascending iterator over calendar-day windows, inclusive on both ends
#[derive(Debug, Clone)]
pub struct Windows {
    next: Option<NaiveDate>,
    last: NaiveDate,
}

impl Windows {
    /// Create an iterator from `first` through `last`
    pub fn new(first: NaiveDate, last: NaiveDate) -> Self {
        Self {
            next: Some(first),
            last,
        }
    }
}

impl Iterator for Windows {
    type Item = Window;

    fn next(&mut self) -> Option<Window> {
        let date = self.next?;
        if date > self.last {
            self.next = None;
            return None;
        }
        self.next = date.succ_opt();
        Some(Window::for_date(date))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.next {
            Some(date) if date <= self.last => (self.last - date).num_days() as usize + 1,
            _ => 0,
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Windows {}

impl std::iter::FusedIterator for Windows {}
