//! Window type
//!
//! A window covers one calendar day in UTC, from `00:00:00.000000Z` through
//! `23:59:59.999999Z` inclusive.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use std::fmt;

/// Format used for the `:fromdate:` / `:todate:` query bounds
pub const BOUND_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

/// One calendar-day window
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Window {
    /// The calendar day
    pub date: NaiveDate,
    /// First instant of the day
    pub from: DateTime<Utc>,
    /// Last microsecond of the day
    pub to: DateTime<Utc>,
}

impl Window {
    /// Create the window covering a calendar day
    pub fn for_date(date: NaiveDate) -> Self {
        let from = date.and_time(NaiveTime::MIN).and_utc();
        let to = from + Duration::days(1) - Duration::microseconds(1);
        Self { date, from, to }
    }

    /// Lower bound as sent to the API (`YYYY-MM-DDT00:00:00.000000Z`)
    pub fn from_bound(&self) -> String {
        self.from.format(BOUND_FORMAT).to_string()
    }

    /// Upper bound as sent to the API (`YYYY-MM-DDT23:59:59.999999Z`)
    pub fn to_bound(&self) -> String {
        self.to.format(BOUND_FORMAT).to_string()
    }

    /// Whether an instant falls inside this window
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.from <= instant && instant <= self.to
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date.format("%Y-%m-%d"))
    }
}
