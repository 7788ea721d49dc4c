//! Date window module
//!
//! Splits extraction into calendar-day windows, one API query per day.
//!
//! # Overview
//!
//! The window module provides:
//! - `Window` - One UTC calendar day with inclusive microsecond bounds
//! - `Windows` - Lazy, ascending iterator over days from a start date through now
//! - `parse_start_date` - Lenient `YYYY-MM-DD` parser used for config and state values

mod iter;
mod types;

pub use iter::{parse_start_date, windows, Windows};
pub use types::{Window, BOUND_FORMAT};

#[cfg(test)]
mod tests;
