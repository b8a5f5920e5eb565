//! Calendar-date keys, parsing and display.
//!
//! Everything in this crate compares dates at day resolution. Incoming
//! timestamps are reduced to a `NaiveDate` here, and stored records are
//! pinned to midday so a round trip through UTC never shifts the day.

use std::fmt;
use std::ops::RangeInclusive;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

use crate::error::SeriesError;

/// Lookup key for a calendar date.
///
/// Packs `(year, month, day)` into one integer. Month and day occupy fixed
/// decimal slots, so distinct dates never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateKey(i64);

impl DateKey {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self(i64::from(year) * 10_000 + i64::from(month) * 100 + i64::from(day))
    }

    pub fn year(self) -> i32 {
        self.0.div_euclid(10_000) as i32
    }

    pub fn month(self) -> u32 {
        (self.0.rem_euclid(10_000) / 100) as u32
    }

    pub fn day(self) -> u32 {
        self.0.rem_euclid(100) as u32
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month(), date.day())
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.year(), self.month(), self.day())
    }
}

/// Short chart label: `MM.DD`, both zero-padded.
pub fn display_short(date: NaiveDate) -> String {
    format!("{:02}.{:02}", date.month(), date.day())
}

/// Years that [`format_record_date`] writes as plain RFC 3339.
pub const RECORD_YEARS: RangeInclusive<i32> = 0..=9999;

/// The form a date takes in the persisted series file.
///
/// Midday UTC keeps the calendar date stable for readers in any timezone
/// within eleven hours of UTC.
pub fn format_record_date(date: NaiveDate) -> String {
    format!("{}T12:00:00.000Z", date.format("%Y-%m-%d"))
}

/// Reject dates whose record form would not parse back.
pub fn check_record_date(date: NaiveDate) -> Result<(), SeriesError> {
    if RECORD_YEARS.contains(&date.year()) {
        Ok(())
    } else {
        Err(SeriesError::DateOutOfRange(date))
    }
}

/// Parse a date-like string into a calendar date.
///
/// Accepts `YYYY-MM-DD`, a naive `YYYY-MM-DDTHH:MM:SS[.fff]`, or an RFC 3339
/// timestamp. Timestamps with an offset are reduced to their UTC date.
pub fn parse_calendar_date(input: &str) -> Result<NaiveDate, SeriesError> {
    let trimmed = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(dt.date());
    }

    Err(SeriesError::InvalidDate {
        input: input.to_string(),
        message: "expected YYYY-MM-DD or an RFC 3339 timestamp".into(),
    })
}
