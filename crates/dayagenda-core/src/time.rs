//! Time types for calendar events.
//!
//! This module provides [`EventTime`] for representing event start/end times
//! (which may be either a specific datetime or an all-day date), [`Clock`]
//! for the single "now" a processing run is evaluated against, and
//! [`TimeWindow`] for defining query ranges.
//!
//! All instants are carried as `DateTime<FixedOffset>` in the offset of the
//! run's clock, so calendar dates ("which day is this event on") are the
//! dates the user sees.

use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDate, NaiveTime, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Represents the time of a calendar event.
///
/// Calendar events can have two types of times:
/// - **DateTime**: A specific point in time
/// - **AllDay**: A date without a specific time (all-day events)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum EventTime {
    /// A specific instant.
    DateTime(DateTime<FixedOffset>),
    /// An all-day event date (no specific time).
    AllDay(NaiveDate),
}

impl EventTime {
    /// Creates a new `EventTime::DateTime`.
    pub fn from_datetime(dt: DateTime<FixedOffset>) -> Self {
        Self::DateTime(dt)
    }

    /// Creates a new `EventTime::AllDay` from a date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self::AllDay(date)
    }

    /// Returns `true` if this is an all-day event time.
    pub fn is_all_day(&self) -> bool {
        matches!(self, Self::AllDay(_))
    }

    /// Resolves this time to an instant in the given offset.
    ///
    /// All-day dates resolve to local midnight of that date. Returns `None`
    /// when that midnight is outside the representable range.
    pub fn resolve(&self, tz: FixedOffset) -> Option<DateTime<FixedOffset>> {
        match self {
            Self::DateTime(dt) => Some(dt.with_timezone(&tz)),
            Self::AllDay(date) => start_of_day(*date, tz),
        }
    }
}

impl PartialOrd for EventTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EventTime {
    /// All-day dates are compared at midnight UTC.
    fn cmp(&self, other: &Self) -> Ordering {
        let utc = Utc.fix();
        self.resolve(utc).cmp(&other.resolve(utc))
    }
}

/// Returns local midnight of `date` in the given offset, or `None` when the
/// matching UTC instant overflows.
pub fn start_of_day(date: NaiveDate, tz: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let local = date.and_time(NaiveTime::MIN);
    let utc = local.checked_sub_signed(Duration::seconds(i64::from(tz.local_minus_utc())))?;
    Some(DateTime::from_naive_utc_and_offset(utc, tz))
}

/// Returns `true` if the instant falls exactly on a local midnight.
pub fn is_midnight(dt: &DateTime<FixedOffset>) -> bool {
    dt.time() == NaiveTime::MIN
}

/// Formats a date as the `YYYY-MM-DD` key used for day grouping.
pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// The single "now" a processing run is evaluated against.
///
/// Every filter and the expander read time through the same clock, so a
/// run never observes two different values of "now" or "today".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    now: DateTime<FixedOffset>,
}

impl Clock {
    /// Captures the current local time.
    pub fn system() -> Self {
        Self {
            now: Local::now().fixed_offset(),
        }
    }

    /// A clock frozen at the given instant (its offset defines "local").
    pub fn fixed(now: DateTime<FixedOffset>) -> Self {
        Self { now }
    }

    /// The captured instant.
    pub fn now(&self) -> DateTime<FixedOffset> {
        self.now
    }

    /// The UTC offset all dates are computed in.
    pub fn timezone(&self) -> FixedOffset {
        *self.now.offset()
    }

    /// Today's calendar date.
    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }

    /// Local midnight of today.
    pub fn today_start(&self) -> DateTime<FixedOffset> {
        self.now - (self.now.time() - NaiveTime::MIN)
    }

    /// Local midnight of the given date.
    pub fn start_of_day(&self, date: NaiveDate) -> Option<DateTime<FixedOffset>> {
        start_of_day(date, self.timezone())
    }

    /// The local calendar date of an instant.
    pub fn date_of(&self, dt: &DateTime<FixedOffset>) -> NaiveDate {
        dt.with_timezone(&self.timezone()).date_naive()
    }

    /// The display window `[today, today + days)`.
    pub fn day_window(&self, days: u32) -> TimeWindow {
        let start = self.today_start();
        TimeWindow::new(start, start + Duration::days(i64::from(days)))
    }
}

/// A time window for querying calendar events.
///
/// Represents a half-open interval `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Start of the window (inclusive).
    pub start: DateTime<FixedOffset>,
    /// End of the window (exclusive).
    pub end: DateTime<FixedOffset>,
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// # Panics
    ///
    /// Panics if `start` is after `end`.
    pub fn new(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Self {
        assert!(start <= end, "TimeWindow start must be <= end");
        Self { start, end }
    }

    /// Returns the duration of this time window.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Checks if an instant falls within this window.
    pub fn contains(&self, dt: &DateTime<FixedOffset>) -> bool {
        self.start <= *dt && *dt < self.end
    }

    /// Checks if a span `[start, end)` overlaps with this window.
    ///
    /// Zero-length spans count when they sit inside the window.
    pub fn overlaps(&self, start: &DateTime<FixedOffset>, end: &DateTime<FixedOffset>) -> bool {
        if start == end {
            return self.contains(start);
        }
        *start < self.end && *end > self.start
    }

    /// RFC 3339 rendering of the window start, as handed to event sources.
    pub fn start_iso(&self) -> String {
        self.start.to_rfc3339()
    }

    /// RFC 3339 rendering of the window end.
    pub fn end_iso(&self) -> String {
        self.end.to_rfc3339()
    }
}
