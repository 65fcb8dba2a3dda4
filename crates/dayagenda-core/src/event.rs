//! Event types for calendar agendas.
//!
//! This module provides the canonical types a processing run produces:
//! - [`CalendarSource`]: A configured calendar a run fetches from
//! - [`Occurrence`]: Which day of a multi-day span an event stands for
//! - [`Event`]: A provider-agnostic event with resolved start/end instants
//! - [`DayGroup`]: The events of one calendar day, ready for display

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::time::is_midnight;

/// A calendar source as configured by the user.
///
/// Configuration may name a source by bare identifier or by an object with a
/// display name; both forms normalize to this type on ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarSource {
    /// The source identifier handed to the event source.
    pub id: String,
    /// Optional human-readable name.
    pub name: Option<String>,
}

impl CalendarSource {
    /// Creates a source identified only by its id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }

    /// Builder method to set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The name to show for this source: its configured name, else its id.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.id)
    }
}

/// Marks an event as one day of an expanded multi-day span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    /// Zero-based day of the span this occurrence represents.
    pub add_days: u32,
    /// Number of days the whole span covers.
    pub days_long: u32,
}

impl Occurrence {
    /// Creates a new occurrence stamp.
    pub fn new(add_days: u32, days_long: u32) -> Self {
        Self {
            add_days,
            days_long,
        }
    }

    /// Returns true for the first day of the span.
    pub fn is_first_day(&self) -> bool {
        self.add_days == 0
    }

    /// Returns true for the last day of the span.
    pub fn is_last_day(&self) -> bool {
        self.add_days + 1 >= self.days_long
    }
}

/// A normalized calendar event.
///
/// Produced by the normalizer from a raw source record; never mutated after
/// construction. Expanded multi-day events yield one `Event` per day, each
/// carrying an [`Occurrence`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Stable identifier (raw `id`, else `uid`).
    pub id: String,
    /// The event title, if the source provided one.
    pub title: Option<String>,
    /// The event location.
    pub location: Option<String>,
    /// Link to the event in the source calendar's UI.
    pub html_link: Option<String>,
    /// When the event (or this occurrence) starts.
    pub start: DateTime<FixedOffset>,
    /// When the event (or this occurrence) ends.
    pub end: DateTime<FixedOffset>,
    /// Whether the source declared this as an all-day event.
    pub is_all_day: bool,
    /// Whether the original event starts and ends on different dates.
    pub is_multi_day: bool,
    /// The configured source this event is attributed to.
    pub origin_calendar: Option<CalendarSource>,
    /// Present only on occurrences produced by multi-day expansion.
    pub occurrence: Option<Occurrence>,
}

impl Event {
    /// Creates a new event with required fields.
    pub fn new(
        id: impl Into<String>,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    ) -> Self {
        let is_multi_day = start.date_naive() != end.date_naive();
        Self {
            id: id.into(),
            title: None,
            location: None,
            html_link: None,
            start,
            end,
            is_all_day: false,
            is_multi_day,
            origin_calendar: None,
            occurrence: None,
        }
    }

    /// The title to display, falling back to "(No title)" if absent or blank.
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or("(No title)")
    }

    /// The calendar date this event is listed under.
    pub fn day(&self) -> NaiveDate {
        self.start.date_naive()
    }

    /// Returns true if the event covers whole days (declared all-day, or
    /// running from one midnight to a later one).
    pub fn is_full_day(&self) -> bool {
        self.is_all_day || (is_midnight(&self.start) && is_midnight(&self.end) && self.end > self.start)
    }

    /// Builder method to set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Builder method to set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Builder method to set the calendar link.
    pub fn with_html_link(mut self, link: impl Into<String>) -> Self {
        self.html_link = Some(link.into());
        self
    }

    /// Builder method to mark the event as all-day.
    pub fn with_all_day(mut self, all_day: bool) -> Self {
        self.is_all_day = all_day;
        self
    }

    /// Builder method to override the multi-day flag.
    pub fn with_multi_day(mut self, multi_day: bool) -> Self {
        self.is_multi_day = multi_day;
        self
    }

    /// Builder method to attribute the event to a source.
    pub fn with_origin(mut self, origin: CalendarSource) -> Self {
        self.origin_calendar = Some(origin);
        self
    }

    /// Builder method to stamp the occurrence.
    pub fn with_occurrence(mut self, occurrence: Occurrence) -> Self {
        self.occurrence = Some(occurrence);
        self
    }
}

/// The events of a single calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayGroup {
    /// The day, serialized as `YYYY-MM-DD`.
    pub day: NaiveDate,
    /// The day's events, ascending by start.
    pub events: Vec<Event>,
}

impl DayGroup {
    /// Creates an empty group for the given day.
    pub fn new(day: NaiveDate) -> Self {
        Self {
            day,
            events: Vec::new(),
        }
    }

    /// The `YYYY-MM-DD` key of this day.
    pub fn day_key(&self) -> String {
        crate::time::day_key(self.day)
    }

    /// Number of events on this day.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if the day holds no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
