//! Raw event type from calendar sources.
//!
//! This module defines [`RawEvent`], the record an event source hands back
//! before normalization. Sources differ in how they spell times, so
//! [`RawEventTime`] accepts the common shapes:
//!
//! - `"2025-02-05T10:00:00+01:00"` - RFC 3339 date-time
//! - `"2025-02-05"` - all-day date
//! - `{"dateTime": "..."}` / `{"date": "..."}` - Google-style objects

use chrono::{DateTime, FixedOffset, NaiveDate};
use dayagenda_core::{EventTime, Occurrence};
use serde::{Deserialize, Serialize};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// The time specification for a raw event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawEventTimeRepr", into = "RawEventTimeRepr")]
pub enum RawEventTime {
    /// A specific instant with its original offset.
    DateTime(DateTime<FixedOffset>),
    /// An all-day event date (no specific time).
    Date(NaiveDate),
}

impl RawEventTime {
    /// Creates a RawEventTime from a datetime.
    pub fn from_datetime(dt: DateTime<FixedOffset>) -> Self {
        Self::DateTime(dt)
    }

    /// Creates a RawEventTime from a date (all-day event).
    pub fn from_date(date: NaiveDate) -> Self {
        Self::Date(date)
    }

    /// Returns true if this is an all-day event time.
    pub fn is_all_day(&self) -> bool {
        matches!(self, Self::Date(_))
    }

    /// Parses either an RFC 3339 date-time or a `YYYY-MM-DD` date.
    pub fn parse(value: &str) -> Result<Self, String> {
        let value = value.trim();
        if let Ok(date) = NaiveDate::parse_from_str(value, DATE_FORMAT) {
            return Ok(Self::Date(date));
        }
        DateTime::parse_from_rfc3339(value)
            .map(Self::DateTime)
            .map_err(|e| format!("invalid event time {value:?}: {e}"))
    }
}

impl From<RawEventTime> for EventTime {
    fn from(raw: RawEventTime) -> Self {
        match raw {
            RawEventTime::DateTime(dt) => EventTime::from_datetime(dt),
            RawEventTime::Date(date) => EventTime::from_date(date),
        }
    }
}

/// Wire shapes accepted for [`RawEventTime`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawEventTimeRepr {
    Text(String),
    Object {
        #[serde(
            rename = "dateTime",
            alias = "date_time",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        date_time: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        date: Option<String>,
    },
}

impl TryFrom<RawEventTimeRepr> for RawEventTime {
    type Error = String;

    fn try_from(repr: RawEventTimeRepr) -> Result<Self, Self::Error> {
        match repr {
            RawEventTimeRepr::Text(value) => Self::parse(&value),
            RawEventTimeRepr::Object {
                date_time: Some(value),
                ..
            } => DateTime::parse_from_rfc3339(value.trim())
                .map(Self::DateTime)
                .map_err(|e| format!("invalid dateTime {value:?}: {e}")),
            RawEventTimeRepr::Object {
                date: Some(value), ..
            } => NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
                .map(Self::Date)
                .map_err(|e| format!("invalid date {value:?}: {e}")),
            RawEventTimeRepr::Object { .. } => {
                Err("event time needs either `dateTime` or `date`".to_string())
            }
        }
    }
}

impl From<RawEventTime> for RawEventTimeRepr {
    fn from(time: RawEventTime) -> Self {
        match time {
            RawEventTime::DateTime(dt) => Self::Text(dt.to_rfc3339()),
            RawEventTime::Date(date) => Self::Text(date.format(DATE_FORMAT).to_string()),
        }
    }
}

/// A raw calendar event from a source.
///
/// Only `start` and `end` are required on the wire. An event needs an `id`
/// or a `uid` to be processed; records with neither are skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvent {
    /// Identifier of the event within its source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Globally unique identifier (iCalendar UID), shared across sources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,

    /// When the event starts.
    pub start: RawEventTime,

    /// When the event ends.
    pub end: RawEventTime,

    /// The event title.
    #[serde(default, alias = "summary", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// The event location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// A direct link to the event in the calendar UI.
    #[serde(default, alias = "htmlLink", skip_serializing_if = "Option::is_none")]
    pub html_link: Option<String>,

    /// Back-reference to the calendar source that produced the event.
    #[serde(default, alias = "entity", skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,

    /// Which day of a multi-day span this record stands for; set only by
    /// the expander, never read from input.
    #[serde(skip)]
    pub occurrence: Option<Occurrence>,
}

impl RawEvent {
    /// Creates a new raw event with the minimum required fields.
    pub fn new(start: RawEventTime, end: RawEventTime) -> Self {
        Self {
            id: None,
            uid: None,
            start,
            end,
            title: None,
            location: None,
            html_link: None,
            entity_id: None,
            occurrence: None,
        }
    }

    /// The key used to detect duplicates: `uid` if present, else `id`.
    pub fn dedup_key(&self) -> Option<&str> {
        non_empty(&self.uid).or_else(|| non_empty(&self.id))
    }

    /// The identifier the normalized event carries: `id` if present, else
    /// `uid`.
    pub fn event_id(&self) -> Option<&str> {
        non_empty(&self.id).or_else(|| non_empty(&self.uid))
    }

    /// Returns true if this is an all-day event.
    pub fn is_all_day(&self) -> bool {
        self.start.is_all_day()
    }

    /// Builder method to set the source id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Builder method to set the UID.
    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = Some(uid.into());
        self
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

    /// Builder method to set the HTML link.
    pub fn with_html_link(mut self, html_link: impl Into<String>) -> Self {
        self.html_link = Some(html_link.into());
        self
    }

    /// Builder method to set the source back-reference.
    pub fn with_entity(mut self, entity_id: impl Into<String>) -> Self {
        self.entity_id = Some(entity_id.into());
        self
    }

    /// Returns a copy stamped as one day of an expanded span.
    pub fn as_occurrence(&self, occurrence: Occurrence) -> Self {
        Self {
            occurrence: Some(occurrence),
            ..self.clone()
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
