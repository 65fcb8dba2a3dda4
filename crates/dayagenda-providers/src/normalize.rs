//! RawEvent to Event conversion.
//!
//! This module turns a source-specific [`RawEvent`] into the canonical
//! [`Event`] the rest of the pipeline works with.
//!
//! The normalization process:
//! 1. Resolves the event identity (`id`, else `uid`)
//! 2. Resolves start and end to instants in the clock's offset
//! 3. Matches the raw back-reference against the configured sources
//! 4. Narrows the bounds to one day when the record is an expanded occurrence

use chrono::{DateTime, Days, FixedOffset, NaiveDate};
use dayagenda_core::{CalendarSource, Clock, Event, EventTime, Occurrence};
use tracing::warn;

use crate::raw_event::RawEvent;

/// Converts a [`RawEvent`] to an [`Event`].
///
/// Returns `None` when the record has neither `id` nor `uid`, or when its
/// times or an occurrence stamp point outside the representable calendar.
pub fn normalize_event(raw: &RawEvent, sources: &[CalendarSource], clock: &Clock) -> Option<Event> {
    let id = raw.event_id()?;
    let tz = clock.timezone();

    let (Some(start), Some(end)) = (
        EventTime::from(raw.start).resolve(tz),
        EventTime::from(raw.end).resolve(tz),
    ) else {
        warn!(event_id = %id, "Event time out of range, skipping");
        return None;
    };
    let is_multi_day = start.date_naive() != end.date_naive();

    let (start, end) = match raw.occurrence {
        Some(occurrence) => match occurrence_bounds(start, end, occurrence, clock) {
            Some(bounds) => bounds,
            None => {
                warn!(
                    event_id = %id,
                    add_days = occurrence.add_days,
                    "Occurrence day out of range, skipping"
                );
                return None;
            }
        },
        None => (start, end),
    };

    let mut event = Event::new(id, start, end)
        .with_all_day(raw.is_all_day())
        .with_multi_day(is_multi_day);

    if let Some(origin) = resolve_origin(raw.entity_id.as_deref(), sources) {
        event = event.with_origin(origin);
    }

    if let Some(ref title) = raw.title {
        event = event.with_title(title);
    }

    if let Some(ref location) = raw.location {
        event = event.with_location(location);
    }

    if let Some(ref html_link) = raw.html_link {
        event = event.with_html_link(html_link);
    }

    if let Some(occurrence) = raw.occurrence {
        event = event.with_occurrence(occurrence);
    }

    Some(event)
}

/// Finds the configured source an event belongs to.
fn resolve_origin(entity_id: Option<&str>, sources: &[CalendarSource]) -> Option<CalendarSource> {
    let entity_id = entity_id?;
    sources.iter().find(|s| s.id == entity_id).cloned()
}

/// Bounds of one day of a multi-day span.
///
/// The first day keeps the original start and the last day keeps the
/// original end; every other edge is a local midnight.
fn occurrence_bounds(
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
    occurrence: Occurrence,
    clock: &Clock,
) -> Option<(DateTime<FixedOffset>, DateTime<FixedOffset>)> {
    let first_day = clock.date_of(&start);
    let day = add_days(first_day, occurrence.add_days)?;

    let occurrence_start = if occurrence.is_first_day() {
        start
    } else {
        clock.start_of_day(day)?
    };

    let occurrence_end = if occurrence.is_last_day() {
        end
    } else {
        clock.start_of_day(add_days(day, 1)?)?
    };

    Some((occurrence_start, occurrence_end))
}

fn add_days(date: NaiveDate, days: u32) -> Option<NaiveDate> {
    date.checked_add_days(Days::new(u64::from(days)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw_event::RawEventTime;

    fn clock() -> Clock {
        Clock::fixed(DateTime::parse_from_rfc3339("2025-02-05T09:00:00+01:00").unwrap())
    }

    fn dt(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn timed(start: &str, end: &str) -> RawEvent {
        RawEvent::new(
            RawEventTime::from_datetime(dt(start)),
            RawEventTime::from_datetime(dt(end)),
        )
    }

    fn sources() -> Vec<CalendarSource> {
        vec![
            CalendarSource::new("calendar.work").with_name("Work"),
            CalendarSource::new("calendar.home"),
        ]
    }

    mod fields {
        use super::*;

        #[test]
        fn maps_all_fields() {
            let raw = timed("2025-02-05T10:00:00+01:00", "2025-02-05T11:00:00+01:00")
                .with_id("evt-1")
                .with_uid("uid-1")
                .with_title("Team Meeting")
                .with_location("Room 101")
                .with_html_link("https://calendar.example.com/evt-1")
                .with_entity("calendar.work");

            let event = normalize_event(&raw, &sources(), &clock()).unwrap();
            assert_eq!(event.id, "evt-1");
            assert_eq!(event.title.as_deref(), Some("Team Meeting"));
            assert_eq!(event.location.as_deref(), Some("Room 101"));
            assert_eq!(
                event.html_link.as_deref(),
                Some("https://calendar.example.com/evt-1")
            );
            assert!(!event.is_all_day);
            assert!(!event.is_multi_day);
            assert!(event.occurrence.is_none());
            let origin = event.origin_calendar.unwrap();
            assert_eq!(origin.display_name(), "Work");
        }

        #[test]
        fn falls_back_to_uid_for_identity() {
            let raw = timed("2025-02-05T10:00:00+01:00", "2025-02-05T11:00:00+01:00")
                .with_uid("uid-only");
            let event = normalize_event(&raw, &sources(), &clock()).unwrap();
            assert_eq!(event.id, "uid-only");
        }

        #[test]
        fn skips_records_without_identity() {
            let raw = timed("2025-02-05T10:00:00+01:00", "2025-02-05T11:00:00+01:00");
            assert!(normalize_event(&raw, &sources(), &clock()).is_none());
        }

        #[test]
        fn unknown_entity_leaves_origin_empty() {
            let raw = timed("2025-02-05T10:00:00+01:00", "2025-02-05T11:00:00+01:00")
                .with_id("evt-1")
                .with_entity("calendar.unknown");
            let event = normalize_event(&raw, &sources(), &clock()).unwrap();
            assert!(event.origin_calendar.is_none());
        }

    }

    mod times {
        use super::*;

        #[test]
        fn resolves_into_clock_offset() {
            let raw = timed("2025-02-05T09:30:00Z", "2025-02-05T10:30:00Z").with_id("evt-1");
            let event = normalize_event(&raw, &[], &clock()).unwrap();
            assert_eq!(event.start, dt("2025-02-05T10:30:00+01:00"));
            assert_eq!(event.start.offset(), &clock().timezone());
        }

        #[test]
        fn offset_shift_can_change_the_day() {
            // 23:30 UTC is already the next day at +01:00.
            let raw = timed("2025-02-05T23:30:00Z", "2025-02-05T23:45:00Z").with_id("late");
            let event = normalize_event(&raw, &[], &clock()).unwrap();
            assert_eq!(event.day(), date(2025, 2, 6));
        }

        #[test]
        fn all_day_resolves_to_local_midnight() {
            let raw = RawEvent::new(
                RawEventTime::from_date(date(2025, 2, 5)),
                RawEventTime::from_date(date(2025, 2, 6)),
            )
            .with_id("holiday");
            let event = normalize_event(&raw, &[], &clock()).unwrap();
            assert!(event.is_all_day);
            assert_eq!(event.start, dt("2025-02-05T00:00:00+01:00"));
            assert_eq!(event.end, dt("2025-02-06T00:00:00+01:00"));
            assert!(event.is_multi_day);
        }

        #[test]
        fn skips_dates_before_the_calendar_start() {
            let raw = RawEvent::new(
                RawEventTime::from_date(NaiveDate::MIN),
                RawEventTime::from_date(date(2025, 2, 6)),
            )
            .with_id("ancient");
            assert!(normalize_event(&raw, &[], &clock()).is_none());
        }

        #[test]
        fn detects_multi_day() {
            let raw = timed("2025-02-05T22:00:00+01:00", "2025-02-06T02:00:00+01:00").with_id("late");
            let event = normalize_event(&raw, &[], &clock()).unwrap();
            assert!(event.is_multi_day);
        }
    }

    mod occurrences {
        use super::*;

        fn trip() -> RawEvent {
            timed("2025-02-05T14:00:00+01:00", "2025-02-07T16:00:00+01:00").with_id("trip")
        }

        #[test]
        fn first_day_keeps_original_start() {
            let raw = trip().as_occurrence(Occurrence::new(0, 3));
            let event = normalize_event(&raw, &[], &clock()).unwrap();
            assert_eq!(event.start, dt("2025-02-05T14:00:00+01:00"));
            assert_eq!(event.end, dt("2025-02-06T00:00:00+01:00"));
            assert_eq!(event.occurrence, Some(Occurrence::new(0, 3)));
            assert!(event.is_multi_day);
        }

        #[test]
        fn middle_day_spans_midnight_to_midnight() {
            let raw = trip().as_occurrence(Occurrence::new(1, 3));
            let event = normalize_event(&raw, &[], &clock()).unwrap();
            assert_eq!(event.start, dt("2025-02-06T00:00:00+01:00"));
            assert_eq!(event.end, dt("2025-02-07T00:00:00+01:00"));
            assert!(event.is_full_day());
        }

        #[test]
        fn last_day_keeps_original_end() {
            let raw = trip().as_occurrence(Occurrence::new(2, 3));
            let event = normalize_event(&raw, &[], &clock()).unwrap();
            assert_eq!(event.start, dt("2025-02-07T00:00:00+01:00"));
            assert_eq!(event.end, dt("2025-02-07T16:00:00+01:00"));
        }
    }
}
