//! Splitting of multi-day events into one entry per day.
//!
//! With `show_multi_day` enabled, an event crossing a date boundary is listed
//! once per day of its [`days_long`] span. Each day is a fresh [`Event`] normalized
//! from a copy of the raw record stamped with an [`Occurrence`]. Days that
//! start at or after the end of the display window are not produced.

use chrono::Duration;
use dayagenda_core::{AgendaConfig, CalendarSource, Clock, Event, Occurrence, is_midnight};
use tracing::debug;

use crate::normalize::normalize_event;
use crate::raw_event::RawEvent;

/// Number of days an expanded event is listed on.
///
/// Whole elapsed days plus one; an all-day event ending at midnight loses
/// the trailing day. Returns `None` when the end lies before the start.
pub fn days_long(event: &Event) -> Option<u32> {
    if event.end < event.start {
        return None;
    }

    let mut days = (event.end - event.start).num_days() + 1;
    if event.is_all_day && is_midnight(&event.end) {
        days -= 1;
    }
    u32::try_from(days).ok().filter(|&days| days > 0)
}

/// Expands `event` (normalized from `raw`) into its per-day occurrences.
///
/// Single-day events, and every event when `show_multi_day` is off, pass
/// through unchanged.
pub fn expand_event(
    raw: &RawEvent,
    event: Event,
    config: &AgendaConfig,
    sources: &[CalendarSource],
    clock: &Clock,
) -> Vec<Event> {
    if !config.show_multi_day || !event.is_multi_day {
        return vec![event];
    }

    let Some(total_days) = days_long(&event) else {
        return vec![event];
    };

    let window_end = clock.today_start() + Duration::days(i64::from(config.number_of_days));
    let mut occurrences = Vec::new();

    for add_days in 0..total_days {
        let stamped = raw.as_occurrence(Occurrence::new(add_days, total_days));
        let Some(occurrence) = normalize_event(&stamped, sources, clock) else {
            break;
        };
        // Occurrence starts only grow, so nothing later fits either.
        if occurrence.start >= window_end {
            break;
        }
        occurrences.push(occurrence);
    }

    debug!(
        event_id = %event.id,
        days_long = total_days,
        occurrences = occurrences.len(),
        "Expanded multi-day event"
    );
    occurrences
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw_event::RawEventTime;
    use chrono::{DateTime, FixedOffset, NaiveDate};
    use dayagenda_core::EntityConfig;

    fn dt(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn clock() -> Clock {
        Clock::fixed(dt("2025-02-05T09:00:00+01:00"))
    }

    fn config(days: u32) -> AgendaConfig {
        AgendaConfig::new(vec![EntityConfig::Id("calendar.work".into())])
            .with_number_of_days(days)
            .with_show_multi_day(true)
    }

    fn expand(raw: &RawEvent, config: &AgendaConfig) -> Vec<Event> {
        let clock = clock();
        let event = normalize_event(raw, &[], &clock).unwrap();
        expand_event(raw, event, config, &[], &clock)
    }

    fn all_day(start: NaiveDate, end: NaiveDate) -> RawEvent {
        RawEvent::new(RawEventTime::from_date(start), RawEventTime::from_date(end)).with_id("conf")
    }

    fn timed(start: &str, end: &str) -> RawEvent {
        RawEvent::new(
            RawEventTime::from_datetime(dt(start)),
            RawEventTime::from_datetime(dt(end)),
        )
        .with_id("trip")
    }

    mod span {
        use super::*;

        fn span_of(raw: &RawEvent) -> Option<u32> {
            days_long(&normalize_event(raw, &[], &clock()).unwrap())
        }

        #[test]
        fn all_day_end_is_exclusive() {
            assert_eq!(span_of(&all_day(date(2025, 2, 5), date(2025, 2, 8))), Some(3));
        }

        #[test]
        fn overnight_under_a_day_is_one_day() {
            let raw = timed("2025-02-05T22:00:00+01:00", "2025-02-06T02:00:00+01:00");
            assert_eq!(span_of(&raw), Some(1));
        }

        #[test]
        fn counts_whole_elapsed_days() {
            let raw = timed("2025-02-05T10:00:00+01:00", "2025-02-07T09:00:00+01:00");
            assert_eq!(span_of(&raw), Some(2));
            let raw = timed("2025-02-05T20:00:00+01:00", "2025-02-07T00:00:00+01:00");
            assert_eq!(span_of(&raw), Some(2));
        }

        #[test]
        fn timed_midnight_end_keeps_trailing_day() {
            let raw = timed("2025-02-05T00:00:00+01:00", "2025-02-07T00:00:00+01:00");
            assert_eq!(span_of(&raw), Some(3));
        }

        #[test]
        fn inverted_event_has_no_span() {
            let raw = timed("2025-02-07T10:00:00+01:00", "2025-02-05T10:00:00+01:00");
            let event = normalize_event(&raw, &[], &clock()).unwrap();
            assert_eq!(days_long(&event), None);
            assert_eq!(expand_event(&raw, event, &config(7), &[], &clock()).len(), 1);
        }
    }

    mod expansion {
        use super::*;

        #[test]
        fn disabled_passes_through() {
            let raw = all_day(date(2025, 2, 5), date(2025, 2, 8));
            let events = expand(&raw, &config(7).with_show_multi_day(false));
            assert_eq!(events.len(), 1);
            assert!(events[0].occurrence.is_none());
        }

        #[test]
        fn single_day_passes_through() {
            let raw = timed("2025-02-05T10:00:00+01:00", "2025-02-05T11:00:00+01:00");
            let events = expand(&raw, &config(7));
            assert_eq!(events.len(), 1);
            assert!(events[0].occurrence.is_none());
        }

        #[test]
        fn one_event_per_day() {
            let raw = timed("2025-02-05T14:00:00+01:00", "2025-02-07T16:00:00+01:00");
            let events = expand(&raw, &config(7));
            let days: Vec<_> = events.iter().map(Event::day).collect();
            assert_eq!(days, vec![date(2025, 2, 5), date(2025, 2, 6), date(2025, 2, 7)]);
            let stamps: Vec<_> = events.iter().filter_map(|e| e.occurrence).collect();
            assert_eq!(
                stamps,
                vec![
                    Occurrence::new(0, 3),
                    Occurrence::new(1, 3),
                    Occurrence::new(2, 3)
                ]
            );
            assert!(events.iter().all(|e| e.id == "trip" && e.is_multi_day));
        }

        #[test]
        fn last_day_carries_the_remainder() {
            // 44 hours: listed on two days, the second running into day three.
            let raw = timed("2025-02-05T14:00:00+01:00", "2025-02-07T10:00:00+01:00");
            let events = expand(&raw, &config(7));
            let days: Vec<_> = events.iter().map(Event::day).collect();
            assert_eq!(days, vec![date(2025, 2, 5), date(2025, 2, 6)]);
            assert_eq!(events[0].end, dt("2025-02-06T00:00:00+01:00"));
            assert_eq!(events[1].start, dt("2025-02-06T00:00:00+01:00"));
            assert_eq!(events[1].end, dt("2025-02-07T10:00:00+01:00"));
        }

        #[test]
        fn window_bounds_occurrences() {
            // Three all-day days, two-day window: days 0 and 1 only.
            let raw = all_day(date(2025, 2, 5), date(2025, 2, 8));
            let events = expand(&raw, &config(2));
            let stamps: Vec<_> = events.iter().filter_map(|e| e.occurrence).collect();
            assert_eq!(stamps, vec![Occurrence::new(0, 3), Occurrence::new(1, 3)]);

            let window_end = clock().today_start() + Duration::days(2);
            assert!(events.iter().all(|e| e.start < window_end));
        }

        #[test]
        fn past_days_are_still_produced() {
            let raw = all_day(date(2025, 2, 3), date(2025, 2, 6));
            let events = expand(&raw, &config(7));
            assert_eq!(events.len(), 3);
            assert_eq!(events[0].day(), date(2025, 2, 3));
        }
    }
}
