//! Removal of events reported by more than one source.
//!
//! The same meeting often shows up in several calendars (the organizer's and
//! each attendee's). Records are keyed by `uid` when present, else by `id`;
//! the first record of each key wins, so source order decides which copy is
//! kept.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::raw_event::RawEvent;

/// Drops every record whose key was already seen, preserving order.
///
/// Records with neither `uid` nor `id` cannot be keyed and are dropped.
pub fn dedup_events(events: Vec<RawEvent>) -> Vec<RawEvent> {
    let input_count = events.len();
    let mut seen: HashSet<String> = HashSet::with_capacity(input_count);
    let mut unique = Vec::with_capacity(input_count);

    for event in events {
        let Some(key) = event.dedup_key() else {
            warn!(
                entity_id = event.entity_id.as_deref().unwrap_or("-"),
                title = event.title.as_deref().unwrap_or("-"),
                "Skipping event without id or uid"
            );
            continue;
        };

        if seen.insert(key.to_string()) {
            unique.push(event);
        }
    }

    debug!(
        input = input_count,
        unique = unique.len(),
        "Deduplicated events"
    );
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw_event::RawEventTime;
    use chrono::DateTime;

    fn raw() -> RawEvent {
        let start = DateTime::parse_from_rfc3339("2025-02-05T10:00:00+01:00").unwrap();
        RawEvent::new(
            RawEventTime::from_datetime(start),
            RawEventTime::from_datetime(start),
        )
    }

    fn keys(events: &[RawEvent]) -> Vec<&str> {
        events.iter().filter_map(RawEvent::dedup_key).collect()
    }

    #[test]
    fn shared_uid_across_sources_keeps_first() {
        let events = vec![
            raw().with_id("a-1").with_uid("meeting@example.com").with_entity("calendar.work"),
            raw().with_id("b-7").with_uid("meeting@example.com").with_entity("calendar.home"),
        ];
        let unique = dedup_events(events);
        assert_eq!(unique.len(), 1);
        assert_eq!(unique[0].entity_id.as_deref(), Some("calendar.work"));
    }

    #[test]
    fn falls_back_to_id() {
        let events = vec![raw().with_id("x"), raw().with_id("y"), raw().with_id("x")];
        let unique = dedup_events(events);
        assert_eq!(keys(&unique), vec!["x", "y"]);
    }

    #[test]
    fn empty_uid_uses_id() {
        let events = vec![raw().with_id("x").with_uid(""), raw().with_id("x")];
        assert_eq!(dedup_events(events).len(), 1);
    }

    #[test]
    fn drops_unkeyed_records() {
        let events = vec![raw(), raw().with_id("x"), raw()];
        let unique = dedup_events(events);
        assert_eq!(keys(&unique), vec!["x"]);
    }

    #[test]
    fn idempotent_and_never_grows() {
        let events = vec![
            raw().with_uid("u1"),
            raw().with_id("i1"),
            raw().with_uid("u1").with_id("i2"),
            raw().with_id("i1"),
            raw().with_uid("u2"),
        ];
        let input_len = events.len();
        let once = dedup_events(events);
        assert!(once.len() <= input_len);

        let twice = dedup_events(once.clone());
        assert_eq!(once, twice);

        let mut unique_keys = keys(&once);
        unique_keys.sort_unstable();
        unique_keys.dedup();
        assert_eq!(unique_keys.len(), once.len());
    }
}
