//! Ordering, day grouping and the events limit.
//!
//! The limit is enforced per day, never per event: a day is either shown
//! completely or not at all. Days are accumulated until the running total
//! reaches the limit; the day that reaches it is still shown whole and every
//! later day is dropped.

use tracing::debug;

use crate::event::{DayGroup, Event};

/// Sorts events ascending by start instant.
///
/// The sort is stable: events starting at the same instant keep their
/// relative order.
pub fn sort_events(events: &mut [Event]) {
    events.sort_by(|a, b| a.start.cmp(&b.start));
}

/// Groups consecutive events that start on the same calendar date.
///
/// Expects events already sorted; day order follows the input.
pub fn group_by_day(events: Vec<Event>) -> Vec<DayGroup> {
    let mut groups: Vec<DayGroup> = Vec::new();

    for event in events {
        let day = event.day();
        match groups.last_mut() {
            Some(group) if group.day == day => group.events.push(event),
            _ => {
                let mut group = DayGroup::new(day);
                group.events.push(event);
                groups.push(group);
            }
        }
    }

    groups
}

/// Limit enforcement state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LimitState {
    /// Days are still being taken.
    Accumulating { total: usize },
    /// The limit was reached; all further days are dropped.
    Maxed,
}

/// Keeps whole days until the cumulative event count reaches `limit`.
pub fn apply_limit(groups: Vec<DayGroup>, limit: usize) -> Vec<DayGroup> {
    let mut state = LimitState::Accumulating { total: 0 };
    let mut kept = Vec::with_capacity(groups.len());

    for group in groups {
        let LimitState::Accumulating { total } = state else {
            debug!(day = %group.day, events = group.len(), "Dropping day past events limit");
            continue;
        };

        let total = total + group.len();
        kept.push(group);

        state = if total >= limit {
            LimitState::Maxed
        } else {
            LimitState::Accumulating { total }
        };
    }

    kept
}

/// Sorts, groups and limits events into the final agenda.
pub fn build_agenda(mut events: Vec<Event>, limit: usize) -> Vec<DayGroup> {
    sort_events(&mut events);
    let groups = group_by_day(events);
    let day_count = groups.len();
    let agenda = apply_limit(groups, limit);
    debug!(
        days = day_count,
        kept_days = agenda.len(),
        limit = limit,
        "Built agenda"
    );
    agenda
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};

    fn at(d: u32, h: u32, min: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(7200)
            .unwrap()
            .with_ymd_and_hms(2025, 2, d, h, min, 0)
            .unwrap()
    }

    fn event(id: &str, d: u32, h: u32) -> Event {
        Event::new(id, at(d, h, 0), at(d, h + 1, 0))
    }

    fn ids(groups: &[DayGroup]) -> Vec<Vec<&str>> {
        groups
            .iter()
            .map(|g| g.events.iter().map(|e| e.id.as_str()).collect())
            .collect()
    }

    fn groups_of(sizes: &[usize]) -> Vec<DayGroup> {
        sizes
            .iter()
            .enumerate()
            .map(|(i, &n)| {
                let day = i as u32 + 1;
                let mut group = DayGroup::new(NaiveDate::from_ymd_opt(2025, 2, day).unwrap());
                for k in 0..n {
                    group.events.push(event(&format!("d{day}-{k}"), day, 8 + k as u32));
                }
                group
            })
            .collect()
    }

    mod sorting {
        use super::*;

        #[test]
        fn ascending_by_start() {
            let mut events = vec![event("c", 6, 9), event("a", 5, 8), event("b", 5, 12)];
            sort_events(&mut events);
            let order: Vec<_> = events.iter().map(|e| e.id.as_str()).collect();
            assert_eq!(order, ["a", "b", "c"]);
        }

        #[test]
        fn stable_for_equal_starts() {
            let mut events = vec![
                event("late", 5, 15),
                event("first", 5, 9),
                event("second", 5, 9),
                event("third", 5, 9),
            ];
            sort_events(&mut events);
            let order: Vec<_> = events.iter().map(|e| e.id.as_str()).collect();
            assert_eq!(order, ["first", "second", "third", "late"]);

            for pair in events.windows(2) {
                assert!(pair[0].start <= pair[1].start);
            }
        }
    }

    mod grouping {
        use super::*;

        #[test]
        fn groups_by_start_date() {
            let events = vec![event("a", 5, 8), event("b", 5, 12), event("c", 7, 9)];
            let groups = group_by_day(events);

            assert_eq!(groups.len(), 2);
            assert_eq!(groups[0].day_key(), "2025-02-05");
            assert_eq!(groups[1].day_key(), "2025-02-07");
            assert_eq!(ids(&groups), vec![vec!["a", "b"], vec!["c"]]);
        }

        #[test]
        fn uses_local_date_of_start() {
            // 00:30 local on the 6th is still the 5th in UTC
            let late = Event::new("late", at(5, 23, 30), at(6, 0, 0));
            let early = Event::new("early", at(6, 0, 30), at(6, 1, 0));
            let groups = group_by_day(vec![late, early]);
            assert_eq!(groups.len(), 2);
            assert_eq!(groups[1].day_key(), "2025-02-06");
        }

        #[test]
        fn empty_input() {
            assert!(group_by_day(Vec::new()).is_empty());
        }
    }

    mod limit {
        use super::*;

        #[test]
        fn reaching_limit_exactly_drops_following_days() {
            let kept = apply_limit(groups_of(&[2, 1]), 2);
            assert_eq!(kept.len(), 1);
            assert_eq!(kept[0].len(), 2);
        }

        #[test]
        fn overflowing_day_is_kept_whole() {
            let kept = apply_limit(groups_of(&[1, 3, 2]), 2);
            assert_eq!(kept.len(), 2);
            assert_eq!(kept[1].len(), 3);
        }

        #[test]
        fn under_limit_keeps_everything() {
            let kept = apply_limit(groups_of(&[1, 1, 1]), 99);
            assert_eq!(kept.len(), 3);
        }

        #[test]
        fn zero_limit_keeps_first_day_only() {
            let kept = apply_limit(groups_of(&[2, 2]), 0);
            assert_eq!(kept.len(), 1);
        }

        #[test]
        fn cutoff_is_day_atomic() {
            let sizes = [3, 1, 4, 1, 5];
            let originals = groups_of(&sizes);
            for limit in 0..16 {
                let kept = apply_limit(groups_of(&sizes), limit);

                // Kept days are whole and form a prefix
                for (k, o) in kept.iter().zip(&originals) {
                    assert_eq!(k, o);
                }

                // No kept day follows a day that already reached the limit
                let mut total = 0;
                for (i, group) in kept.iter().enumerate() {
                    if i > 0 {
                        assert!(total < limit, "limit {limit}: day {i} kept after max");
                    }
                    total += group.len();
                }
            }
        }
    }

    #[test]
    fn build_agenda_sorts_groups_and_limits() {
        let events = vec![
            event("d2", 6, 9),
            event("d1-b", 5, 11),
            event("d1-a", 5, 9),
            event("d3", 7, 9),
        ];
        let agenda = build_agenda(events, 3);
        assert_eq!(ids(&agenda), vec![vec!["d1-a", "d1-b"], vec!["d2"]]);
    }
}
