//! The agenda pipeline entry point.
//!
//! ```text
//! fetch_all ──▶ dedup ──▶ normalize ──▶ filter ──▶ expand ──▶ sort/group/limit
//! ```
//!
//! Only fetching is asynchronous. Everything after it is a deterministic
//! function of the raw events, the configuration and the clock, exposed
//! separately as [`process_events`].

use dayagenda_core::{AgendaConfig, Clock, ConfigError, DayGroup, EventFilter, build_agenda};
use tracing::{debug, info};

use crate::dedup::dedup_events;
use crate::expand::expand_event;
use crate::fetch::{FetchFailure, fetch_all};
use crate::normalize::normalize_event;
use crate::provider::EventSource;
use crate::raw_event::RawEvent;

/// The result of one pipeline run.
#[derive(Debug, Default)]
pub struct AgendaResult {
    /// Events grouped by day, ascending.
    pub events: Vec<DayGroup>,
    /// Sources that could not be fetched.
    pub failed_events: Vec<FetchFailure>,
}

impl AgendaResult {
    /// Total number of events across all days.
    pub fn event_count(&self) -> usize {
        self.events.iter().map(DayGroup::len).sum()
    }
}

/// Runs the whole pipeline once.
///
/// # Errors
///
/// Returns a [`ConfigError`] before any source is contacted when the
/// configuration is invalid. Source failures are not errors; they are
/// reported in [`AgendaResult::failed_events`].
pub async fn get_all_events(
    config: &AgendaConfig,
    source: &dyn EventSource,
    clock: &Clock,
) -> Result<AgendaResult, ConfigError> {
    config.validate()?;
    let filter = EventFilter::from_config(config)?;

    let window = clock.day_window(config.number_of_days);
    let outcome = fetch_all(&config.sources(), source, &window).await;

    let events = process_events(outcome.events, config, &filter, clock);
    let result = AgendaResult {
        events,
        failed_events: outcome.failed_events,
    };

    info!(
        days = result.events.len(),
        events = result.event_count(),
        failed_sources = result.failed_events.len(),
        "Agenda ready"
    );
    Ok(result)
}

/// Turns fetched raw events into the final day groups.
pub fn process_events(
    raw_events: Vec<RawEvent>,
    config: &AgendaConfig,
    filter: &EventFilter,
    clock: &Clock,
) -> Vec<DayGroup> {
    let sources = config.sources();
    let unique = dedup_events(raw_events);

    let mut events = Vec::with_capacity(unique.len());
    for raw in &unique {
        let Some(event) = normalize_event(raw, &sources, clock) else {
            continue;
        };

        if let Some(reason) = filter.rejection(&event, clock) {
            debug!(event_id = %event.id, reason = reason.as_str(), "Filtered out event");
            continue;
        }

        events.extend(expand_event(raw, event, config, &sources, clock));
    }

    debug!(
        unique = unique.len(),
        kept = events.len(),
        "Processed events"
    );
    build_agenda(events, config.events_limit)
}
