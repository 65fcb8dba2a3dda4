//! Concurrent fetching from every configured calendar source.
//!
//! One call is issued per source and all calls run at once; the orchestrator
//! waits for every call to settle. A failing source never affects the
//! others: its error is recorded as a [`FetchFailure`] and the run goes on
//! with whatever the remaining sources returned.

use dayagenda_core::{CalendarSource, TimeWindow};
use futures_util::future::join_all;
use tracing::{debug, info, warn};

use crate::error::SourceError;
use crate::provider::EventSource;
use crate::raw_event::RawEvent;

/// A source that could not deliver its events.
#[derive(Debug)]
pub struct FetchFailure {
    /// Display name of the source.
    pub name: String,
    /// What went wrong.
    pub error: SourceError,
}

/// Everything a fetch round produced.
#[derive(Debug, Default)]
pub struct FetchOutcome {
    /// Raw events of all successful sources, in source order.
    pub events: Vec<RawEvent>,
    /// One entry per failed source, in source order.
    pub failed_events: Vec<FetchFailure>,
}

/// Fetches events for every source within `window`.
///
/// Events that carry no back-reference are tagged with the id of the source
/// that returned them.
pub async fn fetch_all(
    sources: &[CalendarSource],
    event_source: &dyn EventSource,
    window: &TimeWindow,
) -> FetchOutcome {
    debug!(
        backend = event_source.name(),
        sources = sources.len(),
        start = %window.start_iso(),
        end = %window.end_iso(),
        "Fetching events"
    );

    let calls = sources
        .iter()
        .map(|source| event_source.fetch_events(&source.id, window));
    let results = join_all(calls).await;

    let mut outcome = FetchOutcome::default();

    for (source, result) in sources.iter().zip(results) {
        match result {
            Ok(mut events) => {
                for event in &mut events {
                    if event.entity_id.is_none() {
                        event.entity_id = Some(source.id.clone());
                    }
                }

                info!(
                    source = %source.id,
                    event_count = events.len(),
                    "Fetched events"
                );
                outcome.events.extend(events);
            }
            Err(e) => {
                warn!(
                    source = %source.id,
                    error = %e,
                    "Failed to fetch events"
                );
                outcome.failed_events.push(FetchFailure {
                    name: source.display_name().to_string(),
                    error: e,
                });
            }
        }
    }

    outcome
}
