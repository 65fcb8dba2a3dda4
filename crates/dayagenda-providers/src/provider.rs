//! EventSource trait definition.
//!
//! This module defines the [`EventSource`] trait, the capability the fetch
//! orchestrator calls once per configured calendar. A source answers with the
//! raw events of one calendar inside a time window, or with a
//! [`SourceError`].
//!
//! Two small implementations live here as well:
//! - [`StaticSource`]: serves events held in memory
//! - [`ErrorSource`]: always fails, for tests and broken setups

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use dayagenda_core::TimeWindow;

use crate::error::{SourceError, SourceResult};
use crate::raw_event::RawEvent;

/// A boxed future for async trait methods.
///
/// Boxed futures keep the trait object-safe, so the orchestrator can work
/// with `&dyn EventSource`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A capability that fetches raw events for one calendar source.
///
/// # Implementation Notes
///
/// - Implementations should be `Send + Sync`; the orchestrator issues all
///   calls concurrently against one shared instance
/// - Failures are reported per call and never abort the other calls
/// - Returned events do not need an `entity_id`; the orchestrator tags them
///   with `source_id` when it is missing
///
/// # Example Implementation
///
/// ```ignore
/// struct HttpSource {
///     base_url: String,
/// }
///
/// impl EventSource for HttpSource {
///     fn name(&self) -> &str { "http" }
///
///     fn fetch_events<'a>(
///         &'a self,
///         source_id: &'a str,
///         window: &'a TimeWindow,
///     ) -> BoxFuture<'a, SourceResult<Vec<RawEvent>>> {
///         Box::pin(async move {
///             let url = format!(
///                 "{}/calendars/{source_id}?start={}&end={}",
///                 self.base_url,
///                 window.start_iso(),
///                 window.end_iso()
///             );
///             // ...
///             Ok(events)
///         })
///     }
/// }
/// ```
pub trait EventSource: Send + Sync {
    /// Returns the name/type of this source (e.g., "static", "json-dir").
    fn name(&self) -> &str;

    /// Fetches the raw events of calendar `source_id` that fall inside
    /// `window`.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` when the calendar cannot be read.
    fn fetch_events<'a>(
        &'a self,
        source_id: &'a str,
        window: &'a TimeWindow,
    ) -> BoxFuture<'a, SourceResult<Vec<RawEvent>>>;
}

/// A source serving events held in memory, keyed by calendar id.
///
/// Events are returned as stored; the window is not applied.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    calendars: HashMap<String, Vec<RawEvent>>,
}

impl StaticSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to register the events of one calendar.
    pub fn with_calendar(mut self, source_id: impl Into<String>, events: Vec<RawEvent>) -> Self {
        self.calendars.insert(source_id.into(), events);
        self
    }
}

impl EventSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch_events<'a>(
        &'a self,
        source_id: &'a str,
        _window: &'a TimeWindow,
    ) -> BoxFuture<'a, SourceResult<Vec<RawEvent>>> {
        let result = self.calendars.get(source_id).cloned().ok_or_else(|| {
            SourceError::not_found("calendar is not registered").with_source_id(source_id)
        });
        Box::pin(async move { result })
    }
}

/// A source that always returns an error.
///
/// This is useful for testing or as a placeholder when a real source fails
/// to initialize.
#[derive(Debug)]
pub struct ErrorSource {
    name: String,
    error: SourceError,
}

impl ErrorSource {
    /// Creates a new error source.
    pub fn new(name: impl Into<String>, error: SourceError) -> Self {
        Self {
            name: name.into(),
            error,
        }
    }
}

impl EventSource for ErrorSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch_events<'a>(
        &'a self,
        source_id: &'a str,
        _window: &'a TimeWindow,
    ) -> BoxFuture<'a, SourceResult<Vec<RawEvent>>> {
        // The boxed cause cannot be cloned, so only kind and message carry over.
        let error =
            SourceError::new(self.error.kind(), self.error.message()).with_source_id(source_id);
        Box::pin(async move { Err(error) })
    }
}
