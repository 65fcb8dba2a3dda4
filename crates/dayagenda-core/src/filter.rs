//! The per-event filter chain.
//!
//! Filters run in a fixed order and short-circuit: once an event is
//! rejected, later filters are not evaluated.
//!
//! 1. past events (`hide_past_events`)
//! 2. events that ended before today (`start_from_today`)
//! 3. title pattern (`ignore_events_expression`)
//! 4. location pattern (`ignore_events_by_location_expression`)

use regex::{Regex, RegexBuilder};

use crate::config::{AgendaConfig, ConfigError};
use crate::event::Event;
use crate::time::Clock;

/// Why an event was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterReason {
    /// The event already ended.
    Past,
    /// The event ended before today started.
    BeforeToday,
    /// The title matched the ignore expression.
    IgnoredTitle,
    /// The location matched the location ignore expression.
    IgnoredLocation,
}

impl FilterReason {
    /// Short name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Past => "past",
            Self::BeforeToday => "before_today",
            Self::IgnoredTitle => "ignored_title",
            Self::IgnoredLocation => "ignored_location",
        }
    }
}

/// The compiled filter chain for one run.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    hide_past_events: bool,
    start_from_today: bool,
    ignore_title: Option<Regex>,
    ignore_location: Option<Regex>,
}

impl EventFilter {
    /// Compiles the filter chain from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] if an ignore expression is not
    /// a valid regular expression.
    pub fn from_config(config: &AgendaConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            hide_past_events: config.hide_past_events,
            start_from_today: config.start_from_today,
            ignore_title: compile_pattern(
                "ignore_events_expression",
                &config.ignore_events_expression,
            )?,
            ignore_location: compile_pattern(
                "ignore_events_by_location_expression",
                &config.ignore_events_by_location_expression,
            )?,
        })
    }

    /// Returns the first filter that rejects the event, if any.
    pub fn rejection(&self, event: &Event, clock: &Clock) -> Option<FilterReason> {
        if self.hide_past_events && event.end < clock.now() {
            return Some(FilterReason::Past);
        }

        if self.start_from_today && clock.today_start() > event.end {
            return Some(FilterReason::BeforeToday);
        }

        if let (Some(pattern), Some(title)) = (&self.ignore_title, &event.title)
            && pattern.is_match(title)
        {
            return Some(FilterReason::IgnoredTitle);
        }

        if let (Some(pattern), Some(location)) = (&self.ignore_location, &event.location)
            && pattern.is_match(location)
        {
            return Some(FilterReason::IgnoredLocation);
        }

        None
    }

    /// Returns true if no filter rejects the event.
    pub fn accepts(&self, event: &Event, clock: &Clock) -> bool {
        self.rejection(event, clock).is_none()
    }
}

/// Builds a case-insensitive regex; empty patterns disable the filter.
fn compile_pattern(field: &'static str, pattern: &str) -> Result<Option<Regex>, ConfigError> {
    if pattern.is_empty() {
        return Ok(None);
    }
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map(Some)
        .map_err(|source| ConfigError::InvalidPattern {
            field,
            pattern: pattern.to_string(),
            source,
        })
}
