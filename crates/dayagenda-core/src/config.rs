//! Agenda configuration.
//!
//! [`AgendaConfig`] is supplied by the host (a TOML file for the CLI, any
//! serde format for embedders) and is read-only for the duration of a run.
//! Field names are snake_case; the camelCase spellings used by dashboard
//! card configurations are accepted as aliases.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::event::CalendarSource;

/// Default number of days in the display window.
pub const DEFAULT_NUMBER_OF_DAYS: u32 = 7;

/// Default maximum number of events shown.
pub const DEFAULT_EVENTS_LIMIT: usize = 99;

/// Errors in a user-supplied configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The window must cover at least one day.
    #[error("number_of_days must be at least 1, got {0}")]
    InvalidNumberOfDays(u32),

    /// No calendar source was configured.
    #[error("at least one calendar entity must be configured")]
    NoEntities,

    /// An entity descriptor had an empty identifier.
    #[error("entity at position {0} has an empty identifier")]
    EmptyEntity(usize),

    /// An ignore expression is not a valid regular expression.
    #[error("invalid {field} pattern {pattern:?}: {source}")]
    InvalidPattern {
        field: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// A calendar entity as written in configuration.
///
/// Either a bare identifier (`"calendar.work"`) or an object
/// (`{ entity = "calendar.work", name = "Work" }`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityConfig {
    /// Bare identifier.
    Id(String),
    /// Identifier with an optional display name.
    Named {
        entity: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
}

impl EntityConfig {
    /// The entity identifier.
    pub fn id(&self) -> &str {
        match self {
            Self::Id(id) => id,
            Self::Named { entity, .. } => entity,
        }
    }
}

impl From<&EntityConfig> for CalendarSource {
    fn from(entity: &EntityConfig) -> Self {
        match entity {
            EntityConfig::Id(id) => CalendarSource::new(id.trim()),
            EntityConfig::Named { entity, name } => CalendarSource {
                id: entity.trim().to_string(),
                name: name.clone(),
            },
        }
    }
}

/// Configuration of one agenda run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgendaConfig {
    /// Days in the window, starting today.
    #[serde(alias = "numberOfDays")]
    pub number_of_days: u32,

    /// Maximum events to show, enforced at day boundaries.
    #[serde(alias = "eventsLimit")]
    pub events_limit: usize,

    /// Hide events that already ended.
    #[serde(alias = "hidePastEvents")]
    pub hide_past_events: bool,

    /// Hide events that ended before today started.
    #[serde(alias = "startFromToday")]
    pub start_from_today: bool,

    /// Split multi-day events into one entry per day.
    #[serde(alias = "showMultiDay")]
    pub show_multi_day: bool,

    /// Case-insensitive pattern; events whose title matches are hidden.
    #[serde(alias = "ignoreEventsExpression")]
    pub ignore_events_expression: String,

    /// Case-insensitive pattern; events whose location matches are hidden.
    #[serde(alias = "ignoreEventsByLocationExpression")]
    pub ignore_events_by_location_expression: String,

    /// Calendar sources, in display priority order.
    pub entities: Vec<EntityConfig>,
}

impl Default for AgendaConfig {
    fn default() -> Self {
        Self {
            number_of_days: DEFAULT_NUMBER_OF_DAYS,
            events_limit: DEFAULT_EVENTS_LIMIT,
            hide_past_events: false,
            start_from_today: false,
            show_multi_day: false,
            ignore_events_expression: String::new(),
            ignore_events_by_location_expression: String::new(),
            entities: Vec::new(),
        }
    }
}

impl AgendaConfig {
    /// Creates a configuration for the given entities with default settings.
    pub fn new(entities: Vec<EntityConfig>) -> Self {
        Self {
            entities,
            ..Default::default()
        }
    }

    /// Builder: set the window size.
    pub fn with_number_of_days(mut self, days: u32) -> Self {
        self.number_of_days = days;
        self
    }

    /// Builder: set the events limit.
    pub fn with_events_limit(mut self, limit: usize) -> Self {
        self.events_limit = limit;
        self
    }

    /// Builder: hide events that already ended.
    pub fn with_hide_past_events(mut self, hide: bool) -> Self {
        self.hide_past_events = hide;
        self
    }

    /// Builder: hide events that ended before today.
    pub fn with_start_from_today(mut self, enabled: bool) -> Self {
        self.start_from_today = enabled;
        self
    }

    /// Builder: expand multi-day events.
    pub fn with_show_multi_day(mut self, enabled: bool) -> Self {
        self.show_multi_day = enabled;
        self
    }

    /// Builder: set the title ignore expression.
    pub fn with_ignore_expression(mut self, pattern: impl Into<String>) -> Self {
        self.ignore_events_expression = pattern.into();
        self
    }

    /// Builder: set the location ignore expression.
    pub fn with_ignore_location_expression(mut self, pattern: impl Into<String>) -> Self {
        self.ignore_events_by_location_expression = pattern.into();
        self
    }

    /// The configured entities as normalized calendar sources.
    pub fn sources(&self) -> Vec<CalendarSource> {
        self.entities.iter().map(CalendarSource::from).collect()
    }

    /// Checks structural constraints.
    ///
    /// Pattern validity is checked when the filter chain is compiled.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.number_of_days < 1 {
            return Err(ConfigError::InvalidNumberOfDays(self.number_of_days));
        }
        if self.entities.is_empty() {
            return Err(ConfigError::NoEntities);
        }
        if let Some(pos) = self.entities.iter().position(|e| e.id().trim().is_empty()) {
            return Err(ConfigError::EmptyEntity(pos));
        }
        Ok(())
    }
}
