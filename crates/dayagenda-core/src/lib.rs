//! Core types: time, events, configuration, filters, day grouping

pub mod agenda;
pub mod config;
pub mod event;
pub mod filter;
pub mod time;
pub mod tracing;

pub use agenda::{apply_limit, build_agenda, group_by_day, sort_events};
pub use config::{
    AgendaConfig, ConfigError, DEFAULT_EVENTS_LIMIT, DEFAULT_NUMBER_OF_DAYS, EntityConfig,
};
pub use event::{CalendarSource, DayGroup, Event, Occurrence};
pub use filter::{EventFilter, FilterReason};
pub use time::{Clock, EventTime, TimeWindow, day_key, is_midnight, start_of_day};
pub use self::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
