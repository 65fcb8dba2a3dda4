//! Event sources and the agenda pipeline.
//!
//! This crate connects calendar sources to the agenda types of
//! `dayagenda-core`:
//!
//! - [`EventSource`] - The capability every calendar backend implements
//! - [`RawEvent`] - Source-agnostic raw event data
//! - [`fetch_all`] - Concurrent fetch across all configured sources
//! - [`get_all_events`] - One full pipeline run
//! - [`SourceError`] - Error type for source operations
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────┐
//! │  calendar.work  │  │  calendar.home  │  │      ...        │
//! └────────┬────────┘  └────────┬────────┘  └────────┬────────┘
//!          │     EventSource::fetch_events (concurrent)│
//!          └───────────────────┬──────────────────────┘
//!                              ▼
//!                       ┌─────────────┐
//!                       │  RawEvent   │──▶ FetchFailure
//!                       └──────┬──────┘
//!                              ▼ dedup_events()
//!                              ▼ normalize_event()
//!                              ▼ EventFilter
//!                              ▼ expand_event()
//!                       ┌─────────────┐
//!                       │  DayGroup   │
//!                       └─────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use dayagenda_core::{AgendaConfig, Clock};
//! use dayagenda_providers::{JsonDirSource, get_all_events};
//!
//! async fn agenda(config: &AgendaConfig) -> Result<(), ConfigError> {
//!     let source = JsonDirSource::new("/var/lib/dayagenda/events");
//!     let result = get_all_events(config, &source, &Clock::system()).await?;
//!     for day in &result.events {
//!         println!("{}: {} events", day.day_key(), day.len());
//!     }
//!     Ok(())
//! }
//! ```

pub mod dedup;
pub mod error;
pub mod expand;
pub mod fetch;
pub mod file;
pub mod normalize;
pub mod pipeline;
pub mod provider;
pub mod raw_event;

// Re-export main types at crate root
pub use dedup::dedup_events;
pub use error::{SourceError, SourceErrorKind, SourceResult};
pub use expand::{days_long, expand_event};
pub use fetch::{FetchFailure, FetchOutcome, fetch_all};
pub use file::JsonDirSource;
pub use normalize::normalize_event;
pub use pipeline::{AgendaResult, get_all_events, process_events};
pub use provider::{BoxFuture, ErrorSource, EventSource, StaticSource};
pub use raw_event::{RawEvent, RawEventTime};
