//! Event source backed by JSON files on disk.
//!
//! Each calendar source id maps to `<dir>/<source id>.json`, a JSON array of
//! raw events. Files are read on every fetch; nothing is cached.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use dayagenda_core::{EventTime, TimeWindow};
use tracing::debug;

use crate::error::{SourceError, SourceResult};
use crate::provider::{BoxFuture, EventSource};
use crate::raw_event::RawEvent;

/// Reads raw events from a directory of JSON files.
#[derive(Debug, Clone)]
pub struct JsonDirSource {
    dir: PathBuf,
}

impl JsonDirSource {
    /// Creates a source reading from `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory events are read from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding the events of `source_id`.
    pub fn path_for(&self, source_id: &str) -> PathBuf {
        self.dir.join(format!("{source_id}.json"))
    }

    async fn read_events(&self, source_id: &str, window: &TimeWindow) -> SourceResult<Vec<RawEvent>> {
        if source_id.contains(['/', '\\']) {
            return Err(SourceError::configuration("source id must not contain path separators")
                .with_source_id(source_id));
        }

        let path = self.path_for(source_id);
        let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
            let error = if e.kind() == ErrorKind::NotFound {
                SourceError::not_found(format!("no events file at {}", path.display()))
            } else {
                SourceError::io(format!("failed to read {}", path.display()))
            };
            error.with_source_id(source_id).with_cause(e)
        })?;

        let events: Vec<RawEvent> = serde_json::from_str(&content).map_err(|e| {
            SourceError::invalid_response(format!("malformed events file {}", path.display()))
                .with_source_id(source_id)
                .with_cause(e)
        })?;

        let total = events.len();
        let tz = *window.start.offset();
        let in_window: Vec<RawEvent> = events
            .into_iter()
            .filter(|raw| {
                match (
                    EventTime::from(raw.start).resolve(tz),
                    EventTime::from(raw.end).resolve(tz),
                ) {
                    (Some(start), Some(end)) => window.overlaps(&start, &end),
                    _ => false,
                }
            })
            .collect();

        debug!(
            path = %path.display(),
            total = total,
            in_window = in_window.len(),
            "Read events file"
        );
        Ok(in_window)
    }
}

impl EventSource for JsonDirSource {
    fn name(&self) -> &str {
        "json-dir"
    }

    fn fetch_events<'a>(
        &'a self,
        source_id: &'a str,
        window: &'a TimeWindow,
    ) -> BoxFuture<'a, SourceResult<Vec<RawEvent>>> {
        Box::pin(self.read_events(source_id, window))
    }
}
