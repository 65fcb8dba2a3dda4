//! Output rendering: plain text listing and JSON.

use std::fmt::Write as _;

use dayagenda_core::{DayGroup, Event};
use dayagenda_providers::{AgendaResult, FetchFailure};
use serde::Serialize;

use crate::config::DisplaySettings;
use crate::error::{ClientError, ClientResult};

const TIME_FORMAT: &str = "%H:%M";
const DAY_HEADER_FORMAT: &str = "%a %Y-%m-%d";

/// JSON shape of a failed source.
#[derive(Debug, Serialize)]
struct JsonFailure<'a> {
    name: &'a str,
    kind: &'static str,
    error: String,
}

impl<'a> From<&'a FetchFailure> for JsonFailure<'a> {
    fn from(failure: &'a FetchFailure) -> Self {
        Self {
            name: &failure.name,
            kind: failure.error.kind().as_str(),
            error: failure.error.to_string(),
        }
    }
}

/// JSON shape of a whole run.
#[derive(Debug, Serialize)]
struct JsonAgenda<'a> {
    days: &'a [DayGroup],
    failed_events: Vec<JsonFailure<'a>>,
}

/// Renders the agenda as pretty-printed JSON.
pub fn render_json(result: &AgendaResult) -> ClientResult<String> {
    let agenda = JsonAgenda {
        days: &result.events,
        failed_events: result.failed_events.iter().map(JsonFailure::from).collect(),
    };
    serde_json::to_string_pretty(&agenda).map_err(|e| ClientError::Render(e.to_string()))
}

/// Renders the agenda as an indented plain-text listing.
pub fn render_text(groups: &[DayGroup], display: &DisplaySettings) -> String {
    if groups.is_empty() {
        return format!("{}\n", display.no_events_text);
    }

    let mut out = String::new();
    for (i, group) in groups.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "{}", group.day.format(DAY_HEADER_FORMAT));
        for event in &group.events {
            let _ = writeln!(out, "  {}", event_line(event, display));
        }
    }
    out
}

/// Renders failed sources, one per line.
pub fn render_failures(failures: &[FetchFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("warning: could not load {}: {}\n", f.name, f.error))
        .collect()
}

fn event_line(event: &Event, display: &DisplaySettings) -> String {
    let mut line = format!("{:<11}  {}", time_column(event), event.display_title());

    if let Some(occurrence) = event.occurrence {
        let _ = write!(
            line,
            " (day {}/{})",
            occurrence.add_days + 1,
            occurrence.days_long
        );
    }

    if display.show_location
        && let Some(location) = event.location.as_deref().filter(|l| !l.trim().is_empty())
    {
        let _ = write!(line, " @ {location}");
    }

    if display.show_calendar
        && let Some(ref origin) = event.origin_calendar
    {
        let _ = write!(line, " [{}]", origin.display_name());
    }

    line
}

fn time_column(event: &Event) -> String {
    if event.is_full_day() {
        "all day".to_string()
    } else {
        format!(
            "{}-{}",
            event.start.format(TIME_FORMAT),
            event.end.format(TIME_FORMAT)
        )
    }
}
