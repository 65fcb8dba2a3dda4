//! The default command: one pipeline run, printed.

use std::io::Write;

use dayagenda_core::Clock;
use dayagenda_providers::{AgendaResult, JsonDirSource, get_all_events};
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::render::{render_failures, render_json, render_text};

/// Fetches the agenda from the configured events directory.
pub async fn fetch(config: &ClientConfig, clock: &Clock) -> ClientResult<AgendaResult> {
    let source = JsonDirSource::new(config.events_dir());
    debug!(
        events_dir = %source.dir().display(),
        now = %clock.now(),
        "Running agenda"
    );
    Ok(get_all_events(&config.agenda, &source, clock).await?)
}

/// Prints the agenda to stdout; failed sources go to stderr in text mode.
pub async fn show(config: &ClientConfig, clock: &Clock, json: bool) -> ClientResult<()> {
    let result = fetch(config, clock).await?;

    let mut stdout = std::io::stdout().lock();
    if json {
        writeln!(stdout, "{}", render_json(&result)?)?;
    } else {
        write!(stdout, "{}", render_text(&result.events, &config.display))?;
        if !result.failed_events.is_empty() {
            eprint!("{}", render_failures(&result.failed_events));
        }
    }

    Ok(())
}
