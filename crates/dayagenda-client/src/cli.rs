//! Command-line interface definition.

use std::path::PathBuf;

use chrono::{DateTime, FixedOffset};
use clap::{Parser, Subcommand};
use dayagenda_core::Clock;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// dayagenda - Your calendars, one day at a time
#[derive(Debug, Parser)]
#[command(name = "dayagenda")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "DAYAGENDA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Directory holding one `<entity>.json` file per calendar
    #[arg(long, env = "DAYAGENDA_EVENTS_DIR")]
    pub events_dir: Option<PathBuf>,

    /// Number of days to show, starting today
    #[arg(long)]
    pub days: Option<u32>,

    /// Maximum number of events to show (whole days only)
    #[arg(long)]
    pub limit: Option<usize>,

    /// Evaluate the agenda at this instant (RFC 3339) instead of now
    #[arg(long)]
    pub now: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Overrides file settings with the flags given on the command line.
    pub fn apply_to(&self, config: &mut ClientConfig) {
        if self.debug {
            config.debug = true;
        }
        if let Some(ref dir) = self.events_dir {
            config.events_dir = Some(dir.clone());
        }
        if let Some(days) = self.days {
            config.agenda.number_of_days = days;
        }
        if let Some(limit) = self.limit {
            config.agenda.events_limit = limit;
        }
    }

    /// The clock for this run: `--now` if given, else the system time.
    pub fn clock(&self) -> ClientResult<Clock> {
        match self.now {
            Some(ref value) => parse_now(value).map(Clock::fixed),
            None => Ok(Clock::system()),
        }
    }
}

fn parse_now(value: &str) -> ClientResult<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value)
        .map_err(|e| ClientError::Argument(format!("--now {value:?} is not RFC 3339: {e}")))
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}
