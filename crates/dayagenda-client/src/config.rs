//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/dayagenda/config.toml` by default:
//!
//! ```toml
//! events_dir = "/home/me/.local/share/dayagenda/events"
//!
//! [agenda]
//! number_of_days = 5
//! events_limit = 20
//! ignore_events_expression = "standup|lunch"
//! entities = ["calendar.work", { entity = "calendar.home", name = "Home" }]
//!
//! [display]
//! show_location = true
//! ```

use std::path::{Path, PathBuf};

use dayagenda_core::AgendaConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ClientError, ClientResult};

/// Configuration for the dayagenda client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Directory holding one `<entity>.json` file per calendar source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events_dir: Option<PathBuf>,

    /// Debug mode.
    pub debug: bool,

    /// Agenda settings, shared with the pipeline.
    pub agenda: AgendaConfig,

    /// Display settings.
    pub display: DisplaySettings,
}

/// Display settings for text output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Print the event location after the title.
    pub show_location: bool,

    /// Print the calendar name after the title.
    pub show_calendar: bool,

    /// Text to show when there are no events.
    pub no_events_text: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            show_location: false,
            show_calendar: false,
            no_events_text: "No events".to_string(),
        }
    }
}

impl ClientConfig {
    /// Loads configuration from the default path, or defaults if the file
    /// does not exist.
    pub fn load() -> ClientResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            debug!(path = %path.display(), "No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> ClientResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ClientError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ClientError::ParseConfig {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// The events directory: configured value, else the default.
    pub fn events_dir(&self) -> PathBuf {
        self.events_dir
            .clone()
            .unwrap_or_else(Self::default_events_dir)
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("dayagenda")
    }

    /// Returns the default events directory.
    pub fn default_events_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("dayagenda")
            .join("events")
    }
}
