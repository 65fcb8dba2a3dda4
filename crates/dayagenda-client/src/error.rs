//! Client error types.

use std::path::PathBuf;

use dayagenda_core::{ConfigError, TracingError};
use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The configuration file could not be read.
    #[error("failed to read config {}: {source}", .path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for this client.
    #[error("failed to parse config {}: {source}", .path.display())]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The agenda settings are invalid.
    #[error("invalid agenda configuration: {0}")]
    Agenda(#[from] ConfigError),

    /// A command-line value could not be used.
    #[error("invalid argument: {0}")]
    Argument(String),

    /// Output could not be produced.
    #[error("failed to render output: {0}")]
    Render(String),

    /// Logging could not be set up.
    #[error(transparent)]
    Tracing(#[from] TracingError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
