//! Error types for event source operations.
//!
//! A [`SourceError`] describes why one calendar source could not deliver its
//! events. Such errors never abort a run; the orchestrator records them next
//! to the events of the sources that did succeed.

use std::fmt;
use thiserror::Error;

/// The category of a source error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceErrorKind {
    /// Network error - connection failed, timeout, DNS resolution, etc.
    Network,
    /// The source answered with an error of its own.
    Server,
    /// The payload could not be understood.
    InvalidResponse,
    /// The requested calendar does not exist.
    NotFound,
    /// Local I/O failed while reading the source.
    Io,
    /// The source is not usable as configured.
    Configuration,
    /// Unexpected state inside the source implementation.
    Internal,
}

impl SourceErrorKind {
    /// Returns a stable name for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network_error",
            Self::Server => "server_error",
            Self::InvalidResponse => "invalid_response",
            Self::NotFound => "not_found",
            Self::Io => "io_error",
            Self::Configuration => "configuration_error",
            Self::Internal => "internal_error",
        }
    }
}

impl fmt::Display for SourceErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error that occurred while fetching events from one source.
#[derive(Debug, Error)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
    /// The calendar source the error belongs to.
    source_id: Option<String>,
    #[source]
    cause: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl SourceError {
    /// Creates a new error with the given kind and message.
    pub fn new(kind: SourceErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source_id: None,
            cause: None,
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::Network, message)
    }

    /// Creates a server error.
    pub fn server(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::Server, message)
    }

    /// Creates an invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::InvalidResponse, message)
    }

    /// Creates a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::NotFound, message)
    }

    /// Creates an I/O error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::Io, message)
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::Configuration, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::Internal, message)
    }

    /// Sets the calendar source id.
    pub fn with_source_id(mut self, source_id: impl Into<String>) -> Self {
        self.source_id = Some(source_id.into());
        self
    }

    /// Attaches the underlying cause.
    pub fn with_cause<E>(mut self, cause: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Returns the error kind.
    pub fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the calendar source id, if set.
    pub fn source_id(&self) -> Option<&str> {
        self.source_id.as_deref()
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref source_id) = self.source_id {
            write!(f, "[{}] ", source_id)?;
        }
        write!(f, "{}: {}", self.kind, self.message)?;
        if let Some(ref cause) = self.cause {
            write!(f, " ({})", cause)?;
        }
        Ok(())
    }
}

/// A specialized Result type for source operations.
pub type SourceResult<T> = Result<T, SourceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names() {
        assert_eq!(SourceErrorKind::Network.as_str(), "network_error");
        assert_eq!(SourceErrorKind::InvalidResponse.as_str(), "invalid_response");
        assert_eq!(SourceErrorKind::NotFound.to_string(), "not_found");
    }

    #[test]
    fn constructors() {
        let err = SourceError::not_found("no such calendar");
        assert_eq!(err.kind(), SourceErrorKind::NotFound);
        assert_eq!(err.message(), "no such calendar");
        assert!(err.source_id().is_none());
    }

    #[test]
    fn display_includes_source_and_cause() {
        let cause = std::io::Error::other("disk full");
        let err = SourceError::io("failed to read events")
            .with_source_id("calendar.work")
            .with_cause(cause);
        let display = err.to_string();
        assert!(display.starts_with("[calendar.work] io_error: failed to read events"));
        assert!(display.contains("disk full"));
    }

    #[test]
    fn exposes_cause_as_source() {
        use std::error::Error;
        let err = SourceError::internal("boom").with_cause(std::io::Error::other("inner"));
        assert!(err.source().is_some());
    }
}
