//! Error types for bitext library.

use std::io;
use thiserror::Error;

/// Result type alias for bitext operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur around bilingual alignment.
///
/// The alignment engine itself never fails: malformed markup is repaired on a
/// best-effort basis. These errors come from the collaborators around it
/// (fetching, caching, serialization, custom tag catalogs).
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A caller-supplied tag pattern failed to compile.
    #[error("Invalid tag pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(String),

    /// Error during table rendering.
    #[error("Rendering error: {0}")]
    Render(String),

    /// No metadata is known for the language code.
    #[error("Unknown language code: {0}")]
    UnknownLanguage(String),

    /// No fetcher handles the given location.
    #[error("Unsupported document location: {0}")]
    UnsupportedLocation(String),

    /// The foreign document could not be obtained; no alignment is possible.
    #[error("Foreign document unavailable at {location}: {reason}")]
    ForeignUnavailable {
        /// Location that was requested
        location: String,
        /// Underlying failure
        reason: String,
    },

    /// The activation query string is malformed.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Wrap any failure as an unavailable foreign document.
    pub fn unavailable(location: impl Into<String>, reason: impl ToString) -> Self {
        Error::ForeignUnavailable {
            location: location.into(),
            reason: reason.to_string(),
        }
    }

    /// Check whether this error means "no alignment possible".
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Error::ForeignUnavailable { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownLanguage("xx".to_string());
        assert_eq!(err.to_string(), "Unknown language code: xx");

        let err = Error::unavailable("https://de.example.org/wiki/X", "timed out");
        assert_eq!(
            err.to_string(),
            "Foreign document unavailable at https://de.example.org/wiki/X: timed out"
        );
        assert!(err.is_unavailable());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(!err.is_unavailable());
    }
}
