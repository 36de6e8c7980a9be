//! Application error types.
//!
//! Provides unified error handling with actionable context for debugging.

use thiserror::Error;

/// Application result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types with specific context for actionable debugging
#[derive(Debug, Error)]
pub enum Error {
    /// IO error with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// The underlying IO error.
        source: std::io::Error,
        /// File path where the error occurred, if known.
        path: Option<std::path::PathBuf>,
    },

    /// Network error (connection, timeout, DNS)
    #[error("Network error: {0}")]
    Network(String),

    /// alquran.cloud API error with status context
    #[error("Quran API error: {message}")]
    Api {
        /// Human-readable error description.
        message: String,
        /// HTTP status code, if from an HTTP response.
        status: Option<u16>,
        /// Actionable suggestion for resolving the error.
        hint: Option<&'static str>,
    },

    /// The API answered but the requested surah, ayah or edition does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },

    /// Payload parsing error
    #[error("Parse error in {file:?}: {message}")]
    Parse {
        /// File that failed to parse, if known.
        file: Option<std::path::PathBuf>,
        /// Description of the parse failure.
        message: String,
    },

    /// Local persistence error (favorites or cache store)
    #[error("Storage error for '{key}': {message}")]
    Storage {
        /// Store key that was being read or written.
        key: String,
        /// Description of the failure.
        message: String,
    },

    /// Clipboard access error
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// Generic message error (escape hatch)
    #[error("{0}")]
    Msg(String),
}

impl Error {
    /// Create an API error with HTTP status and a matching hint
    pub fn api_status(message: impl Into<String>, status: u16) -> Self {
        let hint = match status {
            400 => Some("Check the edition identifier in QURANFLOW_EDITION"),
            429 => Some("Rate limited - wait a moment and try again"),
            500..=599 => Some("alquran.cloud server error - try again later"),
            _ => None,
        };
        Self::Api {
            message: message.into(),
            status: Some(status),
            hint,
        }
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }

    /// Create a parse error with file context
    pub fn parse(message: impl Into<String>, file: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Parse { file: file.into(), message: message.into() }
    }

    /// Create a storage error for a store key
    pub fn storage(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Storage { key: key.into(), message: message.into() }
    }

    /// Whether this error means "the remote has no such resource" rather than
    /// "the request could not be completed".
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

// Convenience conversions
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io { source: e, path: None }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Self::Msg(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Self::Msg(s.to_string())
    }
}
