//! Application error types.
//!
//! Provides unified error handling with actionable context for debugging.

use thiserror::Error;

/// Application result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types with specific context for actionable debugging
#[derive(Debug, Error)]
pub enum Error {
    /// The reference did not match `<Book> <chapter>:<verse>[-<verse>]`
    #[error("Invalid scripture reference format: {input:?}")]
    InvalidReferenceFormat {
        /// The raw input that failed to parse.
        input: String,
    },

    /// A verse with number 0 or no text
    #[error("Invalid verse {number}: {reason}")]
    InvalidVerse {
        /// The verse number as supplied.
        number: u32,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// A verse source returned no verses for a passage
    #[error("Cannot build slides from an empty verse sequence")]
    EmptyVerseSequence,

    /// Export format key not recognised
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

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

    /// Scripture text provider error with status context
    #[error("Scripture lookup failed: {message}")]
    Scripture {
        /// Human-readable error description.
        message: String,
        /// HTTP status code, if from an HTTP response.
        status: Option<u16>,
        /// Actionable suggestion for resolving the error.
        hint: Option<&'static str>,
    },

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },

    /// File or payload parsing error
    #[error("Parse error in {file:?}: {message}")]
    Parse {
        /// File that failed to parse, if known.
        file: Option<std::path::PathBuf>,
        /// Description of the parse failure.
        message: String,
    },

    /// Export serialization error
    #[error("Export failed: {0}")]
    Export(String),
}

impl Error {
    /// Create an IO error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Io { source, path: path.into() }
    }

    /// Create a scripture provider error without HTTP context
    pub fn scripture(message: impl Into<String>) -> Self {
        Self::Scripture {
            message: message.into(),
            status: None,
            hint: None,
        }
    }

    /// Create a scripture provider error with HTTP status
    pub fn scripture_status(message: impl Into<String>, status: u16) -> Self {
        let hint = match status {
            401 => Some("Check the ESV_API_KEY environment variable"),
            403 => Some("Your ESV API key may lack access to this passage"),
            404 => Some("The requested passage was not found"),
            429 => Some("Rate limited - wait a moment and try again"),
            500..=599 => Some("ESV API server error - try again later"),
            _ => None,
        };
        Self::Scripture {
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

    /// Whether retrying the same request could succeed
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Scripture { status: Some(status), .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

// Convenience conversions
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io { source: e, path: None }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Export(e.to_string())
    }
}
