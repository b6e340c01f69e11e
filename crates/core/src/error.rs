//! Error types for the trade converter.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the trade converter.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (bad directories, zone or flag values).
    #[error("Configuration error: {0}")]
    Config(String),

    /// A single field failed validation.
    #[error("Invalid {field}: '{value}'")]
    InvalidField {
        /// Logical field name.
        field: &'static str,
        /// Raw value that was rejected.
        value: String,
    },

    /// A line of an accepted file could not be turned into a record.
    #[error("Parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number in the source file.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create an invalid field error.
    pub fn invalid_field(field: &'static str, value: impl Into<String>) -> Self {
        Error::InvalidField {
            field,
            value: value.into(),
        }
    }

    /// Create a parse error for a source line.
    pub fn parse(line: usize, msg: impl Into<String>) -> Self {
        Error::Parse {
            line,
            message: msg.into(),
        }
    }

    /// Attach a line number to a field-level error.
    pub fn at_line(self, line: usize) -> Self {
        match self {
            Error::Parse { .. } => self,
            other => Error::parse(line, other.to_string()),
        }
    }

    /// Whether this error should abort the whole run.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}
