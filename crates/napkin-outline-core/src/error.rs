//! Error types for the napkin outline.

use std::path::PathBuf;

use crate::object::ObjectId;

/// Result type alias for outline operations.
pub type Result<T> = std::result::Result<T, OutlineError>;

/// Errors that can occur in the outline.
///
/// Visibility queries never fail; these cover document edits against
/// unknown handles, filter patterns and configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum OutlineError {
    /// The object handle does not refer to a live object.
    #[error("Unknown or removed object {0:?}")]
    UnknownObject(ObjectId),

    /// A text filter pattern is not a valid regular expression.
    #[error("Invalid filter pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// File I/O error.
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration could not be parsed.
    #[error("Invalid configuration{}: {message}", location(.path))]
    ConfigParse {
        path: Option<PathBuf>,
        message: String,
    },
}

fn location(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!(" in '{}'", path.display()),
        None => String::new(),
    }
}

impl OutlineError {
    /// Create an invalid pattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration parse error.
    pub fn config_parse(path: Option<PathBuf>, message: impl Into<String>) -> Self {
        Self::ConfigParse {
            path,
            message: message.into(),
        }
    }
}
