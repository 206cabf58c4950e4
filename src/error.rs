//! Error handling for the cleaning pipeline.
//!
//! Fatal problems (a missing input file, a malformed CSV, a reference to a
//! column that does not exist) are reported through [`CleanerError`] and stop
//! the run before anything is written. Row-level problems are not errors: they
//! are collected as [`ValueWarning`](crate::cleaner::ValueWarning)s and handled
//! by the configured row policy.
//!
//! ```
//! use student_cleaner::error::CleanerError;
//!
//! fn describe(err: &CleanerError) -> &'static str {
//!     match err {
//!         CleanerError::NotFound(_) => "input missing",
//!         CleanerError::Schema(_) => "bad column reference",
//!         _ => "other failure",
//!     }
//! }
//! ```

use std::fmt;
use std::path::PathBuf;

/// Main error type for pipeline operations.
#[derive(Debug)]
pub enum CleanerError {
    /// Input path does not exist
    NotFound(PathBuf),

    /// Content could not be parsed as delimited tabular data
    Parse(String),

    /// Referenced column is absent, or two names collide after canonicalization
    Schema(String),

    /// Invalid configuration (pattern, date formats, config file)
    Config(String),

    /// Unexpected failure while transforming the frame
    DataProcessing(String),

    /// I/O errors (output not writable, temp file failures)
    Io(std::io::Error),
}

impl fmt::Display for CleanerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "File not found: {}", path.display()),
            Self::Parse(msg) => write!(f, "Parse error: {msg}"),
            Self::Schema(msg) => write!(f, "Schema error: {msg}"),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::DataProcessing(msg) => write!(f, "Data processing error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for CleanerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CleanerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<tempfile::PersistError> for CleanerError {
    fn from(err: tempfile::PersistError) -> Self {
        Self::Io(err.error)
    }
}

impl From<polars::error::PolarsError> for CleanerError {
    fn from(err: polars::error::PolarsError) -> Self {
        Self::DataProcessing(err.to_string())
    }
}

impl From<serde_json::Error> for CleanerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("JSON error: {err}"))
    }
}

impl From<regex::Error> for CleanerError {
    fn from(err: regex::Error) -> Self {
        Self::Config(format!("invalid pattern: {err}"))
    }
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, CleanerError>;

/// Extension trait to add context to results.
///
/// The error kind is preserved so callers can still tell a schema problem
/// from an I/O problem after context has been attached.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<CleanerError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let msg = msg.into();
            match e.into() {
                CleanerError::NotFound(path) => CleanerError::NotFound(path),
                CleanerError::Parse(inner) => CleanerError::Parse(format!("{msg}: {inner}")),
                CleanerError::Schema(inner) => CleanerError::Schema(format!("{msg}: {inner}")),
                CleanerError::Config(inner) => CleanerError::Config(format!("{msg}: {inner}")),
                CleanerError::DataProcessing(inner) => {
                    CleanerError::DataProcessing(format!("{msg}: {inner}"))
                }
                CleanerError::Io(inner) => {
                    CleanerError::Io(std::io::Error::new(inner.kind(), format!("{msg}: {inner}")))
                }
            }
        })
    }
}
