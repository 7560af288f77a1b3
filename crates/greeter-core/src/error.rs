//! Error types for Greeter core operations.
//!
//! Operations never hand these errors back to the caller directly. A
//! `GreetingStore` records each failure in its [`ErrorLog`] and reports a
//! fixed message to the console; [`GreeterError::kind`] selects which one.

use std::fmt;
use std::io;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Result type alias for Greeter operations.
pub type Result<T> = std::result::Result<T, GreeterError>;

/// Core error type for Greeter operations.
#[derive(Debug, Error)]
pub enum GreeterError {
    /// The output stream rejected a write
    #[error("Output error: {0}")]
    Output(#[source] io::Error),

    /// Plaintext exceeds what the asymmetric scheme can seal
    #[error("Message of {len} bytes exceeds the {capacity}-byte capacity of the key")]
    MessageTooLong { len: usize, capacity: usize },

    /// Any other encryption failure
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Writing a document to disk failed
    #[error("Failed to write {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Building the configuration document failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic error (fallback)
    #[error("{0}")]
    Other(String),
}

impl GreeterError {
    /// Classify this error into the recorded taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Output(_) => ErrorKind::OutputFailure,
            Self::MessageTooLong { .. } => ErrorKind::EncryptionFailure,
            Self::Storage { source, .. } => classify_io(source),
            Self::Encryption(_) | Self::Serialization(_) | Self::Other(_) => ErrorKind::Unknown,
        }
    }
}

impl From<toml::ser::Error> for GreeterError {
    fn from(err: toml::ser::Error) -> Self {
        GreeterError::Serialization(err.to_string())
    }
}

/// The kinds of failure a `GreetingStore` records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    OutputFailure,
    EncryptionFailure,
    PathTooLong,
    DirectoryNotFound,
    AccessDenied,
    Unknown,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::OutputFailure => "output failure",
            Self::EncryptionFailure => "encryption failure",
            Self::PathTooLong => "path too long",
            Self::DirectoryNotFound => "directory not found",
            Self::AccessDenied => "access denied",
            Self::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

#[cfg(windows)]
const ERROR_FILENAME_EXCED_RANGE: i32 = 206;

/// Map a file-system error onto the storage failure kinds.
pub fn classify_io(err: &io::Error) -> ErrorKind {
    if let Some(code) = err.raw_os_error() {
        #[cfg(unix)]
        {
            if code == libc::ENAMETOOLONG {
                return ErrorKind::PathTooLong;
            }
            if code == libc::ENOTDIR {
                return ErrorKind::DirectoryNotFound;
            }
            if code == libc::EROFS {
                return ErrorKind::AccessDenied;
            }
        }
        #[cfg(windows)]
        {
            if code == ERROR_FILENAME_EXCED_RANGE {
                return ErrorKind::PathTooLong;
            }
        }
    }

    match err.kind() {
        io::ErrorKind::NotFound => ErrorKind::DirectoryNotFound,
        io::ErrorKind::PermissionDenied => ErrorKind::AccessDenied,
        _ => ErrorKind::Unknown,
    }
}

/// A single failure captured at an operation boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordedError {
    pub kind: ErrorKind,
    /// Name of the operation that failed (e.g. `print_greeting`)
    pub operation: &'static str,
    /// Full detail of the underlying failure
    pub message: String,
}

/// Append-only record of failures owned by a `GreetingStore`.
///
/// Entries are only added by the store that owns the log; there is no way
/// to remove one.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ErrorLog {
    entries: Vec<RecordedError>,
}

impl ErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, operation: &'static str, err: &GreeterError) -> ErrorKind {
        let kind = err.kind();
        self.entries.push(RecordedError {
            kind,
            operation,
            message: err.to_string(),
        });
        kind
    }

    pub fn entries(&self) -> &[RecordedError] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RecordedError> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&RecordedError> {
        self.entries.last()
    }

    /// Number of recorded entries of the given kind.
    pub fn count(&self, kind: ErrorKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }
}

impl<'a> IntoIterator for &'a ErrorLog {
    type Item = &'a RecordedError;
    type IntoIter = std::slice::Iter<'a, RecordedError>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
