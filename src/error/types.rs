//! Error types
//!
//! Defines the error returned at the storage boundary and the top-level
//! error used by the console and the binary.

use std::fmt;
use std::io;

/// Storage module errors
///
/// Every engine operation reports failure through this type. OS failures
/// keep the underlying `io::Error` so callers can inspect its kind.
#[derive(Debug)]
pub enum StorageError {
    /// The name would resolve outside the root directory.
    PathTraversal(String),
    /// The name is empty or names the root itself where that is not allowed.
    InvalidPath(String),
    /// The operating system rejected the request.
    Filesystem { path: String, source: io::Error },
}

impl StorageError {
    pub(crate) fn filesystem(path: impl Into<String>, source: io::Error) -> Self {
        StorageError::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// Underlying OS error kind, if this is a filesystem failure.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            StorageError::Filesystem { source, .. } => Some(source.kind()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.io_kind() == Some(io::ErrorKind::NotFound)
    }

    pub fn is_already_exists(&self) -> bool {
        self.io_kind() == Some(io::ErrorKind::AlreadyExists)
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::PathTraversal(p) => write!(f, "Path escapes root: {}", p),
            StorageError::InvalidPath(p) => write!(f, "Invalid path: {}", p),
            StorageError::Filesystem { path, source } => {
                write!(f, "Filesystem error on {}: {}", path, source)
            }
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Filesystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// General file manager error that encompasses all error types
#[derive(Debug)]
pub enum ConsoleError {
    Storage(StorageError),
    Config(config::ConfigError),
    IoError(io::Error),
    TaskFailed(String),
}

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsoleError::Storage(e) => write!(f, "Storage error: {}", e),
            ConsoleError::Config(e) => write!(f, "Configuration error: {}", e),
            ConsoleError::IoError(e) => write!(f, "I/O error: {}", e),
            ConsoleError::TaskFailed(e) => write!(f, "Background task failed: {}", e),
        }
    }
}

impl std::error::Error for ConsoleError {}

impl From<StorageError> for ConsoleError {
    fn from(error: StorageError) -> Self {
        ConsoleError::Storage(error)
    }
}

impl From<config::ConfigError> for ConsoleError {
    fn from(error: config::ConfigError) -> Self {
        ConsoleError::Config(error)
    }
}

impl From<io::Error> for ConsoleError {
    fn from(error: io::Error) -> Self {
        ConsoleError::IoError(error)
    }
}

impl From<tokio::task::JoinError> for ConsoleError {
    fn from(error: tokio::task::JoinError) -> Self {
        ConsoleError::TaskFailed(error.to_string())
    }
}
