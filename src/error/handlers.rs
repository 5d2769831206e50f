//! Error handlers
//!
//! Logs errors and converts them into process exit codes.

use crate::error::types::{ConsoleError, StorageError};
use log::error;

/// Handle a top-level error
pub fn handle_error(err: &ConsoleError) {
    error!("File manager error: {}", err);
}

/// Convert error to a process exit code
pub fn error_to_exit_code(err: &ConsoleError) -> i32 {
    match err {
        ConsoleError::Config(_) => 78,
        ConsoleError::Storage(StorageError::PathTraversal(_)) => 77,
        ConsoleError::Storage(_) => 74,
        ConsoleError::IoError(_) => 74,
        ConsoleError::TaskFailed(_) => 70,
    }
}
