//! Errors raised by the log subsystem

use thiserror::Error;

/// Log subsystem error
///
/// Only construction can fail; reads and appends are total.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogError {
    #[error("log buffer capacity must be at least 1, got {0}")]
    InvalidCapacity(usize),

    #[error("a process-wide default logger is already installed")]
    GlobalAlreadyInstalled,
}
