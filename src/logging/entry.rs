//! Log entry value types
//!
//! A `LogEntry` is immutable once built: the buffer hands out clones, never
//! references into its slots.

use std::fmt;

use chrono::{DateTime, Utc};

/// Target recorded for entries that were not produced through `tracing`
pub const DEFAULT_TARGET: &str = "robots";

/// Severity tag carried by every entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Get the display name for this level
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    /// Check if this level is a warning or error
    pub fn is_alert(&self) -> bool {
        matches!(self, LogLevel::Warn | LogLevel::Error)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<tracing::Level> for LogLevel {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::ERROR => LogLevel::Error,
            tracing::Level::WARN => LogLevel::Warn,
            tracing::Level::INFO => LogLevel::Info,
            tracing::Level::DEBUG => LogLevel::Debug,
            tracing::Level::TRACE => LogLevel::Trace,
        }
    }
}

/// A single log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    timestamp: DateTime<Utc>,
    level: LogLevel,
    target: String,
    message: String,
}

impl LogEntry {
    /// Create an entry stamped with the current time and the default target
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self::with_target(level, DEFAULT_TARGET, message)
    }

    /// Create an entry attributed to a specific target (usually a module path)
    pub fn with_target(
        level: LogLevel,
        target: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            target: target.into(),
            message: message.into(),
        }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// When the entry was captured
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:5} {}: {}",
            self.timestamp.format("%H:%M:%S%.3f"),
            self.level.as_str(),
            self.target,
            self.message
        )
    }
}
