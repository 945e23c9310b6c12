//! Logger facade
//!
//! `Logger` is a cheap handle over one shared `LogWindowSource`. Producers get
//! a clone injected; `Logger::global()` keeps a single default per process for
//! code that has no handle at hand.

use std::num::NonZeroUsize;
use std::sync::{Arc, OnceLock};

use super::entry::LogLevel;
use super::error::LogError;
use super::source::LogWindowSource;

/// Capacity of the process-wide default source
pub const DEFAULT_LOG_CAPACITY: NonZeroUsize = match NonZeroUsize::new(100) {
    Some(capacity) => capacity,
    None => unreachable!(),
};

static GLOBAL: OnceLock<Logger> = OnceLock::new();

/// Severity-tagged writer over a shared log source
#[derive(Clone)]
pub struct Logger {
    source: Arc<LogWindowSource>,
}

impl Logger {
    /// Wrap an existing source
    pub fn new(source: Arc<LogWindowSource>) -> Self {
        Self { source }
    }

    /// Create a logger over a fresh source with the given capacity
    pub fn with_capacity(capacity: usize) -> Result<Self, LogError> {
        Ok(Self::new(Arc::new(LogWindowSource::new(capacity)?)))
    }

    /// The process-wide default logger
    ///
    /// Created on first use with [`DEFAULT_LOG_CAPACITY`] unless
    /// [`install_global`](Self::install_global) ran first.
    pub fn global() -> &'static Logger {
        GLOBAL.get_or_init(|| {
            let source = LogWindowSource::new(DEFAULT_LOG_CAPACITY.get())
                .unwrap_or_else(|_| unreachable!("default capacity is non-zero"));
            Logger::new(Arc::new(source))
        })
    }

    /// Make `logger` the process-wide default
    ///
    /// Fails once a default exists, whether installed or created by `global()`.
    pub fn install_global(logger: Logger) -> Result<&'static Logger, LogError> {
        GLOBAL
            .set(logger)
            .map_err(|_| LogError::GlobalAlreadyInstalled)?;
        Ok(Self::global())
    }

    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    /// Append a message with an explicit level
    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        self.source.append(level, message);
    }

    /// The source this logger writes to, for listener registration and reads
    pub fn default_source(&self) -> &Arc<LogWindowSource> {
        &self.source
    }
}
