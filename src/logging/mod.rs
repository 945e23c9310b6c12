//! Logging system for robots
//!
//! An in-memory, fixed-capacity log shared between any number of producer
//! threads and listening consumers, plus the glue that routes `tracing`
//! output into it.

mod bridge;
mod buffer;
mod entry;
mod error;
mod logger;
mod source;

pub use bridge::{init_tracing, SourceLayer};
pub use buffer::CircularLogBuffer;
pub use entry::{LogEntry, LogLevel, DEFAULT_TARGET};
pub use error::LogError;
pub use logger::{Logger, DEFAULT_LOG_CAPACITY};
pub use source::{
    listener_panic_is_isolated, ListenerFaultPolicy, ListenerId, LogChangeListener, LogWindowSource,
};
