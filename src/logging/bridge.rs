//! tracing integration
//!
//! A `tracing_subscriber` layer that turns each event into a `LogEntry` on a
//! `LogWindowSource`, so application diagnostics show up in the log window.
//! Nothing is written to stdout or to disk.

use std::fmt;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use super::entry::{LogEntry, LogLevel};
use super::source::{is_broadcasting, LogWindowSource};

/// A tracing layer that appends every event to a log source
#[derive(Clone)]
pub struct SourceLayer {
    source: Arc<LogWindowSource>,
}

impl SourceLayer {
    pub fn new(source: Arc<LogWindowSource>) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &Arc<LogWindowSource> {
        &self.source
    }
}

impl<S> Layer<S> for SourceLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        // Events raised by listener code would feed the broadcast that raised them
        if is_broadcasting() {
            return;
        }

        let metadata = event.metadata();
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        self.source.append_entry(LogEntry::with_target(
            LogLevel::from(*metadata.level()),
            metadata.target(),
            visitor.finish(),
        ));
    }
}

/// Collects the message and renders the other fields as `name=value`
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: Vec<String>,
}

impl MessageVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            return self.message;
        }
        let fields = self.fields.join(" ");
        if self.message.is_empty() {
            fields
        } else {
            format!("{} {}", self.message, fields)
        }
    }
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.fields.push(format!("{}={:?}", field.name(), value));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push(format!("{}={:?}", field.name(), value));
        }
    }
}

/// Route tracing events into `source`
///
/// `default_filter` applies unless `RUST_LOG` is set.
pub fn init_tracing(source: Arc<LogWindowSource>, default_filter: &str) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(SourceLayer::new(source))
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const THIS_TARGET: &str = "robots::logging::bridge::tests";

    fn capture<F: FnOnce()>(source: &Arc<LogWindowSource>, f: F) {
        let subscriber = tracing_subscriber::registry().with(SourceLayer::new(Arc::clone(source)));
        tracing::subscriber::with_default(subscriber, f);
    }

    fn messages(source: &LogWindowSource) -> Vec<String> {
        source.all().iter().map(|e| e.message().to_string()).collect()
    }

    #[test]
    fn test_event_level_target_and_message() {
        let source = Arc::new(LogWindowSource::new(10).unwrap());
        capture(&source, || {
            tracing::info!("Starting simulation");
            tracing::error!(target: "robots::config", "Config not found");
        });

        let entries = source.all();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].level(), LogLevel::Info);
        assert_eq!(entries[0].target(), THIS_TARGET);
        assert_eq!(entries[0].message(), "Starting simulation");
        assert_eq!(entries[1].level(), LogLevel::Error);
        assert_eq!(entries[1].target(), "robots::config");
    }

    #[test]
    fn test_multiline_message_stays_one_entry() {
        let source = Arc::new(LogWindowSource::new(10).unwrap());
        capture(&source, || {
            tracing::info!("first line\nsecond line");
            tracing::info!("report:\nstatus  ERROR disk: full");
        });

        let entries = source.all();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message(), "first line\nsecond line");
        assert_eq!(entries[1].level(), LogLevel::Info);
        assert_eq!(entries[1].target(), THIS_TARGET);
        assert_eq!(entries[1].message(), "report:\nstatus  ERROR disk: full");
    }

    #[test]
    fn test_fields_follow_the_message() {
        let source = Arc::new(LogWindowSource::new(10).unwrap());
        capture(&source, || {
            tracing::warn!(faults = 3, name = "slow", "listener trouble");
            tracing::debug!(tick = 5);
        });

        assert_eq!(
            messages(&source),
            vec![
                "listener trouble faults=3 name=\"slow\"".to_string(),
                "tick=5".to_string()
            ]
        );
    }

    #[test]
    fn test_events_from_listeners_are_dropped() {
        let source = Arc::new(LogWindowSource::new(10).unwrap());
        source.register_listener(Arc::new(|| tracing::warn!("nested")));

        capture(&source, || tracing::info!("outer"));

        assert_eq!(messages(&source), vec!["outer".to_string()]);
    }

    #[test]
    fn test_isolated_listener_panic_is_not_logged_back() {
        let source = Arc::new(LogWindowSource::new(10).unwrap());
        source.register_listener(Arc::new(|| panic!("bad")));
        let healthy_calls = Arc::new(AtomicUsize::new(0));
        {
            let healthy_calls = Arc::clone(&healthy_calls);
            source.register_listener(Arc::new(move || {
                healthy_calls.fetch_add(1, Ordering::SeqCst);
            }));
        }

        capture(&source, || source.append(LogLevel::Debug, "one"));

        assert_eq!(source.listener_faults(), 1);
        assert_eq!(healthy_calls.load(Ordering::SeqCst), 1);
        assert_eq!(messages(&source), vec!["one".to_string()]);
    }
}
