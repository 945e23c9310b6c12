//! Shared log store with change listeners
//!
//! `LogWindowSource` owns one ring buffer of entries and a registry of
//! listeners. Every append is followed by a payload-free change notification;
//! listeners pull whatever view they need through `all()` or `range()`.
//!
//! The listener registry and the ring buffer use separate locks, and no lock
//! is held while listener code runs, so a listener may read the source (or
//! log to it) from inside its callback.

use std::cell::Cell;
use std::num::NonZeroUsize;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use std::thread::LocalKey;

use serde::{Deserialize, Serialize};

use super::buffer::CircularLogBuffer;
use super::entry::{LogEntry, LogLevel};
use super::error::LogError;

thread_local! {
    /// Set while this thread runs listener callbacks
    static BROADCASTING: Cell<bool> = const { Cell::new(false) };
    /// Set while this thread runs a listener whose panic will be caught
    static ISOLATING: Cell<bool> = const { Cell::new(false) };
}

/// Raises a per-thread flag and restores its previous value on drop
struct FlagGuard {
    flag: &'static LocalKey<Cell<bool>>,
    previous: bool,
}

impl FlagGuard {
    fn raise(flag: &'static LocalKey<Cell<bool>>) -> Self {
        let previous = flag.with(|f| f.replace(true));
        Self { flag, previous }
    }
}

impl Drop for FlagGuard {
    fn drop(&mut self) {
        let previous = self.previous;
        self.flag.with(|f| f.set(previous));
    }
}

/// Whether the current thread is inside a listener broadcast
pub(crate) fn is_broadcasting() -> bool {
    BROADCASTING.with(Cell::get)
}

/// Whether a panic on the current thread will be caught by an isolating broadcast
///
/// Panic hooks use this to stay quiet about listener panics that are only
/// counted.
pub fn listener_panic_is_isolated() -> bool {
    ISOLATING.with(Cell::get)
}

/// Something that wants to know when the log changed
///
/// Implemented for any `Fn() + Send + Sync` closure.
pub trait LogChangeListener: Send + Sync {
    fn on_log_changed(&self);
}

impl<F> LogChangeListener for F
where
    F: Fn() + Send + Sync,
{
    fn on_log_changed(&self) {
        self()
    }
}

/// Handle returned by registration, used to unregister
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// What a broadcast does when a listener panics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListenerFaultPolicy {
    /// Catch the panic, count it, and keep notifying the remaining listeners
    #[default]
    Isolate,
    /// Let the panic unwind into the producer; later listeners are skipped
    Propagate,
}

type ListenerSnapshot = Arc<[Arc<dyn LogChangeListener>]>;

/// Log store shared between producers and listening consumers
pub struct LogWindowSource {
    buffer: CircularLogBuffer<LogEntry>,
    listeners: Mutex<Vec<(ListenerId, Arc<dyn LogChangeListener>)>>,
    /// Immutable copy of `listeners`, `None` after any registration change
    snapshot: RwLock<Option<ListenerSnapshot>>,
    next_listener_id: AtomicU64,
    fault_policy: ListenerFaultPolicy,
    faults: AtomicU64,
}

impl LogWindowSource {
    /// Create a source retaining at most `capacity` entries
    pub fn new(capacity: usize) -> Result<Self, LogError> {
        Self::with_policy(capacity, ListenerFaultPolicy::default())
    }

    /// Create a source with an explicit listener fault policy
    pub fn with_policy(capacity: usize, fault_policy: ListenerFaultPolicy) -> Result<Self, LogError> {
        let capacity = NonZeroUsize::new(capacity).ok_or(LogError::InvalidCapacity(capacity))?;
        Ok(Self {
            buffer: CircularLogBuffer::with_capacity(capacity),
            listeners: Mutex::new(Vec::new()),
            snapshot: RwLock::new(None),
            next_listener_id: AtomicU64::new(1),
            fault_policy,
            faults: AtomicU64::new(0),
        })
    }

    fn lock_listeners(&self) -> MutexGuard<'_, Vec<(ListenerId, Arc<dyn LogChangeListener>)>> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn invalidate_snapshot(&self) {
        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Register a listener; it is notified on every subsequent append
    pub fn register_listener(&self, listener: Arc<dyn LogChangeListener>) -> ListenerId {
        let id = ListenerId(self.next_listener_id.fetch_add(1, Ordering::Relaxed));
        let mut listeners = self.lock_listeners();
        listeners.push((id, listener));
        // Invalidate before releasing the registry so no rebuild can publish
        // a copy that misses this listener
        self.invalidate_snapshot();
        id
    }

    /// Unregister a listener, returning whether it was registered
    pub fn unregister_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.lock_listeners();
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        let removed = listeners.len() != before;
        if removed {
            self.invalidate_snapshot();
        }
        removed
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.lock_listeners().len()
    }

    /// Number of listener panics caught under [`ListenerFaultPolicy::Isolate`]
    pub fn listener_faults(&self) -> u64 {
        self.faults.load(Ordering::Relaxed)
    }

    pub fn fault_policy(&self) -> ListenerFaultPolicy {
        self.fault_policy
    }

    /// Current listener snapshot, rebuilding it if a registration changed
    fn active_listeners(&self) -> ListenerSnapshot {
        if let Some(snapshot) = self
            .snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            return Arc::clone(snapshot);
        }

        let listeners = self.lock_listeners();
        let mut cached = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(snapshot) = cached.as_ref() {
            return Arc::clone(snapshot);
        }
        let snapshot: ListenerSnapshot = listeners
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        *cached = Some(Arc::clone(&snapshot));
        snapshot
    }

    /// Append an entry with the given level and notify listeners
    pub fn append(&self, level: LogLevel, message: impl Into<String>) {
        self.append_entry(LogEntry::new(level, message));
    }

    /// Append a prebuilt entry and notify listeners
    pub fn append_entry(&self, entry: LogEntry) {
        self.buffer.append(entry);
        self.broadcast();
    }

    /// Drop every retained entry and notify listeners
    pub fn clear(&self) {
        self.buffer.clear();
        self.broadcast();
    }

    fn broadcast(&self) {
        let listeners = self.active_listeners();
        let _broadcasting = FlagGuard::raise(&BROADCASTING);
        match self.fault_policy {
            ListenerFaultPolicy::Propagate => {
                // An outer isolating broadcast on this thread may still catch it
                for listener in listeners.iter() {
                    listener.on_log_changed();
                }
            }
            ListenerFaultPolicy::Isolate => {
                for listener in listeners.iter() {
                    let outcome = {
                        let _isolating = FlagGuard::raise(&ISOLATING);
                        panic::catch_unwind(AssertUnwindSafe(|| listener.on_log_changed()))
                    };
                    if let Err(payload) = outcome {
                        let faults = self.faults.fetch_add(1, Ordering::Relaxed) + 1;
                        tracing::warn!(
                            faults,
                            "log listener panicked: {}",
                            panic_message(payload.as_ref())
                        );
                    }
                }
            }
        }
    }

    /// Number of retained entries
    pub fn size(&self) -> usize {
        self.buffer.size()
    }

    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Up to `count` entries starting at the `start_from`-th oldest
    pub fn range(&self, start_from: usize, count: usize) -> Vec<LogEntry> {
        self.buffer.range(start_from, count)
    }

    /// Every retained entry, oldest first
    pub fn all(&self) -> Vec<LogEntry> {
        self.buffer.all()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}
