//! Fixed-capacity ring buffer
//!
//! Stores the most recent N items in insertion order. When full, the oldest
//! item is overwritten. Every operation runs under a single mutex; reads copy
//! items out so callers hold a snapshot that later evictions cannot touch.

use std::num::NonZeroUsize;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use super::error::LogError;

/// Slot storage and bookkeeping, only ever touched under the buffer lock
struct Ring<T> {
    slots: Box<[Option<T>]>,
    /// Slot of the oldest retained item
    start: usize,
    /// Slot the next append writes to
    end: usize,
    size: usize,
}

impl<T> Ring<T> {
    fn new(capacity: NonZeroUsize) -> Self {
        Self {
            slots: (0..capacity.get()).map(|_| None).collect(),
            start: 0,
            end: 0,
            size: 0,
        }
    }

    fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn push(&mut self, item: T) {
        let capacity = self.capacity();
        if self.size == capacity {
            // Full: end == start, so the write below overwrites the oldest slot
            self.start = (self.start + 1) % capacity;
            self.size -= 1;
        }
        self.slots[self.end] = Some(item);
        self.end = (self.end + 1) % capacity;
        self.size += 1;
    }

    fn pop_front(&mut self) -> Option<T> {
        if self.size == 0 {
            return None;
        }
        let item = self.slots[self.start].take();
        self.start = (self.start + 1) % self.capacity();
        self.size -= 1;
        item
    }

    fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.start = 0;
        self.end = 0;
        self.size = 0;
    }
}

impl<T: Clone> Ring<T> {
    fn copy_range(&self, start_from: usize, count: usize) -> Vec<T> {
        if start_from >= self.size {
            return Vec::new();
        }
        let count = count.min(self.size - start_from);
        let capacity = self.capacity();
        let mut index = (self.start + start_from) % capacity;
        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            if let Some(item) = &self.slots[index] {
                items.push(item.clone());
            }
            index = (index + 1) % capacity;
        }
        items
    }
}

/// Thread-safe, overwrite-on-full ring buffer
///
/// `append` never fails: a full buffer evicts its oldest item. Indices passed
/// to [`range`](Self::range) are relative to the oldest item currently
/// retained, not to an absolute sequence number.
pub struct CircularLogBuffer<T> {
    ring: Mutex<Ring<T>>,
    not_empty: Condvar,
    not_full: Condvar,
}

impl<T> CircularLogBuffer<T> {
    /// Create a buffer holding at most `capacity` items
    ///
    /// A capacity of zero is rejected rather than clamped.
    pub fn new(capacity: usize) -> Result<Self, LogError> {
        NonZeroUsize::new(capacity)
            .map(Self::with_capacity)
            .ok_or(LogError::InvalidCapacity(capacity))
    }

    /// Create a buffer from a capacity already known to be positive
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            ring: Mutex::new(Ring::new(capacity)),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Ring<T>> {
        self.ring.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append an item at the logical end, evicting the oldest item if full
    pub fn append(&self, item: T) {
        let mut ring = self.lock();
        ring.push(item);
        self.not_empty.notify_one();
    }

    /// Number of items currently retained
    pub fn size(&self) -> usize {
        self.lock().size
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn capacity(&self) -> usize {
        self.lock().capacity()
    }

    /// Discard every retained item; capacity is unchanged
    pub fn clear(&self) {
        let mut ring = self.lock();
        ring.clear();
        self.not_full.notify_all();
    }

    /// Remove and return the oldest item, waiting up to `timeout` for one
    ///
    /// Returns `None` if the buffer stays empty for the whole timeout,
    /// including when a concurrent `clear` empties it again.
    pub fn take_timeout(&self, timeout: Duration) -> Option<T> {
        let ring = self.lock();
        let (mut ring, _) = self
            .not_empty
            .wait_timeout_while(ring, timeout, |ring| ring.size == 0)
            .unwrap_or_else(PoisonError::into_inner);
        let item = ring.pop_front();
        if item.is_some() {
            self.not_full.notify_one();
        }
        item
    }
}

impl<T: Clone> CircularLogBuffer<T> {
    /// Copy out up to `count` items starting at the `start_from`-th oldest
    ///
    /// Returns an empty vector when `start_from` is past the retained items.
    pub fn range(&self, start_from: usize, count: usize) -> Vec<T> {
        self.lock().copy_range(start_from, count)
    }

    /// Copy out every retained item, oldest first
    pub fn all(&self) -> Vec<T> {
        let ring = self.lock();
        ring.copy_range(0, ring.size)
    }
}
