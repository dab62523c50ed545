//! Bounded telemetry queue

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Fixed-capacity FIFO shared between the renderer and a drain.
///
/// Pushing never blocks and never fails: when full, the oldest entry is
/// evicted. Telemetry is lossy, drawing is not.
pub struct TelemetryQueue<T> {
    buffer: Mutex<VecDeque<T>>,
    capacity: usize,
    evicted: AtomicU64,
}

impl<T> TelemetryQueue<T> {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            buffer: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
            evicted: AtomicU64::new(0),
        }
    }

    /// Push, returning the evicted entry when the queue was full.
    pub fn push(&self, item: T) -> Option<T> {
        // Poisoning only loses telemetry, so recover the guard.
        let mut buffer = self.buffer.lock().unwrap_or_else(|e| e.into_inner());

        let evicted = if buffer.len() >= self.capacity {
            self.evicted.fetch_add(1, Ordering::Relaxed);
            buffer.pop_front()
        } else {
            None
        };

        buffer.push_back(item);
        evicted
    }

    pub fn pop(&self) -> Option<T> {
        let mut buffer = self.buffer.lock().unwrap_or_else(|e| e.into_inner());
        buffer.pop_front()
    }

    /// Take everything queued, oldest first.
    pub fn drain(&self) -> Vec<T> {
        let mut buffer = self.buffer.lock().unwrap_or_else(|e| e.into_inner());
        buffer.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        let buffer = self.buffer.lock().unwrap_or_else(|e| e.into_inner());
        buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        let buffer = self.buffer.lock().unwrap_or_else(|e| e.into_inner());
        buffer.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn evicted_count(&self) -> u64 {
        self.evicted.load(Ordering::Relaxed)
    }

    pub fn latest(&self) -> Option<T>
    where
        T: Clone,
    {
        let buffer = self.buffer.lock().unwrap_or_else(|e| e.into_inner());
        buffer.back().cloned()
    }
}

impl<T> Default for TelemetryQueue<T> {
    fn default() -> Self {
        Self::new(256)
    }
}
