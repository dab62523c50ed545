//! Most-recent-wins readout

use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

/// Holds the line currently shown to the user. Each update replaces the
/// previous one; nothing is queued.
#[derive(Debug, Default)]
pub struct DisplaySink {
    current: RwLock<Option<String>>,
    updates: AtomicU64,
}

impl DisplaySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&self, line: impl Into<String>) {
        *self.current.write() = Some(line.into());
        self.updates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn latest(&self) -> Option<String> {
        self.current.read().clone()
    }

    pub fn update_count(&self) -> u64 {
        self.updates.load(Ordering::Relaxed)
    }

    pub fn clear(&self) {
        *self.current.write() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_line_wins() {
        let display = DisplaySink::new();
        assert_eq!(display.latest(), None);

        display.show("first");
        display.show("second");

        assert_eq!(display.latest().as_deref(), Some("second"));
        assert_eq!(display.update_count(), 2);

        display.clear();
        assert_eq!(display.latest(), None);
    }
}
