/// Logical clock for edit timestamps
///
/// Timestamps are wall-clock milliseconds, but they are only used for
/// relative ordering. The clock never goes backwards: a tick returns the
/// larger of the wall time and the previous value plus one, and observing a
/// remote timestamp pulls the clock forward so later local edits always sort
/// after everything already incorporated.
use crate::Timestamp;
use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic millisecond clock
#[derive(Debug)]
pub struct LogicalClock {
    value: AtomicU64,
}

impl LogicalClock {
    /// Create a new clock starting at 0
    pub fn new() -> Self {
        Self {
            value: AtomicU64::new(0),
        }
    }

    /// Stamp a new local event at the given wall time
    pub fn tick(&self, wall_millis: Timestamp) -> Timestamp {
        let previous = self
            .value
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
                Some(wall_millis.max(current + 1))
            })
            .unwrap_or_else(|current| current);
        wall_millis.max(previous + 1)
    }

    /// Get current value without advancing
    pub fn current(&self) -> Timestamp {
        self.value.load(Ordering::SeqCst)
    }

    /// Pull the clock forward to a remote timestamp
    /// (never moves it backwards)
    pub fn observe(&self, remote: Timestamp) {
        self.value.fetch_max(remote, Ordering::SeqCst);
    }
}

impl Default for LogicalClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LogicalClock {
    fn clone(&self) -> Self {
        Self {
            value: AtomicU64::new(self.current()),
        }
    }
}
