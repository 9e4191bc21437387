//! Causality tracking for edits
//!
//! - [`LogicalClock`]: monotonic millisecond timestamps for local edits
//! - [`ParticipantTimestampMap`]: per-participant "last incorporated" marks
//!   shipped with every batch

mod clock;
mod timestamps;

pub use clock::LogicalClock;
pub use timestamps::ParticipantTimestampMap;

/// Current wall-clock time in milliseconds since the Unix epoch
pub fn wall_clock_millis() -> crate::Timestamp {
    chrono::Utc::now().timestamp_millis().max(0) as crate::Timestamp
}
