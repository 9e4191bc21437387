//! Presence and cursor tracking
//!
//! Unlike document edits, presence is ephemeral:
//! - Who is online and who is typing
//! - Cursor positions and selections
//! - A stable display color per participant
//!
//! Key differences from edit sync:
//! - No persistence (in-memory only)
//! - 30-second timeout for offline detection
//! - Last event wins (per-participant timestamps, no transformation history)
//! - Separate relay action (`CURSOR` / `PRESENCE`, never mixed with `EDIT`)

mod palette;
mod state;

pub use palette::{Color, ColorPalette, DEFAULT_PALETTE};
pub use state::{PresenceTracker, RemoteParticipant};

use std::time::Duration;

/// Default timeout for marking participants offline
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Heartbeat interval (announce presence even if nothing changed)
pub const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(10);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_creation() {
        let tracker = PresenceTracker::new("client-1".to_string());
        assert_eq!(tracker.local_id(), "client-1");
        assert!(tracker.is_empty());
        assert!(HEARTBEAT_INTERVAL < DEFAULT_TIMEOUT);
    }
}
