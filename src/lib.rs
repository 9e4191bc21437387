//! Coedit Core - Real-time collaborative plain-text sync engine
//!
//! Keeps one plain-text document consistent across several concurrently
//! connected editors, without a central sequencer. It implements:
//! - Line/column positions and a rope-backed text buffer
//! - An ordered, pruned log of applied edits
//! - Positional transformation of concurrent edits and cursors
//! - A per-document session state machine with batching, saves and
//!   lock recovery, plus a tokio driver for it
//! - Presence tracking (online, typing, cursors, colors)
//! - The compact JSON relay protocol
//!
//! Reconciliation is heuristic and best-effort: short bursts of concurrent
//! edits among a few participants converge, pathological overlapping edits
//! may not.
//!
//! # Examples
//!
//! ```rust
//! use coedit_core::{EditOperationLog, EditOperation, ParticipantTimestampMap, Position, Transformer};
//! use coedit_core::text::{AppliedChange, Range};
//!
//! // Alice inserted two lines at the top of the document
//! let mut log = EditOperationLog::new();
//! log.record("alice", 100, &[AppliedChange {
//!     range: Range::caret(Position::new(5, 1)),
//!     text: "one\ntwo\n".to_string(),
//!     replaced: String::new(),
//! }]);
//!
//! // Bob, who had not seen it, typed on line 8
//! let op = EditOperation::insert(Position::new(8, 1), "x");
//! let moved = Transformer::new(&log).transform_operation(&op, "bob", 101, &ParticipantTimestampMap::new());
//! assert_eq!(moved.range.start, Position::new(10, 1));
//! ```

pub mod awareness;
pub mod config;
pub mod error;
pub mod oplog;
pub mod protocol;
pub mod session;
pub mod storage;
pub mod sync;
pub mod text;
pub mod transform;

// Re-exports for convenience
pub use awareness::{PresenceTracker, RemoteParticipant};
pub use config::SessionConfig;
pub use error::{CoeditError, Result};
pub use oplog::{AppliedEditRecord, EditOperationLog};
pub use protocol::{RelayAction, RelayEnvelope, RelayMessage};
pub use session::{
    ApplyMode, EditSession, EditorWidget, RelayLink, SessionDriver, SessionEffect, SessionState,
    WidgetEvent,
};
pub use storage::{DocumentStore, MemoryStore};
pub use sync::{LogicalClock, ParticipantTimestampMap};
pub use text::{EditBatch, EditOperation, Position, Range, TextBuffer};
pub use transform::Transformer;

/// Participant identifier type
pub type ParticipantId = String;

/// Document identifier type
pub type DocumentId = String;

/// Logical timestamp (milliseconds, monotonic per replica)
pub type Timestamp = u64;

/// Fresh random participant id for a new editor connection
pub fn new_participant_id() -> ParticipantId {
    uuid::Uuid::new_v4().to_string()
}
