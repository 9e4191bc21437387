//! Edit operations and batches
//!
//! An [`EditOperation`] replaces the content addressed by a range with new
//! text. An [`EditBatch`] groups the operations produced by one user input
//! event; its operations are sequential, each one addressing the buffer as
//! left by the previous one.

use super::position::Range;
use crate::sync::ParticipantTimestampMap;
use crate::{ParticipantId, Timestamp};
use serde::{Deserialize, Serialize};

/// Replace `range` with `text`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditOperation {
    pub range: Range,
    pub text: String,
}

impl EditOperation {
    pub fn new(range: Range, text: impl Into<String>) -> Self {
        Self {
            range,
            text: text.into(),
        }
    }

    /// Pure insertion at a caret
    pub fn insert(at: super::Position, text: impl Into<String>) -> Self {
        Self::new(Range::caret(at), text)
    }

    /// Pure deletion of a range
    pub fn delete(range: Range) -> Self {
        Self::new(range, String::new())
    }

    /// Number of line separators in the replacement text
    pub fn inserted_newlines(&self) -> u32 {
        self.text.matches('\n').count() as u32
    }
}

/// One or more operations generated together by a single input event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBatch {
    pub operations: Vec<EditOperation>,

    /// Logical timestamp stamped by the sender
    pub timestamp: Timestamp,

    pub sender_id: ParticipantId,

    /// What the sender had incorporated from every other participant when
    /// the batch was generated
    pub known: ParticipantTimestampMap,
}

impl EditBatch {
    pub fn new(
        sender_id: ParticipantId,
        timestamp: Timestamp,
        operations: Vec<EditOperation>,
        known: ParticipantTimestampMap,
    ) -> Self {
        Self {
            operations,
            timestamp,
            sender_id,
            known,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

/// An operation as it was actually applied to a buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedChange {
    /// Range that was replaced, in the coordinates of the buffer before apply
    pub range: Range,

    /// Replacement text
    pub text: String,

    /// Text that was removed
    pub replaced: String,
}
