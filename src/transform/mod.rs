//! Transformation Engine
//!
//! Adjusts the coordinates of an incoming remote operation to account for
//! edits its sender had not observed when generating it.
//!
//! # Algorithm
//!
//! Every record in the [`EditOperationLog`] is treated as "replace
//! `source_range` with N lines and a trailing run of M columns". For an
//! incoming operation the engine walks the log in timestamp order, keeping a
//! running position for each endpoint:
//!
//! 1. records authored by the sender are skipped (the sender accounts for
//!    its own history);
//! 2. records the sender had already incorporated (`timestamp <=
//!    known[record.sender]`) are skipped;
//! 3. a record that ends on an earlier line moves the point by its
//!    `line_delta`;
//! 4. a record that ends on the point's line, at or before it, also moves
//!    the column by its column shift. When the record starts exactly at the
//!    point, the earlier `(timestamp, sender)` wins column precedence;
//! 5. a point strictly inside a replaced range collapses to that range's
//!    start.
//!
//! This is sound for edits on disjoint regions and converges for concurrent
//! inserts at the same point. Edits overlapping the exact same range are
//! best-effort only.
//!
//! # Example
//!
//! ```rust
//! use coedit_core::oplog::EditOperationLog;
//! use coedit_core::sync::ParticipantTimestampMap;
//! use coedit_core::text::{AppliedChange, EditOperation, Position, Range};
//! use coedit_core::transform::Transformer;
//!
//! // P1 inserted two lines at line 5
//! let mut log = EditOperationLog::new();
//! log.record("p1", 100, &[AppliedChange {
//!     range: Range::caret(Position::new(5, 1)),
//!     text: "a\nb\n".to_string(),
//!     replaced: String::new(),
//! }]);
//!
//! // P2 had not seen it and edited line 8
//! let incoming = EditOperation::insert(Position::new(8, 1), "x");
//! let known = ParticipantTimestampMap::new();
//! let adjusted = Transformer::new(&log).transform_operation(&incoming, "p2", 150, &known);
//! assert_eq!(adjusted.range.start, Position::new(10, 1));
//! ```

use crate::oplog::{AppliedEditRecord, EditOperationLog};
use crate::sync::ParticipantTimestampMap;
use crate::text::{clamp_coordinate, EditBatch, EditOperation, Position, Range};
use crate::Timestamp;

/// Folds unseen log records into incoming coordinates
#[derive(Debug, Clone, Copy)]
pub struct Transformer<'a> {
    log: &'a EditOperationLog,
}

impl<'a> Transformer<'a> {
    pub fn new(log: &'a EditOperationLog) -> Self {
        Self { log }
    }

    /// Records the sender of an incoming edit could not have seen
    pub fn unseen_records<'b>(
        &'b self,
        sender_id: &'b str,
        known: &'b ParticipantTimestampMap,
    ) -> impl Iterator<Item = &'a AppliedEditRecord> + 'b
    where
        'a: 'b,
    {
        self.log.records().iter().filter(move |record| {
            record.sender_id != sender_id && !known.has_seen(&record.sender_id, record.timestamp)
        })
    }

    /// Transform one incoming operation; its text is unchanged
    pub fn transform_operation(
        &self,
        operation: &EditOperation,
        sender_id: &str,
        timestamp: Timestamp,
        known: &ParticipantTimestampMap,
    ) -> EditOperation {
        EditOperation {
            range: self.transform_range(&operation.range, sender_id, timestamp, known),
            text: operation.text.clone(),
        }
    }

    /// Transform every operation of a batch against the same log snapshot
    ///
    /// None of the batch's own operations are recorded yet, so later
    /// operations never transform against earlier ones.
    pub fn transform_batch(&self, batch: &EditBatch) -> Vec<EditOperation> {
        batch
            .operations
            .iter()
            .map(|op| self.transform_operation(op, &batch.sender_id, batch.timestamp, &batch.known))
            .collect()
    }

    /// Transform a range (edit target or displayed cursor)
    ///
    /// A non-empty range keeps concurrent insertions at its boundaries
    /// outside of itself; a caret uses the timestamp tie-break.
    pub fn transform_range(
        &self,
        range: &Range,
        sender_id: &str,
        timestamp: Timestamp,
        known: &ParticipantTimestampMap,
    ) -> Range {
        let mut start = range.start;
        let mut end = range.end;
        let mut folded = 0usize;

        for record in self.unseen_records(sender_id, known) {
            let (start_first, end_first) = if range.is_empty() {
                let first = record_precedes(record, sender_id, timestamp);
                (first, first)
            } else {
                (true, false)
            };
            start = shift_position(start, record, start_first);
            end = shift_position(end, record, end_first);
            folded += 1;
        }

        // Fast path: nothing upstream moved this range
        if folded == 0 {
            return *range;
        }

        let adjusted = Range::new(start, end);
        tracing::trace!(
            sender = sender_id,
            timestamp,
            folded,
            from = %range,
            to = %adjusted,
            "transformed range"
        );
        adjusted
    }
}

/// Whether `record` sorts before an incoming edit at the same point
///
/// Earlier timestamp wins; equal timestamps fall back to sender id so that
/// every replica picks the same order.
pub fn record_precedes(record: &AppliedEditRecord, sender_id: &str, timestamp: Timestamp) -> bool {
    (record.timestamp, record.sender_id.as_str()) < (timestamp, sender_id)
}

/// Move a position across one applied record
///
/// `record_first` decides the tie when the position sits exactly where the
/// record starts: `true` moves it past the record's replacement text.
pub fn shift_position(position: Position, record: &AppliedEditRecord, record_first: bool) -> Position {
    let start = record.start();
    let end = record.end();

    if position < start || (position == start && !record_first) {
        return position;
    }
    if position < end {
        return start;
    }

    let after = record.end_after();
    if position.line == end.line {
        let column = after.column as i64 + position.column as i64 - end.column as i64;
        Position::new(after.line, clamp_coordinate(column))
    } else {
        position.offset(record.line_delta, 0)
    }
}

/// Move a displayed range across one applied record
///
/// Selections keep boundary insertions outside; a caret sitting exactly at
/// the record's start moves past it only when `caret_follows` is set.
pub fn shift_range(range: &Range, record: &AppliedEditRecord, caret_follows: bool) -> Range {
    if range.is_empty() {
        Range::caret(shift_position(range.start, record, caret_follows))
    } else {
        Range::new(
            shift_position(range.start, record, true),
            shift_position(range.end, record, false),
        )
    }
}
