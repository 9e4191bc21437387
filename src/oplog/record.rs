//! AppliedEditRecord: the positional footprint of one applied operation
//!
//! The transformation engine never looks at edit content, only at where an
//! edit happened and how far it moved the text after it. Each record treats
//! its operation as "replace `source_range` with N new lines and a trailing
//! run of M columns".

use crate::text::{clamp_coordinate, AppliedChange, Position, Range};
use crate::{ParticipantId, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedEditRecord {
    pub sender_id: ParticipantId,
    pub timestamp: Timestamp,
    pub start_line: u32,
    pub start_column: u32,

    /// Newlines introduced minus newlines removed
    pub line_delta: i64,

    /// Width of the replacement text after its last newline
    ///
    /// For text without a newline this is the width of the whole text, not
    /// 0, so that [`end_after`](Self::end_after) can add it to the start
    /// column of a single-line edit.
    pub trailing_column_width: u32,

    /// Replaced range, in the coordinates of the buffer before apply
    pub source_range: Range,
}

impl AppliedEditRecord {
    pub fn from_change(sender_id: &str, timestamp: Timestamp, change: &AppliedChange) -> Self {
        let inserted_newlines = change.text.matches('\n').count() as i64;
        let removed_newlines = (change.range.end.line - change.range.start.line) as i64;
        let trailing = match change.text.rfind('\n') {
            Some(index) => &change.text[index + 1..],
            None => change.text.as_str(),
        };

        Self {
            sender_id: sender_id.to_string(),
            timestamp,
            start_line: change.range.start.line,
            start_column: change.range.start.column,
            line_delta: inserted_newlines - removed_newlines,
            trailing_column_width: trailing.chars().count() as u32,
            source_range: change.range,
        }
    }

    pub fn start(&self) -> Position {
        Position::new(self.start_line, self.start_column)
    }

    pub fn end(&self) -> Position {
        self.source_range.end
    }

    pub fn removed_newlines(&self) -> u32 {
        self.source_range.end.line - self.source_range.start.line
    }

    pub fn inserted_newlines(&self) -> u32 {
        (self.line_delta + self.removed_newlines() as i64).max(0) as u32
    }

    /// Where the end of the replaced range sits once the record is applied
    pub fn end_after(&self) -> Position {
        let inserted = self.inserted_newlines();
        if inserted > 0 {
            Position::new(self.start_line + inserted, self.trailing_column_width + 1)
        } else {
            Position::new(
                self.start_line,
                clamp_coordinate(self.start_column as i64 + self.trailing_column_width as i64),
            )
        }
    }

    /// How far a column to the right of the record's end moves on its line
    ///
    /// Equals `trailing_column_width - replaced width` for single-line edits.
    pub fn column_shift(&self) -> i64 {
        self.end_after().column as i64 - self.source_range.end.column as i64
    }

    /// Whether applying the record moved anything at all
    pub fn is_noop(&self) -> bool {
        self.source_range.is_empty() && self.line_delta == 0 && self.trailing_column_width == 0
    }
}
