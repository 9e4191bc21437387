//! Position and Range: line/column addressing for the text buffer
//!
//! Both lines and columns are 1-based, matching the convention of the
//! editing widgets this engine sits behind. Columns count Unicode scalar
//! values; the column just past the last character of a line is
//! `line_len + 1`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A caret position in the document
///
/// The derived ordering compares by line, then column. The log relies on
/// this ordering being total for tie-breaks.
///
/// # Example
///
/// ```rust
/// use coedit_core::text::Position;
///
/// let a = Position::new(2, 5);
/// let b = Position::new(3, 1);
/// assert!(a < b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// 1-based line number
    pub line: u32,

    /// 1-based column number
    pub column: u32,
}

impl Position {
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Start of the document
    pub const fn origin() -> Self {
        Self { line: 1, column: 1 }
    }

    /// Whether both coordinates are 1-based
    pub fn is_valid(&self) -> bool {
        self.line >= 1 && self.column >= 1
    }

    /// Move by signed deltas, clamping each coordinate at 1
    pub fn offset(&self, line_delta: i64, col_delta: i64) -> Self {
        Self {
            line: clamp_coordinate(self.line as i64 + line_delta),
            column: clamp_coordinate(self.column as i64 + col_delta),
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::origin()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

pub(crate) fn clamp_coordinate(value: i64) -> u32 {
    value.clamp(1, u32::MAX as i64) as u32
}

/// A caret (`start == end`) or a selection
///
/// Constructors normalize the endpoints so that `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    /// Create a range, swapping endpoints if they are reversed
    pub fn new(start: Position, end: Position) -> Self {
        if end < start {
            Self {
                start: end,
                end: start,
            }
        } else {
            Self { start, end }
        }
    }

    /// Convenience constructor from raw coordinates
    pub fn from_coords(start_line: u32, start_column: u32, end_line: u32, end_column: u32) -> Self {
        Self::new(
            Position::new(start_line, start_column),
            Position::new(end_line, end_column),
        )
    }

    pub fn caret(position: Position) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn spans_multiple_lines(&self) -> bool {
        self.start.line != self.end.line
    }

    /// Closed-interval overlap: touching ranges intersect
    pub fn intersects(&self, other: &Range) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    pub fn contains(&self, position: Position) -> bool {
        self.start <= position && position <= self.end
    }

    /// Shift both endpoints by the same deltas
    pub fn shift(&self, line_delta: i64, col_delta: i64) -> Self {
        Self::new(
            self.start.offset(line_delta, col_delta),
            self.end.offset(line_delta, col_delta),
        )
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
