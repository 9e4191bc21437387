//! TextBuffer: the live replica of the document
//!
//! Backed by a rope (ropey crate) so that line/column lookups and
//! replacements stay cheap on large documents. Only `\n` is treated as a
//! line separator; ropey is built without CR or Unicode line-break support
//! so its line indexing agrees with splitting the text on `\n`.

use super::operation::{AppliedChange, EditOperation};
use super::position::{Position, Range};
use crate::error::{CoeditError, Result};
use ropey::Rope;

/// Line/column addressable text buffer
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    rope: Rope,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Full document text
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Number of lines; an empty buffer has one empty line
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Total number of chars in the buffer
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Character width of a 1-based line, excluding its separator
    pub fn line_len(&self, line: u32) -> Option<usize> {
        if line == 0 || line as usize > self.line_count() {
            return None;
        }
        let slice = self.rope.line(line as usize - 1);
        let mut len = slice.len_chars();
        if len > 0 && slice.char(len - 1) == '\n' {
            len -= 1;
        }
        Some(len)
    }

    /// Range covering the whole document
    pub fn full_range(&self) -> Range {
        let last_line = self.line_count() as u32;
        let last_len = self.line_len(last_line).unwrap_or(0) as u32;
        Range::new(Position::origin(), Position::new(last_line, last_len + 1))
    }

    pub fn is_valid_position(&self, position: Position) -> bool {
        if !position.is_valid() {
            return false;
        }
        match self.line_len(position.line) {
            Some(len) => position.column as usize <= len + 1,
            None => false,
        }
    }

    pub fn is_valid_range(&self, range: &Range) -> bool {
        range.start <= range.end
            && self.is_valid_position(range.start)
            && self.is_valid_position(range.end)
    }

    /// Convert a position to a char index into the rope
    pub fn char_index(&self, position: Position) -> Result<usize> {
        if !position.is_valid() {
            return Err(CoeditError::InvalidPosition {
                line: position.line,
                column: position.column,
            });
        }
        if !self.is_valid_position(position) {
            return Err(CoeditError::PositionOutOfBounds {
                position,
                line_count: self.line_count(),
            });
        }
        let line_start = self.rope.line_to_char(position.line as usize - 1);
        Ok(line_start + position.column as usize - 1)
    }

    /// Convert a char index back to a position (clamped to the buffer end)
    pub fn position_of(&self, char_index: usize) -> Position {
        let index = char_index.min(self.rope.len_chars());
        let line = self.rope.char_to_line(index);
        let column = index - self.rope.line_to_char(line);
        Position::new(line as u32 + 1, column as u32 + 1)
    }

    /// Text addressed by a range
    pub fn slice(&self, range: &Range) -> Result<String> {
        let (start, end) = self.char_bounds(range)?;
        Ok(self.rope.slice(start..end).to_string())
    }

    /// Replace the addressed range with the operation's text
    ///
    /// # Errors
    ///
    /// Returns [`CoeditError::RangeOutOfBounds`] when the range does not
    /// address text inside the buffer; the buffer is left untouched.
    pub fn apply(&mut self, operation: &EditOperation) -> Result<AppliedChange> {
        let (start, end) = self.char_bounds(&operation.range)?;
        let replaced = self.rope.slice(start..end).to_string();

        if end > start {
            self.rope.remove(start..end);
        }
        if !operation.text.is_empty() {
            self.rope.insert(start, &operation.text);
        }

        Ok(AppliedChange {
            range: operation.range,
            text: operation.text.clone(),
            replaced,
        })
    }

    /// Replace the whole document (used by reloads)
    pub fn replace_all(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
    }

    fn char_bounds(&self, range: &Range) -> Result<(usize, usize)> {
        if !self.is_valid_range(range) {
            return Err(CoeditError::RangeOutOfBounds {
                range: *range,
                line_count: self.line_count(),
            });
        }
        Ok((self.char_index(range.start)?, self.char_index(range.end)?))
    }
}

impl std::fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.rope)
    }
}
