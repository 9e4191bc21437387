//! Text model: positions, ranges, edit operations and the live buffer
//!
//! # Example
//!
//! ```rust
//! use coedit_core::text::{EditOperation, Position, TextBuffer};
//!
//! let mut buffer = TextBuffer::from_text("line1\nline2");
//! buffer
//!     .apply(&EditOperation::insert(Position::new(2, 1), "> "))
//!     .unwrap();
//! assert_eq!(buffer.text(), "line1\n> line2");
//! ```

mod buffer;
mod operation;
mod position;

pub use buffer::TextBuffer;
pub use operation::{AppliedChange, EditBatch, EditOperation};
pub use position::{Position, Range};

pub(crate) use position::clamp_coordinate;
