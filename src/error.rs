//! Error types for the synchronization engine
//!
//! Every failure inside a running session is handled locally by the session
//! controller; these errors surface from the lower layers (buffer, wire
//! decoding, persistence) and from direct API misuse.

use crate::text::{Position, Range};
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, CoeditError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoeditError {
    /// Line and column are 1-based; zero is never valid
    #[error("invalid position {line}:{column} (line and column are 1-based)")]
    InvalidPosition { line: u32, column: u32 },

    /// Range does not address text inside the buffer
    #[error("range {range} out of bounds (buffer has {line_count} lines)")]
    RangeOutOfBounds { range: Range, line_count: usize },

    /// Position does not address text inside the buffer
    #[error("position {position} out of bounds (buffer has {line_count} lines)")]
    PositionOutOfBounds {
        position: Position,
        line_count: usize,
    },

    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    /// Batch already applied (at-least-once delivery)
    #[error("duplicate batch from {sender} at {timestamp}")]
    DuplicateBatch { sender: String, timestamp: u64 },

    /// Local edits are rejected outside the Active state
    #[error("document is read-only while session is {state}")]
    ReadOnly { state: String },

    #[error("persistence error: {0}")]
    Persistence(String),

    #[error("session closed")]
    SessionClosed,

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for CoeditError {
    fn from(err: serde_json::Error) -> Self {
        CoeditError::Serialization(err.to_string())
    }
}
