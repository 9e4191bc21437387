//! Wire DTOs for relay payloads
//!
//! Field names are deliberately compact to keep per-keystroke traffic small.
//! The compact shape is confined to this module: the rest of the crate
//! works with [`EditBatch`], [`Range`] and friends, and crosses the boundary
//! only through [`to_wire`] / [`from_wire`].
//!
//! ```text
//! EditBatchDto = { q: [ { c: [ { r: RangeDto, t: text } ], t: timestamp, k?: known } ], t: timestamp }
//! RangeDto     = { sL, sC, eL, eC }
//! ```

use crate::error::{CoeditError, Result};
use crate::sync::ParticipantTimestampMap;
use crate::text::{EditBatch, EditOperation, Position, Range};
use crate::Timestamp;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeDto {
    #[serde(rename = "sL")]
    pub start_line: u32,
    #[serde(rename = "sC")]
    pub start_column: u32,
    #[serde(rename = "eL")]
    pub end_line: u32,
    #[serde(rename = "eC")]
    pub end_column: u32,
}

impl RangeDto {
    /// Convert to a domain range, rejecting 0-based coordinates
    pub fn to_range(&self) -> Result<Range> {
        let start = Position::new(self.start_line, self.start_column);
        let end = Position::new(self.end_line, self.end_column);
        for position in [start, end] {
            if !position.is_valid() {
                return Err(CoeditError::Protocol(format!(
                    "range coordinate {} is not 1-based",
                    position
                )));
            }
        }
        Ok(Range::new(start, end))
    }
}

impl From<Range> for RangeDto {
    fn from(range: Range) -> Self {
        Self {
            start_line: range.start.line,
            start_column: range.start.column,
            end_line: range.end.line,
            end_column: range.end.column,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeDto {
    #[serde(rename = "r")]
    pub range: RangeDto,
    #[serde(rename = "t")]
    pub text: String,
}

/// One queued batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchDto {
    #[serde(rename = "c")]
    pub changes: Vec<ChangeDto>,
    #[serde(rename = "t")]
    pub timestamp: Timestamp,
    #[serde(
        rename = "k",
        default,
        skip_serializing_if = "ParticipantTimestampMap::is_empty"
    )]
    pub known: ParticipantTimestampMap,
}

/// Payload of an `EDIT` relay message: every batch queued since the last
/// flush, in generation order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditBatchDto {
    #[serde(rename = "q")]
    pub queue: Vec<BatchDto>,
    /// When the queue was flushed
    #[serde(rename = "t")]
    pub timestamp: Timestamp,
}

/// Payload of a `CURSOR` relay message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorDto {
    #[serde(rename = "r")]
    pub ranges: Vec<RangeDto>,
    #[serde(rename = "t")]
    pub timestamp: Timestamp,
    #[serde(
        rename = "k",
        default,
        skip_serializing_if = "ParticipantTimestampMap::is_empty"
    )]
    pub known: ParticipantTimestampMap,
}

impl CursorDto {
    pub fn to_ranges(&self) -> Result<Vec<Range>> {
        self.ranges.iter().map(RangeDto::to_range).collect()
    }
}

/// Payload of a `PRESENCE` relay message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceDto {
    pub online: bool,
    #[serde(default)]
    pub typing: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Payload of a `SAVED` relay message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedDto {
    #[serde(rename = "t")]
    pub timestamp: Timestamp,
    /// What the saved snapshot had incorporated from each participant
    #[serde(
        rename = "k",
        default,
        skip_serializing_if = "ParticipantTimestampMap::is_empty"
    )]
    pub known: ParticipantTimestampMap,
}

/// Domain batches to wire shape
pub fn to_wire(batches: &[EditBatch], flushed_at: Timestamp) -> EditBatchDto {
    EditBatchDto {
        queue: batches
            .iter()
            .map(|batch| BatchDto {
                changes: batch
                    .operations
                    .iter()
                    .map(|op| ChangeDto {
                        range: op.range.into(),
                        text: op.text.clone(),
                    })
                    .collect(),
                timestamp: batch.timestamp,
                known: batch.known.clone(),
            })
            .collect(),
        timestamp: flushed_at,
    }
}

/// Wire shape to domain batches, attributed to `sender_id`
///
/// # Errors
///
/// Returns [`CoeditError::Protocol`] if any coordinate is not 1-based.
pub fn from_wire(sender_id: &str, dto: &EditBatchDto) -> Result<Vec<EditBatch>> {
    dto.queue
        .iter()
        .map(|batch| {
            let operations = batch
                .changes
                .iter()
                .map(|change| Ok(EditOperation::new(change.range.to_range()?, change.text.clone())))
                .collect::<Result<Vec<_>>>()?;
            Ok(EditBatch::new(
                sender_id.to_string(),
                batch.timestamp,
                operations,
                batch.known.clone(),
            ))
        })
        .collect()
}
