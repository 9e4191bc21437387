//! Relay protocol
//!
//! The relay is an unordered, at-least-once, per-document broadcast channel.
//! Every message travels inside a [`RelayEnvelope`]:
//!
//! ```text
//! { "action": "EDIT" | "CURSOR" | "SAVED" | "PRESENCE", "actorId": "...", "payload": { ... } }
//! ```
//!
//! The payload is decoded according to the action into a [`RelayMessage`].

mod serialize;
mod wire;

pub use serialize::{decode_envelope, decode_frame, encode_envelope};
pub use wire::{
    from_wire, to_wire, BatchDto, ChangeDto, CursorDto, EditBatchDto, PresenceDto, RangeDto,
    SavedDto,
};

use crate::error::Result;
use crate::ParticipantId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RelayAction {
    Edit,
    Cursor,
    Saved,
    Presence,
}

/// Envelope as delivered by the relay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelayEnvelope {
    pub action: RelayAction,
    #[serde(rename = "actorId")]
    pub actor_id: ParticipantId,
    pub payload: serde_json::Value,
}

impl RelayEnvelope {
    pub fn edit(actor_id: &str, batches: EditBatchDto) -> Result<Self> {
        RelayMessage::Edit(batches).into_envelope(actor_id)
    }

    pub fn cursor(actor_id: &str, cursor: CursorDto) -> Result<Self> {
        RelayMessage::Cursor(cursor).into_envelope(actor_id)
    }

    /// Presence announcement; also used to publish typing state changes
    pub fn presence(actor_id: &str, presence: PresenceDto) -> Result<Self> {
        RelayMessage::Presence(presence).into_envelope(actor_id)
    }

    pub fn saved(actor_id: &str, saved: SavedDto) -> Result<Self> {
        RelayMessage::Saved(saved).into_envelope(actor_id)
    }

    /// Decode the payload according to the action
    pub fn decode(&self) -> Result<RelayMessage> {
        let payload = self.payload.clone();
        Ok(match self.action {
            RelayAction::Edit => RelayMessage::Edit(serde_json::from_value(payload)?),
            RelayAction::Cursor => RelayMessage::Cursor(serde_json::from_value(payload)?),
            RelayAction::Saved => RelayMessage::Saved(serde_json::from_value(payload)?),
            RelayAction::Presence => RelayMessage::Presence(serde_json::from_value(payload)?),
        })
    }
}

/// Typed relay payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayMessage {
    Edit(EditBatchDto),
    Cursor(CursorDto),
    Saved(SavedDto),
    Presence(PresenceDto),
}

impl RelayMessage {
    pub fn action(&self) -> RelayAction {
        match self {
            RelayMessage::Edit(_) => RelayAction::Edit,
            RelayMessage::Cursor(_) => RelayAction::Cursor,
            RelayMessage::Saved(_) => RelayAction::Saved,
            RelayMessage::Presence(_) => RelayAction::Presence,
        }
    }

    /// Wrap into an envelope sent on behalf of `actor_id`
    pub fn into_envelope(self, actor_id: &str) -> Result<RelayEnvelope> {
        let action = self.action();
        let payload = match self {
            RelayMessage::Edit(dto) => serde_json::to_value(dto)?,
            RelayMessage::Cursor(dto) => serde_json::to_value(dto)?,
            RelayMessage::Saved(dto) => serde_json::to_value(dto)?,
            RelayMessage::Presence(dto) => serde_json::to_value(dto)?,
        };
        Ok(RelayEnvelope {
            action,
            actor_id: actor_id.to_string(),
            payload,
        })
    }
}
