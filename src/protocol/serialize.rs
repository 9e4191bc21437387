// Serialization layer - Convert relay envelopes to/from JSON text
//!
//! The relay carries JSON text frames. This module is the only place that
//! turns frames into envelopes and back; decoding a payload by action is
//! left to [`RelayEnvelope::decode`].

use crate::error::{CoeditError, Result};
use crate::protocol::{RelayEnvelope, RelayMessage};

/// Serialize an envelope to a relay frame
pub fn encode_envelope(envelope: &RelayEnvelope) -> Result<String> {
    serde_json::to_string(envelope)
        .map_err(|e| CoeditError::Protocol(format!("Failed to encode envelope: {}", e)))
}

/// Deserialize a relay frame into an envelope
///
/// Unknown actions and malformed JSON are reported as
/// [`CoeditError::Protocol`] so the caller can drop the frame.
pub fn decode_envelope(frame: &str) -> Result<RelayEnvelope> {
    serde_json::from_str(frame)
        .map_err(|e| CoeditError::Protocol(format!("Failed to decode envelope: {}", e)))
}

/// Decode a frame straight to its sender and typed message
pub fn decode_frame(frame: &str) -> Result<(String, RelayMessage)> {
    let envelope = decode_envelope(frame)?;
    let message = envelope.decode()?;
    Ok((envelope.actor_id, message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{RelayAction, SavedDto};

    #[test]
    fn test_frame_round_trip() {
        let envelope = RelayMessage::Saved(SavedDto {
            timestamp: 42,
            known: [("alice".to_string(), 41)].into_iter().collect(),
        })
        .into_envelope("alice")
        .unwrap();

        let frame = encode_envelope(&envelope).unwrap();
        let decoded = decode_envelope(&frame).unwrap();

        assert_eq!(decoded, envelope);
        assert_eq!(decoded.action, RelayAction::Saved);
    }

    #[test]
    fn test_unknown_action_rejected() {
        let frame = r#"{"action":"DELETE","actorId":"x","payload":{}}"#;
        assert!(matches!(
            decode_envelope(frame),
            Err(CoeditError::Protocol(_))
        ));
    }

    #[test]
    fn test_decode_frame() {
        let frame = r#"{"action":"PRESENCE","actorId":"bob","payload":{"online":false}}"#;
        let (sender, message) = decode_frame(frame).unwrap();
        assert_eq!(sender, "bob");
        assert!(matches!(message, RelayMessage::Presence(ref p) if !p.online));
    }
}
