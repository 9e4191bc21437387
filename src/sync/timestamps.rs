//! ParticipantTimestampMap: what has been incorporated from whom
//!
//! Works like a vector clock with one entry per participant, where each
//! entry is the newest batch timestamp incorporated from that participant.
//! Senders attach their map to every batch; receivers use it to decide
//! which log records the sender had not seen yet.

use crate::{ParticipantId, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantTimestampMap {
    entries: BTreeMap<ParticipantId, Timestamp>,
}

impl ParticipantTimestampMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last incorporated timestamp, 0 if nothing was seen
    pub fn get(&self, participant: &str) -> Timestamp {
        self.entries.get(participant).copied().unwrap_or(0)
    }

    /// Record that `timestamp` from `participant` is incorporated
    ///
    /// Entries only move forward. Returns whether the entry changed.
    pub fn advance(&mut self, participant: &str, timestamp: Timestamp) -> bool {
        match self.entries.get_mut(participant) {
            Some(current) if *current >= timestamp => false,
            Some(current) => {
                *current = timestamp;
                true
            }
            None => {
                self.entries.insert(participant.to_string(), timestamp);
                true
            }
        }
    }

    /// Whether an edit stamped `timestamp` by `participant` is covered
    pub fn has_seen(&self, participant: &str, timestamp: Timestamp) -> bool {
        timestamp <= self.get(participant)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ParticipantId, &Timestamp)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(ParticipantId, Timestamp)> for ParticipantTimestampMap {
    fn from_iter<I: IntoIterator<Item = (ParticipantId, Timestamp)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (participant, timestamp) in iter {
            map.advance(&participant, timestamp);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_entry_is_zero() {
        let map = ParticipantTimestampMap::new();
        assert_eq!(map.get("alice"), 0);
        assert!(map.has_seen("alice", 0));
        assert!(!map.has_seen("alice", 1));
    }

    #[test]
    fn test_advance_only_moves_forward() {
        let mut map = ParticipantTimestampMap::new();
        assert!(map.advance("alice", 10));
        assert!(!map.advance("alice", 5));
        assert!(map.advance("alice", 12));
        assert_eq!(map.get("alice"), 12);
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let map: ParticipantTimestampMap = [("alice".to_string(), 42)].into_iter().collect();
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"alice":42}"#);

        let back: ParticipantTimestampMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }
}
