/// Presence state management
///
/// Tracks every remote participant seen during the session: online status,
/// typing state, display color and cursor/selection ranges. Participants are
/// never removed; leaving or going silent marks them offline and clears their
/// ranges so a returning participant keeps the same color.
use super::palette::{Color, ColorPalette};
use crate::oplog::AppliedEditRecord;
use crate::text::Range;
use crate::transform::shift_range;
use crate::{ParticipantId, Timestamp};
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;

/// A remote participant as displayed locally
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteParticipant {
    pub id: ParticipantId,
    pub display_name: String,
    pub color: Color,

    /// Cursor and selection ranges in local buffer coordinates
    pub cursor_ranges: Vec<Range>,

    pub online: bool,
    pub typing: bool,

    /// Timestamp of the cursor event currently displayed
    pub cursor_timestamp: Timestamp,

    /// Last time any event arrived from this participant
    pub last_seen: Instant,
}

/// Presence tracker for all remote participants
#[derive(Debug)]
pub struct PresenceTracker {
    local_id: ParticipantId,
    participants: HashMap<ParticipantId, RemoteParticipant>,
    palette: ColorPalette,
}

impl PresenceTracker {
    pub fn new(local_id: ParticipantId) -> Self {
        Self::with_palette(local_id, ColorPalette::default())
    }

    pub fn with_palette(local_id: ParticipantId, palette: ColorPalette) -> Self {
        Self {
            local_id,
            participants: HashMap::new(),
            palette,
        }
    }

    pub fn local_id(&self) -> &str {
        &self.local_id
    }

    /// Note activity from a participant, creating it on first sight
    ///
    /// Returns `None` for the local participant, which is never tracked.
    pub fn observe(&mut self, id: &str, now: Instant) -> Option<&mut RemoteParticipant> {
        if id == self.local_id {
            return None;
        }

        let palette = &mut self.palette;
        let participant = self
            .participants
            .entry(id.to_string())
            .or_insert_with(|| {
                let color = palette.next_color();
                tracing::debug!(participant = id, color = %color, "new participant");
                RemoteParticipant {
                    id: id.to_string(),
                    display_name: id.to_string(),
                    color,
                    cursor_ranges: Vec::new(),
                    online: true,
                    typing: false,
                    cursor_timestamp: 0,
                    last_seen: now,
                }
            });
        participant.online = true;
        participant.last_seen = now;
        Some(participant)
    }

    /// Replace a participant's cursor ranges wholesale
    ///
    /// Ranges must already be in local coordinates. Events older than the
    /// one currently displayed are ignored. Returns whether anything changed.
    pub fn apply_cursor(
        &mut self,
        id: &str,
        ranges: Vec<Range>,
        timestamp: Timestamp,
        now: Instant,
    ) -> bool {
        let Some(participant) = self.observe(id, now) else {
            return false;
        };
        if timestamp < participant.cursor_timestamp {
            return false;
        }
        participant.cursor_ranges = ranges;
        participant.cursor_timestamp = timestamp;
        true
    }

    /// Apply a presence announcement
    pub fn apply_presence(
        &mut self,
        id: &str,
        online: bool,
        typing: bool,
        display_name: Option<String>,
        now: Instant,
    ) -> bool {
        if !online {
            return self.mark_offline(id);
        }
        let Some(participant) = self.observe(id, now) else {
            return false;
        };
        participant.typing = typing;
        if let Some(name) = display_name {
            participant.display_name = name;
        }
        true
    }

    /// Mark a participant offline and clear its ranges
    ///
    /// Returns whether the participant was online.
    pub fn mark_offline(&mut self, id: &str) -> bool {
        match self.participants.get_mut(id) {
            Some(participant) => {
                let was_online = participant.online;
                participant.online = false;
                participant.typing = false;
                participant.cursor_ranges.clear();
                was_online
            }
            None => false,
        }
    }

    /// Re-anchor displayed ranges after an edit was applied locally
    ///
    /// The record's author is skipped; its own next cursor event carries its
    /// new position.
    pub fn shift_cursors(&mut self, record: &AppliedEditRecord) {
        for participant in self.participants.values_mut() {
            if participant.id == record.sender_id || participant.cursor_ranges.is_empty() {
                continue;
            }
            for range in participant.cursor_ranges.iter_mut() {
                *range = shift_range(range, record, false);
            }
        }
    }

    /// Mark participants silent for longer than `timeout` offline
    ///
    /// Returns the ids that went offline.
    pub fn sweep_stale(&mut self, timeout: Duration, now: Instant) -> Vec<ParticipantId> {
        let mut stale = Vec::new();

        for participant in self.participants.values_mut() {
            if participant.online && now.duration_since(participant.last_seen) > timeout {
                participant.online = false;
                participant.typing = false;
                participant.cursor_ranges.clear();
                stale.push(participant.id.clone());
            }
        }

        stale.sort();
        stale
    }

    pub fn participant(&self, id: &str) -> Option<&RemoteParticipant> {
        self.participants.get(id)
    }

    pub fn participants(&self) -> impl Iterator<Item = &RemoteParticipant> {
        self.participants.values()
    }

    /// Online participants, ordered by id
    pub fn online_participants(&self) -> Vec<&RemoteParticipant> {
        let mut online: Vec<_> = self.participants.values().filter(|p| p.online).collect();
        online.sort_by(|a, b| a.id.cmp(&b.id));
        online
    }

    pub fn color_of(&self, id: &str) -> Option<Color> {
        self.participants.get(id).map(|p| p.color)
    }

    /// Number of participants ever seen
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn online_count(&self) -> usize {
        self.participants.values().filter(|p| p.online).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{AppliedChange, Position};

    fn caret(line: u32, column: u32) -> Range {
        Range::caret(Position::new(line, column))
    }

    #[test]
    fn test_local_participant_is_not_tracked() {
        let mut tracker = PresenceTracker::new("me".to_string());
        assert!(tracker.observe("me", Instant::now()).is_none());
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_colors_assigned_round_robin() {
        let palette = ColorPalette::new(vec![Color(1), Color(2)]);
        let mut tracker = PresenceTracker::with_palette("me".to_string(), palette);
        let now = Instant::now();

        tracker.observe("alice", now);
        tracker.observe("bob", now);
        tracker.observe("carol", now);

        assert_eq!(tracker.color_of("alice"), Some(Color(1)));
        assert_eq!(tracker.color_of("bob"), Some(Color(2)));
        assert_eq!(tracker.color_of("carol"), Some(Color(1)));
    }

    #[test]
    fn test_color_stable_across_leave_and_return() {
        let mut tracker = PresenceTracker::new("me".to_string());
        let now = Instant::now();

        tracker.observe("alice", now);
        let color = tracker.color_of("alice");
        tracker.apply_presence("alice", false, false, None, now);
        tracker.observe("bob", now);
        tracker.apply_presence("alice", true, false, None, now);

        assert_eq!(tracker.color_of("alice"), color);
        assert_ne!(tracker.color_of("bob"), color);
    }

    #[test]
    fn test_offline_clears_ranges_but_keeps_record() {
        let mut tracker = PresenceTracker::new("me".to_string());
        let now = Instant::now();

        tracker.apply_cursor("alice", vec![caret(2, 3)], 10, now);
        assert!(tracker.mark_offline("alice"));

        let alice = tracker.participant("alice").unwrap();
        assert!(!alice.online);
        assert!(alice.cursor_ranges.is_empty());
        assert_eq!(tracker.len(), 1);
        assert_eq!(tracker.online_count(), 0);
    }

    #[test]
    fn test_older_cursor_events_are_ignored() {
        let mut tracker = PresenceTracker::new("me".to_string());
        let now = Instant::now();

        assert!(tracker.apply_cursor("alice", vec![caret(5, 1)], 20, now));
        assert!(!tracker.apply_cursor("alice", vec![caret(1, 1)], 10, now));

        assert_eq!(
            tracker.participant("alice").unwrap().cursor_ranges,
            vec![caret(5, 1)]
        );
    }

    #[test]
    fn test_shift_cursors_skips_author() {
        let mut tracker = PresenceTracker::new("me".to_string());
        let now = Instant::now();
        tracker.apply_cursor("alice", vec![caret(3, 1)], 1, now);
        tracker.apply_cursor("bob", vec![caret(3, 1)], 1, now);

        let record = AppliedEditRecord::from_change(
            "bob",
            5,
            &AppliedChange {
                range: caret(1, 1),
                text: "new line\n".to_string(),
                replaced: String::new(),
            },
        );
        tracker.shift_cursors(&record);

        assert_eq!(tracker.participant("alice").unwrap().cursor_ranges, vec![caret(4, 1)]);
        assert_eq!(tracker.participant("bob").unwrap().cursor_ranges, vec![caret(3, 1)]);
    }

    #[test]
    fn test_sweep_marks_silent_participants_offline() {
        let mut tracker = PresenceTracker::new("me".to_string());
        let start = Instant::now();
        tracker.observe("alice", start);
        tracker.observe("bob", start + Duration::from_secs(25));

        let stale = tracker.sweep_stale(Duration::from_secs(30), start + Duration::from_secs(31));

        assert_eq!(stale, vec!["alice".to_string()]);
        assert!(!tracker.participant("alice").unwrap().online);
        assert!(tracker.participant("bob").unwrap().online);
    }

    #[test]
    fn test_presence_updates_name_and_typing() {
        let mut tracker = PresenceTracker::new("me".to_string());
        tracker.apply_presence("alice", true, true, Some("Alice".to_string()), Instant::now());

        let alice = tracker.participant("alice").unwrap();
        assert_eq!(alice.display_name, "Alice");
        assert!(alice.typing);
        assert_eq!(tracker.online_participants().len(), 1);
    }
}
