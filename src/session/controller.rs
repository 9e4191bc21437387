//! Edit session controller
//!
//! One [`EditSession`] per open document. It owns the live buffer, the
//! operation log, the participant timestamps and the presence tracker, and
//! it is the only place where they change. Every operation takes the current
//! instant and returns the [`SessionEffect`]s to execute, which keeps the
//! whole state machine deterministic under test.

use super::effects::{ReloadReason, SessionEffect, WidgetCommand};
use super::ports::WidgetEvent;
use super::state::{ApplyMode, SessionState};
use super::timers::{SessionTimers, TimerKind};
use crate::awareness::PresenceTracker;
use crate::config::SessionConfig;
use crate::error::{CoeditError, Result};
use crate::oplog::{AppliedEditRecord, EditOperationLog};
use crate::protocol::{
    from_wire, to_wire, CursorDto, EditBatchDto, PresenceDto, RangeDto, RelayEnvelope,
    RelayMessage, SavedDto,
};
use crate::sync::{wall_clock_millis, LogicalClock, ParticipantTimestampMap};
use crate::text::{AppliedChange, EditBatch, EditOperation, Position, Range, TextBuffer};
use crate::transform::{shift_range, Transformer};
use crate::{DocumentId, ParticipantId, Timestamp};
use tokio::time::Instant;
use tracing::{debug, trace, warn};

/// Status shown while a recovery reload is in flight
pub const RELOAD_STATUS: &str = "Reloading document…";

#[derive(Debug)]
pub struct EditSession {
    document_id: DocumentId,
    local_id: ParticipantId,
    display_name: Option<String>,
    config: SessionConfig,
    state: SessionState,

    buffer: TextBuffer,
    log: EditOperationLog,
    clock: LogicalClock,
    timestamps: ParticipantTimestampMap,
    presence: PresenceTracker,
    timers: SessionTimers,

    /// Wall-clock reading taken at `epoch`; logical time advances with the
    /// monotonic clock from there
    epoch: Instant,
    epoch_wall_millis: Timestamp,

    /// Local batches not yet published
    outgoing: Vec<EditBatch>,
    local_cursor: Vec<Range>,
    cursor_pending: bool,
    typing: bool,

    dirty: bool,
    /// Bumped on every change to the buffer
    revision: u64,
    last_local_edit: Timestamp,
    last_save: Option<(u64, ParticipantTimestampMap)>,

    /// Remote batches received before a baseline was installed
    pending_remote: Vec<EditBatch>,
    reload: Option<ReloadReason>,
}

impl EditSession {
    pub fn new(
        document_id: impl Into<DocumentId>,
        local_id: impl Into<ParticipantId>,
        config: SessionConfig,
    ) -> Self {
        let local_id = local_id.into();
        Self {
            document_id: document_id.into(),
            display_name: None,
            state: SessionState::Connecting,
            buffer: TextBuffer::new(),
            log: EditOperationLog::with_retention(config.log_retention_ms),
            clock: LogicalClock::new(),
            timestamps: ParticipantTimestampMap::new(),
            presence: PresenceTracker::new(local_id.clone()),
            timers: SessionTimers::new(),
            epoch: Instant::now(),
            epoch_wall_millis: wall_clock_millis(),
            outgoing: Vec::new(),
            local_cursor: Vec::new(),
            cursor_pending: false,
            typing: false,
            dirty: false,
            revision: 0,
            last_local_edit: 0,
            last_save: None,
            pending_remote: Vec::new(),
            reload: None,
            local_id,
            config,
        }
    }

    /// Name announced with presence messages
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Pin the wall-clock reading that corresponds to `epoch`
    pub fn with_clock_base(mut self, epoch: Instant, wall_millis: Timestamp) -> Self {
        self.epoch = epoch;
        self.epoch_wall_millis = wall_millis;
        self
    }

    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    pub fn local_id(&self) -> &str {
        &self.local_id
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn text(&self) -> String {
        self.buffer.text()
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn log(&self) -> &EditOperationLog {
        &self.log
    }

    pub fn timestamps(&self) -> &ParticipantTimestampMap {
        &self.timestamps
    }

    pub fn presence(&self) -> &PresenceTracker {
        &self.presence
    }

    pub fn local_cursor(&self) -> &[Range] {
        &self.local_cursor
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_typing(&self) -> bool {
        self.typing
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// When the driver must call [`fire_timers`](Self::fire_timers) next
    pub fn next_deadline(&self) -> Option<Instant> {
        if self.state == SessionState::Closed {
            return None;
        }
        self.timers.next_deadline()
    }

    fn wall_millis(&self, now: Instant) -> Timestamp {
        let elapsed = now.saturating_duration_since(self.epoch).as_millis() as Timestamp;
        self.epoch_wall_millis + elapsed
    }

    /// Open the session: editor read-only until the document is loaded
    pub fn start(&mut self) -> Vec<SessionEffect> {
        if self.state != SessionState::Connecting || self.reload.is_some() {
            return Vec::new();
        }
        debug!(
            document = %self.document_id,
            participant = %self.local_id,
            "starting edit session"
        );
        self.reload = Some(ReloadReason::Initial);
        vec![
            WidgetCommand::SetReadOnly(true).into(),
            SessionEffect::Load {
                reason: ReloadReason::Initial,
            },
        ]
    }

    /// Install the result of a `Load` effect
    pub fn document_loaded(&mut self, result: Result<String>, now: Instant) -> Vec<SessionEffect> {
        let Some(reason) = self.reload.take() else {
            debug!(document = %self.document_id, "ignoring unrequested document load");
            return Vec::new();
        };
        if self.state == SessionState::Closed {
            return Vec::new();
        }

        let text = match result {
            Ok(text) => Some(text),
            Err(err) if reason == ReloadReason::Initial => {
                warn!(document = %self.document_id, error = %err, "initial load failed, using fallback text");
                Some(self.config.fallback_text.clone())
            }
            Err(err) => {
                warn!(document = %self.document_id, %reason, error = %err, "reload failed, keeping current text");
                None
            }
        };

        let mut effects = Vec::new();
        if let Some(text) = text {
            let previous = self.buffer.full_range();
            self.buffer.replace_all(&text);
            self.log.clear();
            self.outgoing.clear();
            self.local_cursor.clear();
            self.cursor_pending = false;
            self.dirty = false;
            self.revision += 1;
            effects.push(
                WidgetCommand::ApplyEdits {
                    operations: vec![EditOperation::new(previous, text)],
                    mode: ApplyMode::Reload,
                }
                .into(),
            );
        }

        self.state = SessionState::Active;
        effects.push(WidgetCommand::SetReadOnly(false).into());
        effects.extend(self.publish_presence(true));

        self.timers
            .arm(TimerKind::Heartbeat, now + self.config.heartbeat_interval());
        self.timers
            .arm(TimerKind::PresenceSweep, now + self.config.heartbeat_interval());
        self.timers
            .arm(TimerKind::PeriodicSave, now + self.config.save_interval());

        debug!(
            document = %self.document_id,
            %reason,
            lines = self.buffer.line_count(),
            "document installed"
        );

        let pending = std::mem::take(&mut self.pending_remote);
        effects.extend(self.apply_remote_batches(pending, now));
        effects.push(self.refresh_preview());
        effects
    }

    /// React to something the editor widget reported
    ///
    /// # Errors
    ///
    /// Local edits are rejected with [`CoeditError::ReadOnly`] unless the
    /// session is active, and with [`CoeditError::SessionClosed`] after close.
    pub fn handle_widget_event(
        &mut self,
        event: WidgetEvent,
        now: Instant,
    ) -> Result<Vec<SessionEffect>> {
        match event {
            WidgetEvent::ContentChanged { operations, mode } => {
                if !mode.is_local() {
                    trace!(?mode, "ignoring widget echo");
                    return Ok(Vec::new());
                }
                self.local_edit(operations, now)
            }
            WidgetEvent::CursorChanged { ranges } => {
                if self.state == SessionState::Closed {
                    return Err(CoeditError::SessionClosed);
                }
                self.local_cursor = ranges;
                if self.state.is_live() {
                    self.cursor_pending = true;
                    self.timers
                        .arm_if_idle(TimerKind::Flush, now + self.config.flush_interval());
                }
                Ok(Vec::new())
            }
        }
    }

    fn local_edit(
        &mut self,
        operations: Vec<EditOperation>,
        now: Instant,
    ) -> Result<Vec<SessionEffect>> {
        match &self.state {
            SessionState::Closed => return Err(CoeditError::SessionClosed),
            state if !state.is_editable() => {
                return Err(CoeditError::ReadOnly {
                    state: state.to_string(),
                })
            }
            _ => {}
        }
        if operations.is_empty() {
            return Ok(Vec::new());
        }

        let timestamp = self.clock.tick(self.wall_millis(now));
        let snapshot = self.buffer.clone();
        let mut changes = Vec::with_capacity(operations.len());
        for operation in &operations {
            match self.buffer.apply(operation) {
                Ok(change) => changes.push(change),
                Err(err) => {
                    // The widget no longer matches the buffer; drop the whole
                    // batch so no part of it reaches peers, then resync
                    warn!(document = %self.document_id, error = %err, "local edit does not fit the buffer");
                    self.buffer = snapshot;
                    return Ok(self.begin_reload(ReloadReason::Divergence));
                }
            }
        }

        Ok(self.record_local(operations, &changes, timestamp, now))
    }

    fn record_local(
        &mut self,
        operations: Vec<EditOperation>,
        changes: &[AppliedChange],
        timestamp: Timestamp,
        now: Instant,
    ) -> Vec<SessionEffect> {
        self.log.prune(self.clock.current());
        self.log.record(&self.local_id, timestamp, changes);
        for change in changes {
            let record = AppliedEditRecord::from_change(&self.local_id, timestamp, change);
            self.presence.shift_cursors(&record);
        }

        self.timestamps.advance(&self.local_id, timestamp);
        self.last_local_edit = timestamp;
        self.outgoing.push(EditBatch::new(
            self.local_id.clone(),
            timestamp,
            operations,
            self.timestamps.clone(),
        ));
        self.dirty = true;
        self.revision += 1;

        trace!(timestamp, changes = changes.len(), "local edit applied");

        let mut effects = Vec::new();
        if !self.typing {
            self.typing = true;
            effects.extend(self.publish_presence(true));
        }
        self.timers
            .arm(TimerKind::TypingIdle, now + self.config.typing_idle());
        self.timers
            .arm_if_idle(TimerKind::Flush, now + self.config.flush_interval());
        self.timers
            .arm_if_idle(TimerKind::PeriodicSave, now + self.config.save_interval());

        if !self.presence.is_empty() {
            effects.push(self.presence_changed());
        }
        effects.push(self.refresh_preview());
        effects
    }

    /// React to an envelope delivered by the relay
    pub fn handle_relay(&mut self, envelope: RelayEnvelope, now: Instant) -> Vec<SessionEffect> {
        if self.state == SessionState::Closed || envelope.actor_id == self.local_id {
            return Vec::new();
        }

        let message = match envelope.decode() {
            Ok(message) => message,
            Err(err) => {
                warn!(
                    participant = %envelope.actor_id,
                    action = ?envelope.action,
                    error = %err,
                    "dropping malformed relay message"
                );
                return Vec::new();
            }
        };

        let sender = envelope.actor_id;
        match message {
            RelayMessage::Edit(dto) => self.handle_remote_edit(&sender, &dto, now),
            RelayMessage::Cursor(dto) => self.handle_remote_cursor(&sender, &dto, now),
            RelayMessage::Presence(dto) => self.handle_remote_presence(&sender, dto, now),
            RelayMessage::Saved(dto) => self.handle_remote_saved(&sender, &dto, now),
        }
    }

    fn handle_remote_edit(
        &mut self,
        sender: &str,
        dto: &EditBatchDto,
        now: Instant,
    ) -> Vec<SessionEffect> {
        let batches = match from_wire(sender, dto) {
            Ok(batches) => batches,
            Err(err) => {
                warn!(participant = sender, error = %err, "dropping malformed edit");
                return Vec::new();
            }
        };

        if !self.state.is_live() {
            debug!(
                participant = sender,
                batches = batches.len(),
                "holding remote edit until the document is loaded"
            );
            self.presence.observe(sender, now);
            self.pending_remote.extend(batches);
            return Vec::new();
        }
        self.apply_remote_batches(batches, now)
    }

    fn apply_remote_batches(
        &mut self,
        batches: impl IntoIterator<Item = EditBatch>,
        now: Instant,
    ) -> Vec<SessionEffect> {
        let mut effects = Vec::new();
        let mut batches = batches.into_iter();
        while let Some(batch) = batches.next() {
            effects.extend(self.apply_remote_batch(batch, now));
            if !self.state.is_live() {
                // A reload started; replay the rest on top of the new baseline
                self.pending_remote.extend(batches);
                break;
            }
        }
        effects
    }

    fn apply_remote_batch(&mut self, batch: EditBatch, now: Instant) -> Vec<SessionEffect> {
        let sender = batch.sender_id.clone();
        let timestamp = batch.timestamp;

        if let Err(err) = self.log.check_fresh(
            &sender,
            timestamp,
            self.timestamps.get(&sender),
            self.clock.current(),
        ) {
            debug!(error = %err, "ignoring batch");
            return Vec::new();
        }
        self.clock.observe(timestamp);

        let operations = Transformer::new(&self.log).transform_batch(&batch);

        let snapshot = self.buffer.clone();
        let mut changes = Vec::with_capacity(operations.len());
        for operation in &operations {
            match self.buffer.apply(operation) {
                Ok(change) => changes.push(change),
                Err(err) => {
                    warn!(
                        participant = %sender,
                        timestamp,
                        error = %err,
                        "transformed edit does not fit the buffer"
                    );
                    self.buffer = snapshot;
                    return self.begin_reload(ReloadReason::Divergence);
                }
            }
        }

        self.log.prune(self.clock.current());
        self.log.record(&sender, timestamp, &changes);
        self.log.mark_seen(&sender, timestamp);
        self.timestamps.advance(&sender, timestamp);
        self.presence.observe(&sender, now);
        self.revision += 1;

        let records: Vec<AppliedEditRecord> = changes
            .iter()
            .map(|change| AppliedEditRecord::from_change(&sender, timestamp, change))
            .collect();
        for record in &records {
            self.presence.shift_cursors(record);
        }

        debug!(participant = %sender, timestamp, changes = records.len(), "remote batch applied");

        let mut effects: Vec<SessionEffect> = vec![WidgetCommand::ApplyEdits {
            operations,
            mode: ApplyMode::Remote {
                sender: sender.clone(),
            },
        }
        .into()];
        if let Some(position) = self.reanchor_local_cursor(&records) {
            effects.push(WidgetCommand::SetCursor(position).into());
        }

        if matches!(&self.state, SessionState::RemoteLocked { holder } if *holder == sender) {
            self.timers
                .arm(TimerKind::LockTimeout, now + self.config.lock_timeout());
        }

        effects.push(self.presence_changed());
        effects.push(self.refresh_preview());
        effects
    }

    /// Move the local cursor across applied remote records
    ///
    /// Returns where to put the caret back, or `None` when a record touched
    /// the caret itself and the widget's own placement should stand.
    fn reanchor_local_cursor(&mut self, records: &[AppliedEditRecord]) -> Option<Position> {
        if self.local_cursor.is_empty() {
            return None;
        }

        let mut touched = false;
        for record in records {
            touched = touched || record.source_range.intersects(&self.local_cursor[0]);
            for range in self.local_cursor.iter_mut() {
                *range = shift_range(range, record, false);
            }
        }

        if touched {
            None
        } else {
            Some(self.local_cursor[0].start)
        }
    }

    fn handle_remote_cursor(
        &mut self,
        sender: &str,
        dto: &CursorDto,
        now: Instant,
    ) -> Vec<SessionEffect> {
        let ranges = match dto.to_ranges() {
            Ok(ranges) => ranges,
            Err(err) => {
                warn!(participant = sender, error = %err, "dropping malformed cursor");
                return Vec::new();
            }
        };

        let transformer = Transformer::new(&self.log);
        let buffer = &self.buffer;
        let ranges: Vec<Range> = ranges
            .iter()
            .map(|range| transformer.transform_range(range, sender, dto.timestamp, &dto.known))
            .filter(|range| buffer.is_valid_range(range))
            .collect();

        if self
            .presence
            .apply_cursor(sender, ranges, dto.timestamp, now)
        {
            vec![self.presence_changed()]
        } else {
            Vec::new()
        }
    }

    fn handle_remote_presence(
        &mut self,
        sender: &str,
        dto: PresenceDto,
        now: Instant,
    ) -> Vec<SessionEffect> {
        let remote_typing = dto.online && dto.typing;
        let changed = self
            .presence
            .apply_presence(sender, dto.online, dto.typing, dto.name, now);

        let mut effects = Vec::new();
        match &self.state {
            SessionState::Active
                if remote_typing && self.config.lock_while_remote_typing && !self.typing =>
            {
                debug!(participant = sender, "remote participant typing, locking editor");
                self.state = SessionState::RemoteLocked {
                    holder: sender.to_string(),
                };
                self.timers
                    .arm(TimerKind::LockTimeout, now + self.config.lock_timeout());
                effects.push(WidgetCommand::SetReadOnly(true).into());
            }
            SessionState::RemoteLocked { holder } if holder == sender => {
                if remote_typing {
                    self.timers
                        .arm(TimerKind::LockTimeout, now + self.config.lock_timeout());
                } else {
                    effects.extend(self.unlock());
                }
            }
            _ => {}
        }

        if changed {
            effects.push(self.presence_changed());
        }
        effects
    }

    fn handle_remote_saved(
        &mut self,
        sender: &str,
        dto: &SavedDto,
        now: Instant,
    ) -> Vec<SessionEffect> {
        self.presence.observe(sender, now);
        if self.dirty
            && self.last_local_edit > 0
            && dto.known.get(&self.local_id) >= self.last_local_edit
        {
            debug!(participant = sender, "peer snapshot covers our latest edit");
            self.dirty = false;
        }
        Vec::new()
    }

    fn unlock(&mut self) -> Vec<SessionEffect> {
        debug!(document = %self.document_id, "remote lock released");
        self.state = SessionState::Active;
        self.timers.cancel(TimerKind::LockTimeout);
        vec![WidgetCommand::SetReadOnly(false).into()]
    }

    /// Run every timer due at `now`
    pub fn fire_timers(&mut self, now: Instant) -> Vec<SessionEffect> {
        if self.state == SessionState::Closed {
            return Vec::new();
        }

        let mut effects = Vec::new();
        for kind in self.timers.take_expired(now) {
            trace!(?kind, "timer fired");
            match kind {
                TimerKind::Flush => effects.extend(self.flush()),
                TimerKind::TypingIdle => {
                    self.typing = false;
                    effects.extend(self.publish_presence(true));
                    effects.extend(self.request_save());
                }
                TimerKind::PeriodicSave => {
                    effects.extend(self.request_save());
                    self.timers
                        .arm(TimerKind::PeriodicSave, now + self.config.save_interval());
                }
                TimerKind::LockTimeout => {
                    if let SessionState::RemoteLocked { holder } = &self.state {
                        warn!(
                            document = %self.document_id,
                            participant = %holder,
                            "remote lock timed out"
                        );
                        effects.extend(self.begin_reload(ReloadReason::LockTimeout));
                    }
                }
                TimerKind::Heartbeat => {
                    effects.extend(self.publish_presence(true));
                    self.timers
                        .arm(TimerKind::Heartbeat, now + self.config.heartbeat_interval());
                }
                TimerKind::PresenceSweep => {
                    let stale = self
                        .presence
                        .sweep_stale(self.config.presence_timeout(), now);
                    if !stale.is_empty() {
                        debug!(participants = ?stale, "participants timed out");
                        let holder_gone = matches!(
                            &self.state,
                            SessionState::RemoteLocked { holder } if stale.contains(holder)
                        );
                        if holder_gone {
                            effects.extend(self.unlock());
                        }
                        effects.push(self.presence_changed());
                    }
                    self.timers
                        .arm(TimerKind::PresenceSweep, now + self.config.heartbeat_interval());
                }
            }
        }
        effects
    }

    /// Publish queued batches and the pending cursor as at most one message each
    fn flush(&mut self) -> Vec<SessionEffect> {
        self.timers.cancel(TimerKind::Flush);
        let mut effects = Vec::new();

        if !self.outgoing.is_empty() {
            let dto = to_wire(&self.outgoing, self.clock.current());
            debug!(batches = self.outgoing.len(), "flushing edits");
            self.outgoing.clear();
            effects.extend(self.publish(RelayMessage::Edit(dto)));
        }

        if self.cursor_pending {
            self.cursor_pending = false;
            let dto = CursorDto {
                ranges: self.local_cursor.iter().copied().map(RangeDto::from).collect(),
                timestamp: self.clock.current(),
                known: self.timestamps.clone(),
            };
            effects.extend(self.publish(RelayMessage::Cursor(dto)));
        }

        effects
    }

    fn request_save(&mut self) -> Option<SessionEffect> {
        if !self.dirty || !self.state.is_live() {
            return None;
        }
        Some(self.save_effect())
    }

    fn save_effect(&mut self) -> SessionEffect {
        self.last_save = Some((self.revision, self.timestamps.clone()));
        SessionEffect::Save {
            text: self.buffer.text(),
            revision: self.revision,
        }
    }

    /// Record the outcome of a `Save` effect
    ///
    /// A failed save leaves the document dirty; the next save tick retries.
    pub fn save_completed(&mut self, revision: u64, result: Result<()>) -> Vec<SessionEffect> {
        if let Err(err) = result {
            warn!(document = %self.document_id, revision, error = %err, "save failed, will retry");
            return Vec::new();
        }

        if revision == self.revision {
            self.dirty = false;
        }
        debug!(document = %self.document_id, revision, dirty = self.dirty, "document saved");

        let known = match self.last_save.take() {
            Some((saved, known)) if saved == revision => known,
            _ => return Vec::new(),
        };
        if self.state == SessionState::Closed {
            return Vec::new();
        }
        self.publish(RelayMessage::Saved(SavedDto {
            timestamp: self.clock.current(),
            known,
        }))
        .into_iter()
        .collect()
    }

    fn begin_reload(&mut self, reason: ReloadReason) -> Vec<SessionEffect> {
        let mut effects = self.flush();
        warn!(document = %self.document_id, %reason, "reloading document");

        self.state = SessionState::Connecting;
        self.reload = Some(reason);
        self.timers.cancel(TimerKind::LockTimeout);
        self.timers.cancel(TimerKind::TypingIdle);
        if self.typing {
            self.typing = false;
            effects.extend(self.publish_presence(true));
        }

        effects.push(WidgetCommand::SetReadOnly(true).into());
        effects.push(WidgetCommand::ShowStatus(RELOAD_STATUS.to_string()).into());
        effects.push(SessionEffect::Load { reason });
        effects
    }

    /// Tear the session down
    ///
    /// Cancels every timer, publishes what is still queued, announces the
    /// participant offline and asks for a final save when dirty.
    pub fn close(&mut self) -> Vec<SessionEffect> {
        if self.state == SessionState::Closed {
            return Vec::new();
        }

        self.timers.cancel_all();
        let mut effects = self.flush();
        self.typing = false;
        effects.extend(self.publish_presence(false));
        if self.dirty {
            effects.push(self.save_effect());
        }

        self.state = SessionState::Closed;
        self.reload = None;
        self.pending_remote.clear();
        debug!(document = %self.document_id, participant = %self.local_id, "edit session closed");
        effects
    }

    fn publish(&self, message: RelayMessage) -> Option<SessionEffect> {
        match message.into_envelope(&self.local_id) {
            Ok(envelope) => Some(SessionEffect::Publish(envelope)),
            Err(err) => {
                warn!(error = %err, "failed to encode relay message");
                None
            }
        }
    }

    fn publish_presence(&self, online: bool) -> Option<SessionEffect> {
        self.publish(RelayMessage::Presence(PresenceDto {
            online,
            typing: online && self.typing,
            name: self.display_name.clone(),
        }))
    }

    fn presence_changed(&self) -> SessionEffect {
        WidgetCommand::PresenceChanged(
            self.presence
                .online_participants()
                .into_iter()
                .cloned()
                .collect(),
        )
        .into()
    }

    fn refresh_preview(&self) -> SessionEffect {
        WidgetCommand::RefreshPreview(self.buffer.text()).into()
    }
}
