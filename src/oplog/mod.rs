//! Edit Operation Log
//!
//! An ordered, pruned history of every operation applied to the local
//! replica, local or remote. Only edits a peer may not have acknowledged can
//! still require transformation, so records older than the retention window
//! (measured against the logical clock) are discarded before each insert.
//!
//! Records are kept in timestamp order. Network delivery is not ordered, so
//! records are inserted in place rather than appended.
//!
//! The log also remembers which `(sender, timestamp)` batches it has applied
//! within the same window, so at-least-once delivery cannot apply a batch
//! twice.

mod record;

pub use record::AppliedEditRecord;

use crate::text::AppliedChange;
use crate::error::{CoeditError, Result};
use crate::{ParticipantId, Timestamp};
use std::collections::{BTreeSet, HashMap};

/// Default retention window in milliseconds
pub const DEFAULT_RETENTION_MS: u64 = 10_000;

#[derive(Debug, Clone)]
pub struct EditOperationLog {
    records: Vec<AppliedEditRecord>,
    seen: HashMap<ParticipantId, BTreeSet<Timestamp>>,
    retention_ms: u64,
}

impl EditOperationLog {
    pub fn new() -> Self {
        Self::with_retention(DEFAULT_RETENTION_MS)
    }

    pub fn with_retention(retention_ms: u64) -> Self {
        Self {
            records: Vec::new(),
            seen: HashMap::new(),
            retention_ms,
        }
    }

    pub fn retention_ms(&self) -> u64 {
        self.retention_ms
    }

    /// Oldest timestamp still retained at logical time `now`
    pub fn horizon(&self, now: Timestamp) -> Timestamp {
        now.saturating_sub(self.retention_ms)
    }

    /// Append one record per applied change, keeping timestamp order
    ///
    /// Records with equal timestamps keep their arrival order. Returns the
    /// number of records added.
    pub fn record(
        &mut self,
        sender_id: &str,
        timestamp: Timestamp,
        changes: &[AppliedChange],
    ) -> usize {
        let mut index = self.records.partition_point(|r| r.timestamp <= timestamp);
        let mut added = 0;

        for change in changes {
            let record = AppliedEditRecord::from_change(sender_id, timestamp, change);
            if record.is_noop() {
                continue;
            }
            self.records.insert(index, record);
            index += 1;
            added += 1;
        }

        added
    }

    /// Drop every record older than the retention window
    ///
    /// Returns the number of records removed.
    pub fn prune(&mut self, now: Timestamp) -> usize {
        let horizon = self.horizon(now);
        let cut = self.records.partition_point(|r| r.timestamp < horizon);
        self.records.drain(..cut);

        self.seen.retain(|_, stamps| {
            *stamps = stamps.split_off(&horizon);
            !stamps.is_empty()
        });

        cut
    }

    /// Remember that the batch `(sender, timestamp)` has been applied
    pub fn mark_seen(&mut self, sender_id: &str, timestamp: Timestamp) {
        self.seen
            .entry(sender_id.to_string())
            .or_default()
            .insert(timestamp);
    }

    /// Whether a batch must be rejected as a redelivery
    ///
    /// `incorporated` is the newest timestamp already incorporated from the
    /// sender. A batch is a duplicate if it was applied inside the retention
    /// window, or if it is older than the window and not newer than what was
    /// already incorporated (its ledger entry has been pruned).
    pub fn is_duplicate(
        &self,
        sender_id: &str,
        timestamp: Timestamp,
        incorporated: Timestamp,
        now: Timestamp,
    ) -> bool {
        let applied = self
            .seen
            .get(sender_id)
            .map(|stamps| stamps.contains(&timestamp))
            .unwrap_or(false);
        applied || (timestamp < self.horizon(now) && timestamp <= incorporated)
    }

    /// [`is_duplicate`](Self::is_duplicate) as a `Result`
    ///
    /// # Errors
    ///
    /// [`CoeditError::DuplicateBatch`] when the batch was already applied.
    pub fn check_fresh(
        &self,
        sender_id: &str,
        timestamp: Timestamp,
        incorporated: Timestamp,
        now: Timestamp,
    ) -> Result<()> {
        if self.is_duplicate(sender_id, timestamp, incorporated, now) {
            return Err(CoeditError::DuplicateBatch {
                sender: sender_id.to_string(),
                timestamp,
            });
        }
        Ok(())
    }

    pub fn records(&self) -> &[AppliedEditRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Forget all records (their coordinates are meaningless after a reload)
    ///
    /// The duplicate ledger is kept.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl Default for EditOperationLog {
    fn default() -> Self {
        Self::new()
    }
}
