//! Session timers as plain deadlines
//!
//! The session never sleeps. It records when each timer is due and the
//! driver waits for [`SessionTimers::next_deadline`]; cancelling a timer is
//! just forgetting its deadline.

use std::collections::BTreeMap;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimerKind {
    /// Publish queued batches and the pending cursor
    Flush,
    /// Local user stopped typing
    TypingIdle,
    PeriodicSave,
    /// Remote lock held too long without activity
    LockTimeout,
    Heartbeat,
    PresenceSweep,
}

#[derive(Debug, Clone, Default)]
pub struct SessionTimers {
    deadlines: BTreeMap<TimerKind, Instant>,
}

impl SessionTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a timer, replacing any earlier deadline
    pub fn arm(&mut self, kind: TimerKind, deadline: Instant) {
        self.deadlines.insert(kind, deadline);
    }

    /// Arm a timer only if it is not already pending
    ///
    /// Returns whether the timer was armed.
    pub fn arm_if_idle(&mut self, kind: TimerKind, deadline: Instant) -> bool {
        if self.deadlines.contains_key(&kind) {
            return false;
        }
        self.deadlines.insert(kind, deadline);
        true
    }

    pub fn cancel(&mut self, kind: TimerKind) -> bool {
        self.deadlines.remove(&kind).is_some()
    }

    pub fn cancel_all(&mut self) {
        self.deadlines.clear();
    }

    pub fn is_armed(&self, kind: TimerKind) -> bool {
        self.deadlines.contains_key(&kind)
    }

    pub fn deadline(&self, kind: TimerKind) -> Option<Instant> {
        self.deadlines.get(&kind).copied()
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadlines.values().min().copied()
    }

    /// Remove and return every timer due at `now`, earliest first
    pub fn take_expired(&mut self, now: Instant) -> Vec<TimerKind> {
        let mut expired: Vec<(Instant, TimerKind)> = self
            .deadlines
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(kind, deadline)| (*deadline, *kind))
            .collect();
        expired.sort();

        for (_, kind) in &expired {
            self.deadlines.remove(kind);
        }
        expired.into_iter().map(|(_, kind)| kind).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }
}
