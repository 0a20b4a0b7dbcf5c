//! Virtual-time queue of deferred session continuations.
//!
//! Presentation delays (walk animation, hit flinch, enemy thinking) are
//! modelled as explicit entries with a due time instead of timers owned by a
//! scene. Every entry carries the [`LifetimeToken`] of the session that queued
//! it and is dropped unfired once that token is cancelled.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};

use crate::state::{Millis, UnitId};

/// Cancellation flag shared between a session and its pending continuations.
#[derive(Clone, Debug)]
pub struct LifetimeToken {
    live: Arc<AtomicBool>,
}

impl LifetimeToken {
    pub fn new() -> Self {
        Self {
            live: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_live(&self) -> bool {
        self.live.load(AtomicOrdering::Acquire)
    }

    /// Cancels the token for every clone.
    pub fn cancel(&self) {
        self.live.store(false, AtomicOrdering::Release);
    }
}

impl Default for LifetimeToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Work the session resumes once its delay has elapsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Continuation {
    /// A move or attack finished playing out.
    ActionSettled { unit: UnitId },
    /// The acting enemy is ready to pick its next step.
    EnemyDecide { unit: UnitId },
    /// Hand the turn to the next living unit.
    AdvanceTurn,
}

/// A queued continuation with its due time.
#[derive(Clone, Debug)]
pub struct Deferred {
    pub due: Millis,
    pub sequence: u64,
    pub token: LifetimeToken,
    pub continuation: Continuation,
}

impl PartialEq for Deferred {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Deferred {}

impl PartialOrd for Deferred {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Deferred {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl Deferred {
    fn key(&self) -> (Millis, u64) {
        (self.due, self.sequence)
    }
}

/// Min-heap of continuations ordered by `(due, sequence)`.
#[derive(Debug, Default)]
pub struct DeferredQueue {
    now: Millis,
    next_sequence: u64,
    entries: BinaryHeap<Reverse<Deferred>>,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Millis {
        self.now
    }

    /// Queues `continuation` to run `delay_ms` after the current time.
    pub fn schedule(
        &mut self,
        delay_ms: u64,
        token: &LifetimeToken,
        continuation: Continuation,
    ) -> Millis {
        let due = self.now + delay_ms;
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.entries.push(Reverse(Deferred {
            due,
            sequence,
            token: token.clone(),
            continuation,
        }));
        due
    }

    /// Due time of the earliest pending entry.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.entries.peek().map(|Reverse(entry)| entry.due)
    }

    /// Pops the earliest entry due at or before `until`, moving the clock to
    /// its due time.
    pub fn pop_due(&mut self, until: Millis) -> Option<Deferred> {
        let due = self.next_deadline()?;
        if due > until {
            return None;
        }
        let Reverse(entry) = self.entries.pop()?;
        self.now = self.now.max(entry.due);
        Some(entry)
    }

    /// Moves the clock forward. Never moves it backwards.
    pub fn advance_clock(&mut self, to: Millis) {
        self.now = self.now.max(to);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
