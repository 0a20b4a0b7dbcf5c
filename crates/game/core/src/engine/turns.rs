//! Initiative-ordered turn scheduling.

use tracing::debug;

use crate::error::{ErrorSeverity, GameError};
use crate::state::UnitId;

/// Errors that can occur during turn operations
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnError {
    #[error("turn scheduler advanced before start")]
    NotStarted,
}

impl GameError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotStarted => "turn_not_started",
        }
    }
}

/// Speed entry fed to [`TurnScheduler::start`], in roster order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Initiative {
    pub unit: UnitId,
    pub speed: u32,
}

impl Initiative {
    pub fn new(unit: UnitId, speed: u32) -> Self {
        Self { unit, speed }
    }
}

/// A unit's turn has begun.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnStart {
    pub unit: UnitId,
    pub round: u32,
    /// True for the first turn of a round (including round 1).
    pub new_round: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SchedulerPhase {
    /// `start` has not been called.
    #[default]
    Idle,
    /// A unit holds the turn.
    UnitTurn,
    /// Started, but no living unit is left to act.
    Exhausted,
}

/// Round-robin scheduler over a fixed initiative order.
///
/// The order is computed once at [`start`](Self::start): descending speed,
/// ties kept in the order the initiatives were supplied. Deaths only filter
/// the order, they never re-sort it.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnScheduler {
    order: Vec<UnitId>,
    alive: Vec<bool>,
    cursor: Option<usize>,
    round: u32,
    started: bool,
}

impl TurnScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes the turn order and hands the first turn to the fastest unit.
    ///
    /// Calling `start` again resets the scheduler.
    pub fn start(&mut self, initiatives: impl IntoIterator<Item = Initiative>) -> Option<TurnStart> {
        let mut entries: Vec<Initiative> = initiatives.into_iter().collect();
        // sort_by is stable, so equal speeds keep roster order.
        entries.sort_by(|a, b| b.speed.cmp(&a.speed));

        self.order = entries.iter().map(|entry| entry.unit).collect();
        self.alive = vec![true; self.order.len()];
        self.cursor = None;
        self.round = 1;
        self.started = true;

        debug!(order = ?self.order, "turn order computed");

        let first = self.order.first().copied()?;
        self.cursor = Some(0);
        Some(TurnStart {
            unit: first,
            round: self.round,
            new_round: true,
        })
    }

    /// Moves the turn to the next living unit.
    ///
    /// Wrapping past the end of the order starts a new round. Returns
    /// `Ok(None)` when nobody is left alive.
    pub fn advance(&mut self) -> Result<Option<TurnStart>, TurnError> {
        if !self.started {
            return Err(TurnError::NotStarted);
        }
        if !self.alive.iter().any(|&alive| alive) {
            self.cursor = None;
            return Ok(None);
        }

        let len = self.order.len();
        let mut index = self.cursor.map_or(0, |cursor| cursor + 1);
        let mut new_round = false;

        // At least one unit is alive, so one full lap always finds it.
        for _ in 0..=len {
            if index >= len {
                index = 0;
                self.round += 1;
                new_round = true;
                debug!(round = self.round, "round wrapped");
            }
            if self.alive[index] {
                self.cursor = Some(index);
                return Ok(Some(TurnStart {
                    unit: self.order[index],
                    round: self.round,
                    new_round,
                }));
            }
            index += 1;
        }

        self.cursor = None;
        Ok(None)
    }

    /// Removes a unit from future turns. Returns false for unknown ids.
    ///
    /// If the unit currently holds the turn it keeps it until `advance`.
    pub fn mark_dead(&mut self, unit: UnitId) -> bool {
        match self.order.iter().position(|&id| id == unit) {
            Some(index) => {
                self.alive[index] = false;
                true
            }
            None => false,
        }
    }

    pub fn current(&self) -> Option<UnitId> {
        self.cursor.map(|index| self.order[index])
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    /// Living units in initiative order.
    pub fn turn_order(&self) -> Vec<UnitId> {
        self.order
            .iter()
            .zip(&self.alive)
            .filter(|(_, alive)| **alive)
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn phase(&self) -> SchedulerPhase {
        match (self.started, self.cursor) {
            (false, _) => SchedulerPhase::Idle,
            (true, Some(_)) => SchedulerPhase::UnitTurn,
            (true, None) => SchedulerPhase::Exhausted,
        }
    }
}
