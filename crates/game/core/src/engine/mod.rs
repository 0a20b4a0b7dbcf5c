//! Encounter state machine.
//!
//! [`EncounterSession`] owns everything one battle needs (grid, roster, turn
//! scheduler and deferred queue) and is driven from outside by intents and
//! elapsed virtual time. Presentation layers observe it through
//! [`EncounterEvent`]s and never mutate it directly.
//!
//! Intent handling lives in `actions`, continuation and turn flow in `flow`.

mod actions;
mod deferred;
mod errors;
mod events;
mod flow;
mod intent;
pub mod policy;
mod summary;
mod turns;

pub use deferred::{Continuation, Deferred, DeferredQueue, LifetimeToken};
pub use errors::{RejectedIntent, SessionError, SetupError};
pub use events::{EncounterEvent, EventListener, Outcome};
pub use intent::Intent;
pub use summary::{EncounterSummary, SurvivorSummary};
pub use turns::{Initiative, SchedulerPhase, TurnError, TurnScheduler, TurnStart};

use std::collections::BTreeSet;

use tracing::info;

use crate::config::EncounterConfig;
use crate::env::{GridDimensions, GridIndex};
use crate::state::{Cell, Millis, Roster, Side, Unit, UnitId};

/// Where the session is in its turn cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionPhase {
    /// A party member holds the turn and no action is playing out.
    AwaitingIntent,
    /// A move, attack or end-of-turn settle is playing out.
    ActionInFlight,
    /// An enemy holds the turn; the policy drives it.
    EnemyDeciding,
    Resolved(Outcome),
    TornDown,
}

/// Read-only copy of the battlefield handed to intent providers.
#[derive(Clone, Debug)]
pub struct EncounterSnapshot {
    pub roster: Roster,
    pub grid: GridIndex,
    pub acting_unit: Option<UnitId>,
    pub selection: Option<UnitId>,
    pub round: u32,
}

impl EncounterSnapshot {
    pub fn acting(&self) -> Option<&Unit> {
        self.acting_unit.and_then(|id| self.roster.get(id))
    }
}

/// A single running encounter.
pub struct EncounterSession {
    config: EncounterConfig,
    grid: GridIndex,
    roster: Roster,
    scheduler: TurnScheduler,
    queue: DeferredQueue,
    token: LifetimeToken,
    phase: SessionPhase,
    outcome: Outcome,
    selection: Option<UnitId>,
    busy: bool,
    /// Events with the virtual time they were emitted at.
    outbox: Vec<(Millis, EncounterEvent)>,
    listeners: Vec<Box<dyn EventListener>>,
}

impl std::fmt::Debug for EncounterSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncounterSession")
            .field("phase", &self.phase)
            .field("round", &self.scheduler.round())
            .field("acting_unit", &self.scheduler.current())
            .field("busy", &self.busy)
            .field("now", &self.queue.now())
            .field("pending", &self.queue.len())
            .finish_non_exhaustive()
    }
}

impl EncounterSession {
    /// Validates the roster, builds the grid and hands out the first turn.
    ///
    /// Each unit's side is taken from the list it arrives in. Units that
    /// arrive already dead stay in the roster but neither block cells nor
    /// receive turns.
    pub fn start(
        party: Vec<Unit>,
        enemies: Vec<Unit>,
        obstacles: &[Cell],
        dimensions: GridDimensions,
        config: EncounterConfig,
    ) -> Result<Self, SetupError> {
        Self::start_with_listeners(party, enemies, obstacles, dimensions, config, Vec::new())
    }

    /// Like [`start`](Self::start), with listeners attached before the
    /// opening events are emitted.
    pub fn start_with_listeners(
        party: Vec<Unit>,
        enemies: Vec<Unit>,
        obstacles: &[Cell],
        dimensions: GridDimensions,
        config: EncounterConfig,
        listeners: Vec<Box<dyn EventListener>>,
    ) -> Result<Self, SetupError> {
        validate_sides(&party, &enemies, config.max_party_size)?;
        if dimensions.cell_count() == 0 {
            return Err(SetupError::EmptyGrid {
                width: dimensions.width,
                height: dimensions.height,
            });
        }

        let mut grid = GridIndex::new(dimensions, config.world_mapping());
        for &cell in obstacles {
            if !grid.in_bounds(cell) {
                return Err(SetupError::ObstacleOutOfBounds(cell));
            }
            grid.set_blocked(cell, true);
        }

        let party = party.into_iter().map(|unit| enlist(unit, Side::Player));
        let enemies = enemies.into_iter().map(|unit| enlist(unit, Side::Enemy));
        let mut roster = Roster::from_sides(party.collect(), enemies.collect());
        let mut seen = BTreeSet::new();
        for unit in roster.iter() {
            if !seen.insert(unit.id) {
                return Err(SetupError::DuplicateUnit(unit.id));
            }
            if !grid.in_bounds(unit.position) {
                return Err(SetupError::OutOfBounds {
                    unit: unit.id,
                    cell: unit.position,
                });
            }
            if unit.is_dead() {
                continue;
            }
            if grid.is_blocked(unit.position) {
                return Err(SetupError::Overlap {
                    unit: unit.id,
                    cell: unit.position,
                });
            }
            grid.set_blocked(unit.position, true);
        }

        for unit in roster.iter_mut() {
            unit.begin_turn();
        }

        let mut session = Self {
            config,
            grid,
            roster,
            scheduler: TurnScheduler::new(),
            queue: DeferredQueue::new(),
            token: LifetimeToken::new(),
            phase: SessionPhase::ActionInFlight,
            outcome: Outcome::Undecided,
            selection: None,
            busy: true,
            outbox: Vec::new(),
            listeners,
        };

        info!(
            width = dimensions.width,
            height = dimensions.height,
            units = session.roster.len(),
            obstacles = obstacles.len(),
            "encounter started"
        );

        let initiatives: Vec<Initiative> = session
            .roster
            .iter()
            .filter(|unit| unit.is_alive())
            .map(|unit| Initiative::new(unit.id, unit.stats.speed))
            .collect();
        if let Some(first) = session.scheduler.start(initiatives) {
            session.begin_turn(first);
        }

        Ok(session)
    }

    /// Registers an observer for subsequent events.
    pub fn attach(&mut self, listener: impl EventListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    // ===== queries =====

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.roster.get(id)
    }

    pub fn units(&self) -> &[Unit] {
        self.roster.as_slice()
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn round(&self) -> u32 {
        self.scheduler.round()
    }

    pub fn acting_unit(&self) -> Option<UnitId> {
        self.scheduler.current()
    }

    pub fn selection(&self) -> Option<UnitId> {
        self.selection
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn grid(&self) -> &GridIndex {
        &self.grid
    }

    pub fn config(&self) -> &EncounterConfig {
        &self.config
    }

    /// Living units in initiative order.
    pub fn turn_order(&self) -> Vec<UnitId> {
        self.scheduler.turn_order()
    }

    /// Current virtual time.
    pub fn now(&self) -> Millis {
        self.queue.now()
    }

    /// Due time of the earliest pending continuation.
    pub fn next_deadline(&self) -> Option<Millis> {
        match self.phase {
            SessionPhase::TornDown => None,
            _ => self.queue.next_deadline(),
        }
    }

    /// Token cancelled on teardown; external drivers check it before
    /// resuming the session.
    pub fn lifetime_token(&self) -> LifetimeToken {
        self.token.clone()
    }

    pub fn is_torn_down(&self) -> bool {
        matches!(self.phase, SessionPhase::TornDown)
    }

    /// True when a party member holds the turn and intents are accepted.
    pub fn awaiting_intent(&self) -> bool {
        matches!(self.phase, SessionPhase::AwaitingIntent)
    }

    /// Takes every event emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<EncounterEvent> {
        self.drain_stamped_events()
            .into_iter()
            .map(|(_, event)| event)
            .collect()
    }

    /// Like [`drain_events`](Self::drain_events), keeping the virtual time
    /// each event was emitted at.
    pub fn drain_stamped_events(&mut self) -> Vec<(Millis, EncounterEvent)> {
        std::mem::take(&mut self.outbox)
    }

    /// Copy of the battlefield for intent providers.
    pub fn snapshot(&self) -> Result<EncounterSnapshot, SessionError> {
        self.ensure_live()?;
        Ok(EncounterSnapshot {
            roster: self.roster.clone(),
            grid: self.grid.clone(),
            acting_unit: self.scheduler.current(),
            selection: self.selection,
            round: self.scheduler.round(),
        })
    }

    fn ensure_live(&self) -> Result<(), SessionError> {
        if self.is_torn_down() {
            return Err(SessionError::TornDown);
        }
        Ok(())
    }

    fn emit(&mut self, event: EncounterEvent) {
        for listener in &mut self.listeners {
            listener.on_event(&event);
        }
        self.outbox.push((self.queue.now(), event));
    }

    fn side_of(&self, id: UnitId) -> Option<Side> {
        self.roster.get(id).map(|unit| unit.side)
    }
}

fn enlist(mut unit: Unit, side: Side) -> Unit {
    unit.side = side;
    unit
}

fn validate_sides(party: &[Unit], enemies: &[Unit], max_party_size: usize) -> Result<(), SetupError> {
    if !party.iter().any(Unit::is_alive) {
        return Err(SetupError::EmptyParty);
    }
    if !enemies.iter().any(Unit::is_alive) {
        return Err(SetupError::NoEnemies);
    }
    if party.len() > max_party_size {
        return Err(SetupError::PartyTooLarge {
            size: party.len(),
            max: max_party_size,
        });
    }
    Ok(())
}
