//! Intent handling and the move/attack primitives shared with enemy turns.

use tracing::{debug, info};

use super::{
    Continuation, EncounterEvent, EncounterSession, Intent, RejectedIntent, SessionError,
    SessionPhase,
};
use crate::combat::{AttackRejection, is_in_range, resolve_attack};
use crate::env::{Path, PathPlanner};
use crate::state::{Cell, Side, Unit, UnitFlags, UnitId};

impl EncounterSession {
    /// Dispatches an [`Intent`] to the matching `intent_*` method.
    pub fn submit(&mut self, intent: Intent) -> Result<(), SessionError> {
        let result = match intent {
            Intent::Select { unit } => self.intent_select(unit),
            Intent::MoveTo { cell } => self.intent_move_to(cell),
            Intent::Attack { target } => self.intent_attack(target),
            Intent::EndTurn => self.intent_end_turn(),
        };
        if let Err(err) = &result {
            debug!(intent = intent.name(), %err, "intent rejected");
        }
        result
    }

    /// Selects the acting party member and reports the cells it may walk to.
    pub fn intent_select(&mut self, unit: UnitId) -> Result<(), SessionError> {
        let acting = self.acting_player()?;
        if self.roster.get(unit).is_none() {
            return Err(RejectedIntent::UnknownUnit(unit).into());
        }
        if unit != acting {
            return Err(RejectedIntent::NotActingUnit(unit).into());
        }

        self.selection = Some(unit);
        let reachable = self.reachable_cells(unit)?;
        self.emit(EncounterEvent::SelectionChanged {
            unit: Some(unit),
            reachable,
        });
        Ok(())
    }

    /// Walks the selected unit to `cell` along a shortest path.
    pub fn intent_move_to(&mut self, cell: Cell) -> Result<(), SessionError> {
        let acting = self.selected_actor()?;
        let unit = self.acting_unit_ref(acting)?;
        if unit.has_moved() {
            return Err(RejectedIntent::AlreadyMoved(acting).into());
        }
        if !self.grid.in_bounds(cell) {
            return Err(RejectedIntent::OutOfBounds(cell).into());
        }

        let (from, mobility) = (unit.position, unit.mobility);
        let path = self
            .grid
            .with_released(from, |grid| PathPlanner::new(grid).find_path(from, cell))
            .filter(|path| !path.is_empty() && path.len() <= mobility as usize)
            .ok_or(RejectedIntent::Unreachable(cell))?;

        self.perform_move(acting, path);
        Ok(())
    }

    /// Attacks `target` with the selected unit.
    pub fn intent_attack(&mut self, target: UnitId) -> Result<(), SessionError> {
        let acting = self.selected_actor()?;
        let attacker = self.acting_unit_ref(acting)?;
        if attacker.has_attacked() {
            return Err(RejectedIntent::AlreadyAttacked(acting).into());
        }
        let defender = self
            .roster
            .get(target)
            .ok_or(RejectedIntent::UnknownUnit(target))?;
        if defender.side == attacker.side {
            return Err(RejectedIntent::FriendlyTarget(target).into());
        }
        if defender.is_dead() {
            return Err(RejectedIntent::TargetDead(target).into());
        }
        if !is_in_range(attacker, defender) {
            return Err(RejectedIntent::OutOfRange(target).into());
        }

        self.perform_attack(acting, target)
            .map_err(|rejection| SessionError::from(rejected_from(rejection)))
    }

    /// Ends the acting unit's turn after the settle delay.
    pub fn intent_end_turn(&mut self) -> Result<(), SessionError> {
        let acting = self.acting_player()?;
        debug!(unit = %acting, "turn ended by intent");
        self.clear_selection();
        self.schedule_turn_end();
        Ok(())
    }

    /// Cells the unit may still walk to this turn.
    pub fn reachable_cells(&mut self, unit: UnitId) -> Result<Vec<Cell>, SessionError> {
        self.ensure_live()?;
        let Some(unit) = self.roster.get(unit) else {
            return Ok(Vec::new());
        };
        if unit.has_moved() || unit.is_dead() {
            return Ok(Vec::new());
        }

        let (from, mobility) = (unit.position, unit.mobility);
        Ok(self
            .grid
            .with_released(from, |grid| PathPlanner::new(grid).reachable_set(from, mobility))
            .into_iter()
            .collect())
    }

    /// Moves `unit` along `path` and schedules its settle.
    ///
    /// Occupancy follows the unit immediately; the delay only covers the
    /// walk being presented.
    pub(super) fn perform_move(&mut self, unit: UnitId, path: Path) {
        let Some(destination) = path.last().copied() else {
            return;
        };
        let Some(mover) = self.roster.get_mut(unit) else {
            return;
        };

        let from = mover.position;
        mover.position = destination;
        mover.flags.insert(UnitFlags::HAS_MOVED);
        self.grid.set_blocked(from, false);
        self.grid.set_blocked(destination, true);

        info!(unit = %unit, %from, to = %destination, steps = path.len(), "unit moved");

        let delay = self.config.move_step_ms.saturating_mul(path.len() as u64);
        self.emit(EncounterEvent::UnitMoved { unit, from, path });
        self.busy = true;
        self.phase = SessionPhase::ActionInFlight;
        self.schedule(delay, Continuation::ActionSettled { unit });
    }

    /// Resolves an attack and either ends the encounter or schedules the
    /// attacker's flinch.
    pub(super) fn perform_attack(
        &mut self,
        attacker: UnitId,
        target: UnitId,
    ) -> Result<(), AttackRejection> {
        let Some((striker, defender)) = self.roster.pair_mut(attacker, target) else {
            return Err(AttackRejection::SelfTarget(attacker));
        };
        let outcome = resolve_attack(striker, defender, &mut self.grid)?;

        info!(
            attacker = %attacker,
            target = %target,
            damage = outcome.damage,
            remaining_hp = outcome.remaining_hp,
            lethal = outcome.lethal,
            "attack resolved"
        );

        self.emit(EncounterEvent::AttackResolved {
            attacker,
            target,
            damage: outcome.damage,
            lethal: outcome.lethal,
            remaining_hp: outcome.remaining_hp,
        });

        if outcome.lethal {
            self.scheduler.mark_dead(target);
            info!(unit = %target, "unit died");
            self.emit(EncounterEvent::UnitDied { unit: target });
            if self.check_outcome() {
                return Ok(());
            }
        }

        self.busy = true;
        self.phase = SessionPhase::ActionInFlight;
        self.schedule(
            self.config.attack_flinch_ms,
            Continuation::ActionSettled { unit: attacker },
        );
        Ok(())
    }

    pub(super) fn schedule(&mut self, delay_ms: u64, continuation: Continuation) {
        let due = self.queue.schedule(delay_ms, &self.token, continuation);
        debug!(?continuation, %due, "continuation scheduled");
    }

    pub(super) fn clear_selection(&mut self) {
        if self.selection.take().is_some() {
            self.emit(EncounterEvent::SelectionChanged {
                unit: None,
                reachable: Vec::new(),
            });
        }
    }

    /// Checks shared by every intent: session alive, encounter running, a
    /// party member holds the turn and nothing is in flight.
    fn acting_player(&self) -> Result<UnitId, SessionError> {
        match self.phase {
            SessionPhase::TornDown => return Err(SessionError::TornDown),
            SessionPhase::Resolved(_) => return Err(RejectedIntent::EncounterOver.into()),
            _ => {}
        }
        let acting = self
            .scheduler
            .current()
            .ok_or(RejectedIntent::NotPlayerTurn)?;
        if self.side_of(acting) != Some(Side::Player) {
            return Err(RejectedIntent::NotPlayerTurn.into());
        }
        if self.busy {
            return Err(RejectedIntent::Busy.into());
        }
        Ok(acting)
    }

    fn selected_actor(&self) -> Result<UnitId, SessionError> {
        let acting = self.acting_player()?;
        if self.selection != Some(acting) {
            return Err(RejectedIntent::NothingSelected.into());
        }
        Ok(acting)
    }

    fn acting_unit_ref(&self, id: UnitId) -> Result<&Unit, SessionError> {
        Ok(self
            .roster
            .get(id)
            .ok_or(RejectedIntent::UnknownUnit(id))?)
    }
}

fn rejected_from(rejection: AttackRejection) -> RejectedIntent {
    match rejection {
        AttackRejection::AlreadyAttacked(unit) => RejectedIntent::AlreadyAttacked(unit),
        AttackRejection::AttackerDead(unit) => RejectedIntent::NotActingUnit(unit),
        AttackRejection::TargetDead(unit) => RejectedIntent::TargetDead(unit),
        AttackRejection::SelfTarget(unit) => RejectedIntent::FriendlyTarget(unit),
        AttackRejection::OutOfRange { target, .. } => RejectedIntent::OutOfRange(target),
    }
}
