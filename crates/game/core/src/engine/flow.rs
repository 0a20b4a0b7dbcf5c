//! Virtual time, continuations and turn hand-over.

use tracing::{debug, info, warn};

use super::policy::{self, Decision};
use super::{
    Continuation, EncounterEvent, EncounterSession, Outcome, SessionError, SessionPhase,
    TurnStart,
};
use crate::state::{Side, UnitId};

impl EncounterSession {
    /// Advances virtual time, firing every continuation that falls due.
    ///
    /// Continuations fire in `(due, sequence)` order and may queue further
    /// continuations; those also fire within this call if they fall due
    /// before the new time.
    pub fn advance_time(&mut self, elapsed_ms: u64) -> Result<(), SessionError> {
        self.ensure_live()?;

        let until = self.queue.now() + elapsed_ms;
        while let Some(entry) = self.queue.pop_due(until) {
            if !entry.token.is_live() {
                debug!(continuation = ?entry.continuation, "dropping continuation of a dead session");
                continue;
            }
            self.resume(entry.continuation);
        }
        self.queue.advance_clock(until);
        Ok(())
    }

    /// Fires continuations until the session waits on a party member, the
    /// encounter ends or nothing is left queued.
    ///
    /// Returns the virtual time that elapsed.
    pub fn run_until_idle(&mut self) -> Result<u64, SessionError> {
        let started = self.queue.now();
        while let Some(deadline) = self.next_deadline() {
            if self.awaiting_intent() {
                break;
            }
            self.advance_time(deadline - self.queue.now())?;
        }
        Ok(self.queue.now() - started)
    }

    /// Cancels every pending continuation and detaches all listeners.
    ///
    /// Later calls into the session return [`SessionError::TornDown`].
    pub fn teardown(&mut self) {
        if self.is_torn_down() {
            return;
        }
        info!(pending = self.queue.len(), "encounter torn down");
        self.token.cancel();
        self.queue.clear();
        self.listeners.clear();
        self.selection = None;
        self.busy = false;
        self.phase = SessionPhase::TornDown;
    }

    pub(super) fn begin_turn(&mut self, turn: TurnStart) {
        if turn.new_round {
            info!(round = turn.round, "round started");
            self.emit(EncounterEvent::RoundAdvanced { round: turn.round });
        }
        self.clear_selection();

        let Some(unit) = self.roster.get_mut(turn.unit) else {
            return;
        };
        unit.begin_turn();
        let side = unit.side;

        info!(unit = %turn.unit, %side, round = turn.round, "turn started");
        self.emit(EncounterEvent::TurnStarted {
            unit: turn.unit,
            side,
            round: turn.round,
        });

        match side {
            Side::Player => {
                self.busy = false;
                self.phase = SessionPhase::AwaitingIntent;
            }
            Side::Enemy => {
                self.busy = true;
                self.phase = SessionPhase::EnemyDeciding;
                self.schedule_decision(turn.unit);
            }
        }
    }

    /// Ends the encounter if one side is wiped out. Returns true if it ended.
    pub(super) fn check_outcome(&mut self) -> bool {
        let outcome = if self.roster.is_wiped(Side::Enemy) {
            Outcome::Victory
        } else if self.roster.is_wiped(Side::Player) {
            Outcome::Defeat
        } else {
            return false;
        };

        info!(%outcome, round = self.scheduler.round(), "encounter ended");
        self.outcome = outcome;
        self.phase = SessionPhase::Resolved(outcome);
        self.busy = false;
        self.queue.clear();
        self.clear_selection();
        self.emit(EncounterEvent::EncounterEnded { outcome });
        true
    }

    fn resume(&mut self, continuation: Continuation) {
        if self.outcome.is_decided() {
            return;
        }
        debug!(?continuation, now = %self.queue.now(), "continuation fired");

        match continuation {
            Continuation::ActionSettled { unit } => self.action_settled(unit),
            Continuation::EnemyDecide { unit } => self.enemy_decide(unit),
            Continuation::AdvanceTurn => self.advance_turn(),
        }
    }

    fn action_settled(&mut self, unit: UnitId) {
        if self.scheduler.current() != Some(unit) {
            debug!(unit = %unit, "stale settle ignored");
            return;
        }
        let Some(actor) = self.roster.get(unit) else {
            return;
        };
        let (finished, side) = (actor.is_dead() || actor.is_spent(), actor.side);

        if finished {
            self.schedule_turn_end();
            return;
        }
        match side {
            Side::Player => {
                self.busy = false;
                self.phase = SessionPhase::AwaitingIntent;
            }
            Side::Enemy => {
                self.phase = SessionPhase::EnemyDeciding;
                self.schedule_decision(unit);
            }
        }
    }

    fn enemy_decide(&mut self, unit: UnitId) {
        if self.scheduler.current() != Some(unit) {
            debug!(unit = %unit, "stale decision ignored");
            return;
        }
        let Some(actor) = self.roster.get(unit).cloned() else {
            return;
        };

        let decision = policy::decide(&actor, &self.roster, &mut self.grid);
        debug!(unit = %unit, ?decision, "enemy decided");

        match decision {
            Decision::Attack { target } => {
                if let Err(rejection) = self.perform_attack(unit, target) {
                    warn!(unit = %unit, %rejection, "enemy attack rejected");
                    self.schedule_turn_end();
                }
            }
            Decision::Move { path } => self.perform_move(unit, path),
            Decision::Pass => self.schedule_turn_end(),
        }
    }

    fn advance_turn(&mut self) {
        match self.scheduler.advance() {
            Ok(Some(turn)) => self.begin_turn(turn),
            Ok(None) => {
                debug!("no living unit left to act");
                self.busy = false;
            }
            Err(err) => warn!(%err, "turn advance failed"),
        }
    }

    fn schedule_decision(&mut self, unit: UnitId) {
        self.schedule(self.config.ai_think_ms, Continuation::EnemyDecide { unit });
    }

    pub(super) fn schedule_turn_end(&mut self) {
        self.busy = true;
        self.phase = SessionPhase::ActionInFlight;
        self.schedule(self.config.settle_ms, Continuation::AdvanceTurn);
    }
}
