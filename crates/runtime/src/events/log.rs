use tactics_core::{EncounterEvent, EventListener};
use tracing::debug;

/// Mirrors every encounter event into the `tracing` log.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingListener;

impl EventListener for TracingListener {
    fn on_event(&mut self, event: &EncounterEvent) {
        match event {
            EncounterEvent::TurnStarted { unit, side, round } => {
                debug!(target: "encounter", %unit, %side, round, "turn started");
            }
            EncounterEvent::SelectionChanged { unit, reachable } => {
                debug!(target: "encounter", ?unit, reachable = reachable.len(), "selection changed");
            }
            EncounterEvent::UnitMoved { unit, from, path } => {
                let to = path.last().copied().unwrap_or(*from);
                debug!(target: "encounter", %unit, %from, %to, steps = path.len(), "unit moved");
            }
            EncounterEvent::AttackResolved {
                attacker,
                target,
                damage,
                lethal,
                remaining_hp,
            } => {
                debug!(
                    target: "encounter",
                    %attacker,
                    %target,
                    damage,
                    lethal,
                    remaining_hp,
                    "attack resolved"
                );
            }
            EncounterEvent::UnitDied { unit } => {
                debug!(target: "encounter", %unit, "unit died");
            }
            EncounterEvent::RoundAdvanced { round } => {
                debug!(target: "encounter", round, "round advanced");
            }
            EncounterEvent::EncounterEnded { outcome } => {
                debug!(target: "encounter", %outcome, "encounter ended");
            }
        }
    }
}
