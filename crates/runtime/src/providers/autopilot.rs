//! Plays party members with the same close-and-strike policy enemies use.

use async_trait::async_trait;
use tactics_core::{Decision, EncounterSnapshot, Intent, RejectedIntent, decide};
use tracing::trace;

use crate::api::{IntentProvider, Result};

/// Auto-play provider: select, then attack or close in, then end the turn.
#[derive(Clone, Debug, Default)]
pub struct AutoPilot {
    give_up: bool,
}

impl AutoPilot {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IntentProvider for AutoPilot {
    async fn next_intent(&mut self, view: &EncounterSnapshot) -> Result<Intent> {
        if std::mem::take(&mut self.give_up) {
            return Ok(Intent::EndTurn);
        }
        let Some(actor) = view.acting() else {
            return Ok(Intent::EndTurn);
        };
        if view.selection != Some(actor.id) {
            return Ok(Intent::Select { unit: actor.id });
        }

        let mut grid = view.grid.clone();
        let decision = decide(actor, &view.roster, &mut grid);
        trace!(unit = %actor.id, ?decision, "autopilot decided");

        Ok(match decision {
            Decision::Attack { target } => Intent::Attack { target },
            Decision::Move { path } => match path.last() {
                Some(&cell) => Intent::MoveTo { cell },
                None => Intent::EndTurn,
            },
            Decision::Pass => Intent::EndTurn,
        })
    }

    fn rejected(&mut self, _intent: Intent, _reason: RejectedIntent) {
        self.give_up = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactics_core::{
        Cell, EncounterConfig, EncounterSession, GridDimensions, ResourceMeter, Side, Unit, UnitId,
        UnitStats,
    };

    fn unit(id: u32, side: Side, col: i32, row: i32) -> Unit {
        Unit::new(UnitId(id), format!("u{id}"), side, Cell::new(col, row))
            .with_stats(UnitStats {
                hp: ResourceMeter::full(50),
                str: 5,
                def: 1,
                speed: 10 - id,
                ..UnitStats::default()
            })
            .with_mobility(2)
            .with_range(1)
    }

    fn session(enemy_col: i32) -> EncounterSession {
        EncounterSession::start(
            vec![unit(1, Side::Player, 0, 0)],
            vec![unit(2, Side::Enemy, enemy_col, 0)],
            &[],
            GridDimensions::new(8, 3),
            EncounterConfig::instant(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn selects_before_acting() {
        let session = session(1);
        let mut pilot = AutoPilot::new();

        let intent = pilot.next_intent(&session.snapshot().unwrap()).await.unwrap();
        assert_eq!(intent, Intent::Select { unit: UnitId(1) });
    }

    #[tokio::test]
    async fn attacks_adjacent_and_approaches_distant_targets() {
        let mut pilot = AutoPilot::new();

        let mut near = session(1);
        near.submit(Intent::Select { unit: UnitId(1) }).unwrap();
        let intent = pilot.next_intent(&near.snapshot().unwrap()).await.unwrap();
        assert_eq!(intent, Intent::Attack { target: UnitId(2) });

        let mut far = session(5);
        far.submit(Intent::Select { unit: UnitId(1) }).unwrap();
        let intent = pilot.next_intent(&far.snapshot().unwrap()).await.unwrap();
        assert_eq!(intent, Intent::MoveTo { cell: Cell::new(2, 0) });
    }

    #[tokio::test]
    async fn ends_the_turn_after_a_rejection() {
        let session = session(5);
        let mut pilot = AutoPilot::new();

        pilot.rejected(Intent::EndTurn, RejectedIntent::Busy);
        let intent = pilot.next_intent(&session.snapshot().unwrap()).await.unwrap();
        assert_eq!(intent, Intent::EndTurn);
    }
}
