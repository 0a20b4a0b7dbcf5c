//! Outbound encounter events.

use crate::state::{Cell, Side, UnitId};

/// How an encounter ended, if it has.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Outcome {
    #[default]
    Undecided,
    /// Every enemy is dead.
    Victory,
    /// Every party member is dead.
    Defeat,
}

impl Outcome {
    pub fn is_decided(self) -> bool {
        !matches!(self, Outcome::Undecided)
    }
}

/// Everything an encounter reports to its observers.
#[derive(Clone, Debug, PartialEq, Eq, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum EncounterEvent {
    /// A unit's turn began. Its per-turn flags have been reset.
    TurnStarted { unit: UnitId, side: Side, round: u32 },

    /// Selection changed. `reachable` is empty when nothing is selected or
    /// the unit already moved.
    SelectionChanged {
        unit: Option<UnitId>,
        reachable: Vec<Cell>,
    },

    /// A unit walked `path` (start cell excluded) starting from `from`.
    UnitMoved {
        unit: UnitId,
        from: Cell,
        path: Vec<Cell>,
    },

    AttackResolved {
        attacker: UnitId,
        target: UnitId,
        damage: u32,
        lethal: bool,
        remaining_hp: u32,
    },

    UnitDied { unit: UnitId },

    /// A new round began. Also emitted for round 1.
    RoundAdvanced { round: u32 },

    /// Emitted exactly once per encounter.
    EncounterEnded { outcome: Outcome },
}

impl EncounterEvent {
    /// Stable snake_case name of the variant.
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// Observer invoked synchronously for every emitted event.
pub trait EventListener: Send {
    fn on_event(&mut self, event: &EncounterEvent);
}

impl<F> EventListener for F
where
    F: FnMut(&EncounterEvent) + Send,
{
    fn on_event(&mut self, event: &EncounterEvent) {
        self(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_names_are_snake_case() {
        let event = EncounterEvent::RoundAdvanced { round: 2 };
        assert_eq!(event.name(), "round_advanced");
        assert_eq!(Outcome::Victory.to_string(), "victory");
        assert!(!Outcome::Undecided.is_decided());
    }
}
