use super::{EncounterSession, Outcome, SessionError};
use crate::state::{Side, UnitId};

/// Surviving party member's state handed back after an encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurvivorSummary {
    pub id: UnitId,
    pub hp: u32,
    pub max_hp: u32,
    pub mp: u32,
}

/// Result of an encounter for the surrounding game.
///
/// Carries stat deltas only; positions are meaningless outside the battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterSummary {
    pub outcome: Outcome,
    pub rounds: u32,
    pub survivors: Vec<SurvivorSummary>,
    /// Sum of defeated enemies' rewards on victory, zero otherwise.
    pub experience: u32,
}

impl EncounterSession {
    /// Fails with [`SessionError::TornDown`] once the session is torn down.
    pub fn summary(&self) -> Result<EncounterSummary, SessionError> {
        self.ensure_live()?;
        let survivors = self
            .roster
            .living(Side::Player)
            .map(|unit| SurvivorSummary {
                id: unit.id,
                hp: unit.stats.hp.current,
                max_hp: unit.stats.hp.maximum,
                mp: unit.stats.mp.current,
            })
            .collect();

        let experience = match self.outcome {
            Outcome::Victory => self
                .roster
                .side(Side::Enemy)
                .filter(|unit| unit.is_dead())
                .map(|unit| unit.exp_reward)
                .sum(),
            _ => 0,
        };

        Ok(EncounterSummary {
            outcome: self.outcome,
            rounds: self.scheduler.round(),
            survivors,
            experience,
        })
    }
}
