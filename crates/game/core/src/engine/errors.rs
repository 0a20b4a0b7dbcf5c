//! Error types surfaced by [`EncounterSession`](super::EncounterSession).

use crate::error::{ErrorSeverity, GameError};
use crate::state::{Cell, UnitId};

/// Roster or battlefield rejected while starting an encounter.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SetupError {
    #[error("encounter needs at least one party member")]
    EmptyParty,

    #[error("encounter needs at least one enemy")]
    NoEnemies,

    #[error("party of {size} exceeds the limit of {max}")]
    PartyTooLarge { size: usize, max: usize },

    #[error("unit id {0} is used more than once")]
    DuplicateUnit(UnitId),

    #[error("grid dimensions {width}x{height} are empty")]
    EmptyGrid { width: u32, height: u32 },

    #[error("unit {unit} placed out of bounds at {cell}")]
    OutOfBounds { unit: UnitId, cell: Cell },

    #[error("obstacle at {0} is out of bounds")]
    ObstacleOutOfBounds(Cell),

    #[error("unit {unit} placed on occupied cell {cell}")]
    Overlap { unit: UnitId, cell: Cell },
}

impl GameError for SetupError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyParty => "setup_empty_party",
            Self::NoEnemies => "setup_no_enemies",
            Self::PartyTooLarge { .. } => "setup_party_too_large",
            Self::DuplicateUnit(_) => "setup_duplicate_unit",
            Self::EmptyGrid { .. } => "setup_empty_grid",
            Self::OutOfBounds { .. } => "setup_out_of_bounds",
            Self::ObstacleOutOfBounds(_) => "setup_obstacle_out_of_bounds",
            Self::Overlap { .. } => "setup_overlap",
        }
    }
}

/// Reasons an intent was refused. A rejected intent never changes state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RejectedIntent {
    #[error("an action is already in flight")]
    Busy,

    #[error("it is not a player unit's turn")]
    NotPlayerTurn,

    #[error("the encounter is over")]
    EncounterOver,

    #[error("unit {0} is not part of this encounter")]
    UnknownUnit(UnitId),

    #[error("unit {0} is not the acting unit")]
    NotActingUnit(UnitId),

    #[error("the acting unit must be selected first")]
    NothingSelected,

    #[error("unit {0} has already moved this turn")]
    AlreadyMoved(UnitId),

    #[error("unit {0} has already attacked this turn")]
    AlreadyAttacked(UnitId),

    #[error("cell {0} is not reachable this turn")]
    Unreachable(Cell),

    #[error("cell {0} is outside the grid")]
    OutOfBounds(Cell),

    #[error("target {0} is out of range")]
    OutOfRange(UnitId),

    #[error("target {0} is already dead")]
    TargetDead(UnitId),

    #[error("target {0} fights on the same side")]
    FriendlyTarget(UnitId),
}

impl GameError for RejectedIntent {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Busy => "intent_busy",
            Self::NotPlayerTurn => "intent_not_player_turn",
            Self::EncounterOver => "intent_encounter_over",
            Self::UnknownUnit(_) => "intent_unknown_unit",
            Self::NotActingUnit(_) => "intent_not_acting_unit",
            Self::NothingSelected => "intent_nothing_selected",
            Self::AlreadyMoved(_) => "intent_already_moved",
            Self::AlreadyAttacked(_) => "intent_already_attacked",
            Self::Unreachable(_) => "intent_unreachable",
            Self::OutOfBounds(_) => "intent_out_of_bounds",
            Self::OutOfRange(_) => "intent_out_of_range",
            Self::TargetDead(_) => "intent_target_dead",
            Self::FriendlyTarget(_) => "intent_friendly_target",
        }
    }
}

/// Errors returned by session operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionError {
    #[error("intent rejected: {0}")]
    Rejected(#[from] RejectedIntent),

    #[error("session has been torn down")]
    TornDown,
}

impl SessionError {
    /// The rejection reason, if this error is a rejected intent.
    pub fn rejection(&self) -> Option<RejectedIntent> {
        match self {
            Self::Rejected(reason) => Some(*reason),
            Self::TornDown => None,
        }
    }
}

impl GameError for SessionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Rejected(inner) => inner.severity(),
            Self::TornDown => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Rejected(inner) => inner.error_code(),
            Self::TornDown => "session_torn_down",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_intents_are_recoverable_and_teardown_is_internal() {
        let rejected = SessionError::from(RejectedIntent::Busy);
        assert!(rejected.severity().is_recoverable());
        assert_eq!(rejected.error_code(), "intent_busy");
        assert_eq!(rejected.rejection(), Some(RejectedIntent::Busy));

        assert!(SessionError::TornDown.severity().is_internal());
        assert_eq!(SessionError::TornDown.rejection(), None);
    }

    #[test]
    fn setup_errors_are_validation_failures() {
        let err = SetupError::PartyTooLarge { size: 5, max: 4 };
        assert_eq!(err.severity(), ErrorSeverity::Validation);
        assert_eq!(err.to_string(), "party of 5 exceeds the limit of 4");
    }
}
