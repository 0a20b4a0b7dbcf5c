use crate::state::{Cell, UnitId};

/// Already-resolved player input accepted by the session.
///
/// Raw input (clicks, keys) is mapped to intents by the caller, typically
/// with [`GridIndex::to_cell`](crate::env::GridIndex::to_cell).
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "intent", rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Intent {
    Select { unit: UnitId },
    MoveTo { cell: Cell },
    Attack { target: UnitId },
    EndTurn,
}

impl Intent {
    pub fn name(&self) -> &'static str {
        self.into()
    }
}
