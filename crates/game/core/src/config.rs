use crate::env::WorldMapping;
use crate::state::WorldPoint;

/// Encounter configuration constants and tunable parameters.
///
/// Delays stand in for presentation time (walk animation, hit flinch, enemy
/// "thinking"). They are measured on the session's virtual clock, so tests
/// can drive them deterministically.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EncounterConfig {
    /// Maximum number of party members allowed into one encounter.
    pub max_party_size: usize,
    /// Size of one tile in world units.
    pub tile_size: f32,
    /// World-space position of the grid's top-left corner.
    pub origin: WorldPoint,
    /// Delay per path step before a move settles.
    pub move_step_ms: u64,
    /// Delay after an attack resolves before the attacker may act again.
    pub attack_flinch_ms: u64,
    /// Delay before each enemy decision.
    pub ai_think_ms: u64,
    /// Delay between a turn ending and the next one starting.
    pub settle_ms: u64,
}

impl EncounterConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_PARTY_SIZE: usize = 4;
    pub const DEFAULT_TILE_SIZE: f32 = 64.0;
    pub const DEFAULT_MOVE_STEP_MS: u64 = 150;
    pub const DEFAULT_ATTACK_FLINCH_MS: u64 = 300;
    pub const DEFAULT_AI_THINK_MS: u64 = 500;
    pub const DEFAULT_SETTLE_MS: u64 = 300;

    pub fn new() -> Self {
        Self {
            max_party_size: Self::DEFAULT_MAX_PARTY_SIZE,
            tile_size: Self::DEFAULT_TILE_SIZE,
            origin: WorldPoint::default(),
            move_step_ms: Self::DEFAULT_MOVE_STEP_MS,
            attack_flinch_ms: Self::DEFAULT_ATTACK_FLINCH_MS,
            ai_think_ms: Self::DEFAULT_AI_THINK_MS,
            settle_ms: Self::DEFAULT_SETTLE_MS,
        }
    }

    /// Configuration with every delay set to zero.
    ///
    /// Continuations still go through the queue, but all of them are due
    /// immediately.
    pub fn instant() -> Self {
        Self {
            move_step_ms: 0,
            attack_flinch_ms: 0,
            ai_think_ms: 0,
            settle_ms: 0,
            ..Self::new()
        }
    }

    pub fn world_mapping(&self) -> WorldMapping {
        WorldMapping::new(self.origin, self.tile_size)
    }
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self::new()
    }
}
