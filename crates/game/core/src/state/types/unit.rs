//! Unit state and stat blocks.

use bitflags::bitflags;

use super::{Cell, ResourceMeter, UnitId};

/// Which side of the encounter a unit fights for.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Side {
    /// Controlled by the external caller (party member).
    Player,
    /// Controlled by the built-in enemy policy.
    Enemy,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

/// Base stat block shared by party members and monsters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitStats {
    pub hp: ResourceMeter,
    pub mp: ResourceMeter,
    /// Physical attack.
    pub str: u32,
    /// Magical attack. Carried for the caller; basic attacks are physical.
    pub int: u32,
    /// Physical defense.
    pub def: u32,
    /// Magical resistance.
    pub res: u32,
    /// Initiative. Higher acts earlier in the round.
    pub speed: u32,
}

bitflags! {
    /// Per-turn and lifetime markers for a unit.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct UnitFlags: u8 {
        const HAS_MOVED    = 1 << 0;
        const HAS_ATTACKED = 1 << 1;
        const DEAD         = 1 << 2;
    }
}

impl UnitFlags {
    /// Flags cleared at the start of each of the unit's turns.
    pub const TURN: Self = Self::HAS_MOVED.union(Self::HAS_ATTACKED);
}

/// A combatant in the encounter roster.
///
/// Units carry only value data. Presentation layers look up their own
/// sprites by [`UnitId`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    pub side: Side,
    pub position: Cell,
    pub stats: UnitStats,
    /// Maximum number of steps per move action.
    pub mobility: u32,
    /// Maximum Manhattan distance of a basic attack.
    pub range: u32,
    /// Experience granted to the party when this unit is defeated.
    #[cfg_attr(feature = "serde", serde(default))]
    pub exp_reward: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flags: UnitFlags,
}

impl Unit {
    pub fn new(id: UnitId, name: impl Into<String>, side: Side, position: Cell) -> Self {
        Self {
            id,
            name: name.into(),
            side,
            position,
            stats: UnitStats::default(),
            mobility: 0,
            range: 1,
            exp_reward: 0,
            flags: UnitFlags::empty(),
        }
    }

    pub fn with_stats(mut self, stats: UnitStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_mobility(mut self, mobility: u32) -> Self {
        self.mobility = mobility;
        self
    }

    pub fn with_range(mut self, range: u32) -> Self {
        self.range = range;
        self
    }

    pub fn with_exp_reward(mut self, exp_reward: u32) -> Self {
        self.exp_reward = exp_reward;
        self
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.flags.contains(UnitFlags::DEAD)
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.is_dead()
    }

    #[inline]
    pub fn has_moved(&self) -> bool {
        self.flags.contains(UnitFlags::HAS_MOVED)
    }

    #[inline]
    pub fn has_attacked(&self) -> bool {
        self.flags.contains(UnitFlags::HAS_ATTACKED)
    }

    /// True once both the move and the attack of the current turn are spent.
    pub fn is_spent(&self) -> bool {
        self.flags.contains(UnitFlags::TURN)
    }

    /// Clears the per-turn markers.
    pub fn begin_turn(&mut self) {
        self.flags.remove(UnitFlags::TURN);
    }

    pub fn hp(&self) -> u32 {
        self.stats.hp.current
    }
}
