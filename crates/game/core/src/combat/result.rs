//! Attack resolution and its outcome types.

use crate::env::GridIndex;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{Unit, UnitFlags, UnitId};

use super::damage::{apply_damage, calculate_damage};

/// Result of a resolved attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackOutcome {
    /// Damage dealt, always at least [`MINIMUM_DAMAGE`](super::MINIMUM_DAMAGE).
    pub damage: u32,
    /// True if this attack killed the defender.
    pub lethal: bool,
    /// Defender hp after the attack.
    pub remaining_hp: u32,
}

/// Preconditions an attack failed. Nothing was changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackRejection {
    #[error("unit {0} already attacked this turn")]
    AlreadyAttacked(UnitId),

    #[error("unit {0} is dead and cannot attack")]
    AttackerDead(UnitId),

    #[error("target {0} is already dead")]
    TargetDead(UnitId),

    #[error("unit {0} cannot attack itself")]
    SelfTarget(UnitId),

    #[error("target {target} is {distance} tiles away, beyond range {range}")]
    OutOfRange {
        target: UnitId,
        distance: u32,
        range: u32,
    },
}

impl GameError for AttackRejection {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyAttacked(_) => "attack_already_attacked",
            Self::AttackerDead(_) => "attack_attacker_dead",
            Self::TargetDead(_) => "attack_target_dead",
            Self::SelfTarget(_) => "attack_self_target",
            Self::OutOfRange { .. } => "attack_out_of_range",
        }
    }
}

/// True if `defender` is within `attacker`'s reach (Manhattan distance).
///
/// Pure check for AI and UI pre-filtering; does not look at flags.
pub fn is_in_range(attacker: &Unit, defender: &Unit) -> bool {
    attacker.position.distance(defender.position) <= attacker.range
}

/// Resolve a basic attack.
///
/// On success the attacker is marked as having attacked and the defender
/// loses hp. A lethal hit marks the defender dead and releases its cell in
/// `grid`; that release is the only grid mutation made by combat.
pub fn resolve_attack(
    attacker: &mut Unit,
    defender: &mut Unit,
    grid: &mut GridIndex,
) -> Result<AttackOutcome, AttackRejection> {
    if attacker.id == defender.id {
        return Err(AttackRejection::SelfTarget(attacker.id));
    }
    if attacker.is_dead() {
        return Err(AttackRejection::AttackerDead(attacker.id));
    }
    if attacker.has_attacked() {
        return Err(AttackRejection::AlreadyAttacked(attacker.id));
    }
    if defender.is_dead() {
        return Err(AttackRejection::TargetDead(defender.id));
    }
    if !is_in_range(attacker, defender) {
        return Err(AttackRejection::OutOfRange {
            target: defender.id,
            distance: attacker.position.distance(defender.position),
            range: attacker.range,
        });
    }

    let damage = calculate_damage(attacker.stats.str, defender.stats.def);
    let remaining_hp = apply_damage(defender.stats.hp.current, damage);
    defender.stats.hp.current = remaining_hp;
    attacker.flags.insert(UnitFlags::HAS_ATTACKED);

    let lethal = remaining_hp == 0;
    if lethal {
        defender.flags.insert(UnitFlags::DEAD);
        grid.set_blocked(defender.position, false);
    }

    Ok(AttackOutcome {
        damage,
        lethal,
        remaining_hp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{GridDimensions, WorldMapping};
    use crate::state::{Cell, ResourceMeter, Side, UnitStats};

    fn unit(id: u32, side: Side, position: Cell, hp: u32, str: u32, def: u32) -> Unit {
        Unit::new(UnitId(id), format!("u{id}"), side, position)
            .with_stats(UnitStats {
                hp: ResourceMeter::full(hp),
                str,
                def,
                ..UnitStats::default()
            })
            .with_range(1)
    }

    fn grid_with(units: &[&Unit]) -> GridIndex {
        let mut grid = GridIndex::new(GridDimensions::new(8, 8), WorldMapping::default());
        for unit in units {
            grid.set_blocked(unit.position, true);
        }
        grid
    }

    #[test]
    fn damage_floor_applies_when_defense_exceeds_strength() {
        let mut attacker = unit(1, Side::Player, Cell::new(1, 1), 10, 5, 0);
        let mut defender = unit(2, Side::Enemy, Cell::new(2, 1), 10, 0, 8);
        let mut grid = grid_with(&[&attacker, &defender]);

        let outcome = resolve_attack(&mut attacker, &mut defender, &mut grid).unwrap();

        assert_eq!(
            outcome,
            AttackOutcome {
                damage: 1,
                lethal: false,
                remaining_hp: 9
            }
        );
        assert!(defender.is_alive());
        assert!(attacker.has_attacked());
    }

    #[test]
    fn lethal_hit_marks_dead_and_releases_cell() {
        let mut attacker = unit(1, Side::Player, Cell::new(1, 1), 10, 20, 0);
        let mut defender = unit(2, Side::Enemy, Cell::new(1, 2), 5, 0, 1);
        let mut grid = grid_with(&[&attacker, &defender]);

        let outcome = resolve_attack(&mut attacker, &mut defender, &mut grid).unwrap();

        assert!(outcome.lethal);
        assert_eq!(outcome.remaining_hp, 0);
        assert!(defender.is_dead());
        assert!(!grid.is_blocked(Cell::new(1, 2)));
        assert!(grid.is_blocked(Cell::new(1, 1)));
    }

    #[test]
    fn rejections_leave_state_untouched() {
        let mut attacker = unit(1, Side::Player, Cell::new(0, 0), 10, 5, 0);
        let mut far = unit(2, Side::Enemy, Cell::new(3, 3), 10, 0, 0);
        let mut grid = grid_with(&[&attacker, &far]);

        let result = resolve_attack(&mut attacker, &mut far, &mut grid);
        assert_eq!(
            result,
            Err(AttackRejection::OutOfRange {
                target: UnitId(2),
                distance: 6,
                range: 1
            })
        );
        assert_eq!(far.hp(), 10);
        assert!(!attacker.has_attacked());

        far.position = Cell::new(0, 1);
        attacker.flags.insert(UnitFlags::HAS_ATTACKED);
        assert_eq!(
            resolve_attack(&mut attacker, &mut far, &mut grid),
            Err(AttackRejection::AlreadyAttacked(UnitId(1)))
        );

        attacker.begin_turn();
        far.flags.insert(UnitFlags::DEAD);
        assert_eq!(
            resolve_attack(&mut attacker, &mut far, &mut grid),
            Err(AttackRejection::TargetDead(UnitId(2)))
        );
    }

    #[test]
    fn range_uses_manhattan_distance() {
        let archer = unit(1, Side::Player, Cell::new(0, 0), 10, 4, 0).with_range(4);
        let near = unit(2, Side::Enemy, Cell::new(2, 2), 10, 0, 0);
        let far = unit(3, Side::Enemy, Cell::new(3, 2), 10, 0, 0);

        assert!(is_in_range(&archer, &near));
        assert!(!is_in_range(&archer, &far));
    }
}
