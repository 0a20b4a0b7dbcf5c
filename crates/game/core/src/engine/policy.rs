//! Fixed close-and-strike policy used for enemy turns.
//!
//! The policy is side-agnostic: it always hunts the acting unit's opponents,
//! so the runtime's auto-pilot reuses it for party members.

use crate::combat::is_in_range;
use crate::env::{GridIndex, Path, PathPlanner};
use crate::state::{Roster, Unit, UnitId};

/// One step of a policy-driven turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    Attack { target: UnitId },
    /// Walk `path` (start excluded, already truncated to mobility).
    Move { path: Path },
    Pass,
}

/// Nearest living opponent by Manhattan distance; ties go to roster order.
pub fn nearest_opponent<'r>(actor: &Unit, roster: &'r Roster) -> Option<&'r Unit> {
    roster
        .living(actor.side.opponent())
        .min_by_key(|unit| actor.position.distance(unit.position))
}

/// Decides the next step for `actor`.
///
/// `grid` must have every living unit's cell blocked; the actor's own cell
/// is released for the duration of the search.
pub fn decide(actor: &Unit, roster: &Roster, grid: &mut GridIndex) -> Decision {
    if actor.is_dead() || actor.has_attacked() {
        return Decision::Pass;
    }
    let Some(target) = nearest_opponent(actor, roster) else {
        return Decision::Pass;
    };
    if is_in_range(actor, target) {
        return Decision::Attack { target: target.id };
    }
    if actor.has_moved() || actor.mobility == 0 {
        return Decision::Pass;
    }

    let approach = grid.with_released(actor.position, |grid| {
        let planner = PathPlanner::new(grid);
        target
            .position
            .neighbors()
            .into_iter()
            .filter(|cell| grid.is_walkable(*cell))
            .filter_map(|cell| planner.find_path(actor.position, cell))
            // min_by_key keeps the first minimum, i.e. scan order on ties.
            .min_by_key(|path| path.len())
    });

    match approach {
        Some(mut path) if !path.is_empty() => {
            path.truncate(actor.mobility as usize);
            Decision::Move { path }
        }
        _ => Decision::Pass,
    }
}
