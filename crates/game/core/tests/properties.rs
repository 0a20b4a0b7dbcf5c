use std::collections::{BTreeMap, VecDeque};

use proptest::prelude::*;
use tactics_core::{
    Cell, GridDimensions, GridIndex, Initiative, PathPlanner, TurnScheduler, UnitId,
    WorldMapping, apply_damage, calculate_damage,
};

const WIDTH: u32 = 8;
const HEIGHT: u32 = 8;

fn grid_from(blocked: &[bool]) -> GridIndex {
    let mut grid = GridIndex::new(GridDimensions::new(WIDTH, HEIGHT), WorldMapping::default());
    for (index, &is_blocked) in blocked.iter().enumerate() {
        let cell = Cell::new((index as u32 % WIDTH) as i32, (index as u32 / WIDTH) as i32);
        grid.set_blocked(cell, is_blocked);
    }
    grid
}

/// Plain breadth-first distances, used as the reference for the planner.
fn bfs(grid: &GridIndex, start: Cell) -> BTreeMap<Cell, u32> {
    let mut distances = BTreeMap::from([(start, 0)]);
    let mut frontier = VecDeque::from([start]);
    while let Some(cell) = frontier.pop_front() {
        let next = distances[&cell] + 1;
        for neighbor in cell.neighbors() {
            if grid.is_walkable(neighbor) && !distances.contains_key(&neighbor) {
                distances.insert(neighbor, next);
                frontier.push_back(neighbor);
            }
        }
    }
    distances
}

fn cell_strategy() -> impl Strategy<Value = Cell> {
    (0..WIDTH as i32, 0..HEIGHT as i32).prop_map(|(col, row)| Cell::new(col, row))
}

fn blocked_strategy() -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(prop::bool::weighted(0.25), (WIDTH * HEIGHT) as usize)
}

proptest! {
    #[test]
    fn reachable_cells_are_free_distinct_and_within_budget(
        blocked in blocked_strategy(),
        start in cell_strategy(),
        budget in 0u32..7,
    ) {
        let grid = grid_from(&blocked);
        let reference = bfs(&grid, start);
        let reachable = PathPlanner::new(&grid).reachable_set(start, budget);

        for cell in &reachable {
            prop_assert_ne!(*cell, start);
            prop_assert!(!grid.is_blocked(*cell));
            prop_assert!(start.distance(*cell) <= budget);
            prop_assert!(reference.get(cell).is_some_and(|&d| d <= budget));
        }
        let expected = reference
            .iter()
            .filter(|&(_, &d)| d > 0 && d <= budget)
            .count();
        prop_assert_eq!(reachable.len(), expected);
    }

    #[test]
    fn paths_are_shortest_and_walkable(
        blocked in blocked_strategy(),
        start in cell_strategy(),
        goal in cell_strategy(),
    ) {
        let grid = grid_from(&blocked);
        let reference = bfs(&grid, start);
        let path = PathPlanner::new(&grid).find_path(start, goal);

        match path {
            Some(path) => {
                prop_assert_eq!(Some(path.len() as u32), reference.get(&goal).copied());
                let mut previous = start;
                for cell in path {
                    prop_assert_eq!(previous.distance(cell), 1);
                    prop_assert!(!grid.is_blocked(cell));
                    previous = cell;
                }
                prop_assert_eq!(previous, goal);
            }
            None => prop_assert!(grid.is_blocked(goal) || !reference.contains_key(&goal)),
        }
    }

    #[test]
    fn damage_is_positive_and_hp_never_underflows(
        attack in 0u32..200,
        defense in 0u32..200,
        hp in 0u32..200,
    ) {
        let damage = calculate_damage(attack, defense);
        prop_assert!(damage >= 1);
        let remaining = apply_damage(hp, damage);
        prop_assert!(remaining <= hp);
        prop_assert_eq!(remaining, hp.saturating_sub(damage));
    }

    #[test]
    fn scheduling_is_deterministic(
        speeds in prop::collection::vec(0u32..10, 1..8),
        deaths in prop::collection::vec(0usize..8, 0..4),
    ) {
        let run = || {
            let mut scheduler = TurnScheduler::new();
            let initiatives = speeds
                .iter()
                .enumerate()
                .map(|(index, &speed)| Initiative::new(UnitId(index as u32), speed));
            let mut acted = scheduler.start(initiatives).into_iter().collect::<Vec<_>>();
            for (step, victim) in deaths.iter().enumerate() {
                scheduler.mark_dead(UnitId(*victim as u32));
                for _ in 0..=step {
                    if let Ok(Some(turn)) = scheduler.advance() {
                        acted.push(turn);
                    }
                }
            }
            for _ in 0..12 {
                if let Ok(Some(turn)) = scheduler.advance() {
                    acted.push(turn);
                }
            }
            acted
        };

        let first = run();
        prop_assert_eq!(&first, &run());

        // Within a round, speeds never increase.
        for pair in first.windows(2) {
            if pair[0].round == pair[1].round {
                prop_assert!(speeds[pair[0].unit.0 as usize] >= speeds[pair[1].unit.0 as usize]);
            }
        }
    }
}
