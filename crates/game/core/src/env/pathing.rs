//! Shortest-path and reachability queries over a [`GridIndex`] snapshot.
//!
//! Both searches are 4-directional with unit step cost and scan neighbours in
//! [`Direction::SCAN_ORDER`](crate::state::Direction::SCAN_ORDER). The planner
//! reads occupancy and never mutates it; a unit planning from its own cell must
//! release that cell first (see [`GridIndex::with_released`]).

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap, HashSet, VecDeque};

use arrayvec::ArrayVec;

use super::GridIndex;
use crate::state::Cell;

/// Ordered sequence of steps. Excludes the start cell, ends at the goal.
pub type Path = Vec<Cell>;

/// Frontier entry ordered by `(f, insertion sequence)`.
///
/// The sequence number makes equal-f nodes expand first-in first-out, which
/// keeps path choice reproducible for identical inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct FrontierKey {
    f: u32,
    seq: u64,
}

#[derive(Clone, Copy, Debug)]
pub struct PathPlanner<'a> {
    grid: &'a GridIndex,
}

impl<'a> PathPlanner<'a> {
    pub fn new(grid: &'a GridIndex) -> Self {
        Self { grid }
    }

    /// A* search from `start` to `goal`.
    ///
    /// Returns `None` if `goal` is out of bounds, blocked or unreachable.
    /// `start == goal` yields an empty path.
    pub fn find_path(&self, start: Cell, goal: Cell) -> Option<Path> {
        if !self.grid.is_walkable(goal) {
            return None;
        }
        if start == goal {
            return Some(Path::new());
        }

        let mut open = BinaryHeap::new();
        let mut g_score: HashMap<Cell, u32> = HashMap::new();
        let mut came_from: HashMap<Cell, Cell> = HashMap::new();
        let mut closed: HashSet<Cell> = HashSet::new();
        let mut seq = 0u64;

        g_score.insert(start, 0);
        open.push(Reverse((
            FrontierKey {
                f: start.distance(goal),
                seq,
            },
            start,
        )));

        while let Some(Reverse((_, current))) = open.pop() {
            if current == goal {
                return Some(reconstruct(&came_from, start, goal));
            }
            if !closed.insert(current) {
                continue;
            }

            let current_g = g_score[&current];
            for neighbor in self.walkable_neighbors(current) {
                if closed.contains(&neighbor) {
                    continue;
                }

                let tentative = current_g + 1;
                if g_score.get(&neighbor).is_some_and(|&known| tentative >= known) {
                    continue;
                }

                g_score.insert(neighbor, tentative);
                came_from.insert(neighbor, current);
                seq += 1;
                open.push(Reverse((
                    FrontierKey {
                        f: tentative + neighbor.distance(goal),
                        seq,
                    },
                    neighbor,
                )));
            }
        }

        None
    }

    /// Length of the shortest path, if any.
    pub fn distance(&self, start: Cell, goal: Cell) -> Option<u32> {
        self.find_path(start, goal).map(|path| path.len() as u32)
    }

    /// Cells whose shortest distance from `start` is in `1..=budget`.
    pub fn reachable_set(&self, start: Cell, budget: u32) -> BTreeSet<Cell> {
        self.reachable_distances(start, budget).into_keys().collect()
    }

    /// Breadth-first flood fill returning each reachable cell with its
    /// step distance. Never includes `start`; a zero budget yields nothing.
    pub fn reachable_distances(&self, start: Cell, budget: u32) -> BTreeMap<Cell, u32> {
        let mut reached = BTreeMap::new();
        if budget == 0 {
            return reached;
        }

        let mut visited = HashSet::from([start]);
        let mut queue = VecDeque::from([(start, 0u32)]);

        while let Some((cell, steps)) = queue.pop_front() {
            if steps > 0 {
                reached.insert(cell, steps);
            }
            if steps >= budget {
                continue;
            }

            for neighbor in self.walkable_neighbors(cell) {
                if visited.insert(neighbor) {
                    queue.push_back((neighbor, steps + 1));
                }
            }
        }

        reached
    }

    fn walkable_neighbors(&self, cell: Cell) -> ArrayVec<Cell, 4> {
        cell.neighbors()
            .into_iter()
            .filter(|&neighbor| self.grid.is_walkable(neighbor))
            .collect()
    }
}

fn reconstruct(came_from: &HashMap<Cell, Cell>, start: Cell, goal: Cell) -> Path {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&previous) = came_from.get(&current) {
        if previous == start {
            break;
        }
        path.push(previous);
        current = previous;
    }
    path.reverse();
    path
}
