//! Data-driven encounter setups.
//!
//! A [`ScenarioSpec`] is what lives in a RON file: grid size, obstacle
//! layout and template placements. Resolving it against a
//! [`TemplateCatalog`] yields a [`Scenario`] with concrete units that can be
//! handed to [`EncounterSession::start`].

use std::collections::BTreeSet;

use anyhow::{Context, bail};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tactics_core::{
    Cell, EncounterConfig, EncounterSession, GridDimensions, SetupError, Side, Unit, UnitId,
};
use tracing::debug;

use crate::loaders::LoadResult;
use crate::templates::TemplateCatalog;

/// Where obstacles go.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleSpec {
    #[default]
    None,
    /// Fixed `(col, row)` cells.
    Explicit(Vec<(i32, i32)>),
    /// `count` cells picked by a seeded generator, avoiding unit placements.
    Scatter { count: u32, seed: u64 },
}

/// A unit template placed on a cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub template: String,
    pub at: (i32, i32),
}

impl Placement {
    pub fn cell(&self) -> Cell {
        Cell::new(self.at.0, self.at.1)
    }
}

/// Scenario as written in a RON file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioSpec {
    pub name: String,
    pub dimensions: (u32, u32),
    #[serde(default)]
    pub obstacles: ObstacleSpec,
    pub party: Vec<Placement>,
    pub enemies: Vec<Placement>,
}

/// A scenario with concrete units and obstacle cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scenario {
    pub name: String,
    pub dimensions: GridDimensions,
    pub obstacles: Vec<Cell>,
    pub party: Vec<Unit>,
    pub enemies: Vec<Unit>,
}

impl ScenarioSpec {
    /// Stamps out units from `catalog` and lays out obstacles.
    ///
    /// Party members get ids `1..=n`, enemies continue the sequence.
    pub fn resolve(&self, catalog: &TemplateCatalog) -> LoadResult<Scenario> {
        let dimensions = GridDimensions::new(self.dimensions.0, self.dimensions.1);
        let mut next_id = 1u32;
        let mut stamp = |placement: &Placement, side: Side| -> LoadResult<Unit> {
            let template = catalog.get(&placement.template).with_context(|| {
                format!(
                    "scenario '{}' references unknown template '{}'",
                    self.name, placement.template
                )
            })?;
            let unit = template.instantiate(UnitId(next_id), side, placement.cell());
            next_id += 1;
            Ok(unit)
        };

        let party = self
            .party
            .iter()
            .map(|placement| stamp(placement, Side::Player))
            .collect::<LoadResult<Vec<_>>>()?;
        let enemies = self
            .enemies
            .iter()
            .map(|placement| stamp(placement, Side::Enemy))
            .collect::<LoadResult<Vec<_>>>()?;

        let obstacles = match &self.obstacles {
            ObstacleSpec::None => Vec::new(),
            ObstacleSpec::Explicit(cells) => cells
                .iter()
                .map(|&(col, row)| Cell::new(col, row))
                .collect(),
            ObstacleSpec::Scatter { count, seed } => {
                let reserved: BTreeSet<Cell> = self
                    .party
                    .iter()
                    .chain(&self.enemies)
                    .map(Placement::cell)
                    .collect();
                let cells = scatter_obstacles(dimensions, *count as usize, *seed, &reserved);
                if cells.len() < *count as usize {
                    bail!(
                        "scenario '{}' has room for only {} of {} obstacles",
                        self.name,
                        cells.len(),
                        count
                    );
                }
                cells
            }
        };

        debug!(
            scenario = %self.name,
            party = party.len(),
            enemies = enemies.len(),
            obstacles = obstacles.len(),
            "scenario resolved"
        );

        Ok(Scenario {
            name: self.name.clone(),
            dimensions,
            obstacles,
            party,
            enemies,
        })
    }
}

impl Scenario {
    /// Starts an encounter from this scenario.
    pub fn start(self, config: EncounterConfig) -> Result<EncounterSession, SetupError> {
        EncounterSession::start(
            self.party,
            self.enemies,
            &self.obstacles,
            self.dimensions,
            config,
        )
    }
}

/// Picks up to `count` distinct in-bounds cells outside `reserved`.
///
/// The same seed always yields the same cells. Fewer cells are returned only
/// when the grid has no more room.
pub fn scatter_obstacles(
    dimensions: GridDimensions,
    count: usize,
    seed: u64,
    reserved: &BTreeSet<Cell>,
) -> Vec<Cell> {
    let mut candidates: Vec<Cell> = (0..dimensions.height as i32)
        .flat_map(|row| (0..dimensions.width as i32).map(move |col| Cell::new(col, row)))
        .filter(|cell| !reserved.contains(cell))
        .collect();

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut picked = Vec::with_capacity(count.min(candidates.len()));
    while picked.len() < count && !candidates.is_empty() {
        let index = rng.gen_range(0..candidates.len());
        picked.push(candidates.swap_remove(index));
    }
    picked.sort();
    picked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(obstacles: ObstacleSpec) -> ScenarioSpec {
        ScenarioSpec {
            name: "test".into(),
            dimensions: (6, 4),
            obstacles,
            party: vec![Placement {
                template: "warrior".into(),
                at: (0, 0),
            }],
            enemies: vec![Placement {
                template: "goblin_raider".into(),
                at: (5, 3),
            }],
        }
    }

    #[test]
    fn resolve_assigns_sequential_ids_and_sides() {
        let scenario = spec(ObstacleSpec::Explicit(vec![(2, 2)]))
            .resolve(&TemplateCatalog::builtin())
            .unwrap();

        assert_eq!(scenario.party[0].id, UnitId(1));
        assert_eq!(scenario.party[0].side, Side::Player);
        assert_eq!(scenario.enemies[0].id, UnitId(2));
        assert_eq!(scenario.enemies[0].exp_reward, 50);
        assert_eq!(scenario.obstacles, vec![Cell::new(2, 2)]);
    }

    #[test]
    fn unknown_template_is_reported() {
        let mut bad = spec(ObstacleSpec::None);
        bad.enemies[0].template = "dragon".into();

        let err = bad.resolve(&TemplateCatalog::builtin()).unwrap_err();
        assert!(err.to_string().contains("dragon"));
    }

    #[test]
    fn scatter_is_seeded_and_avoids_reserved_cells() {
        let dimensions = GridDimensions::new(6, 4);
        let reserved = BTreeSet::from([Cell::new(0, 0), Cell::new(5, 3)]);

        let first = scatter_obstacles(dimensions, 5, 11, &reserved);
        let again = scatter_obstacles(dimensions, 5, 11, &reserved);

        assert_eq!(first, again);
        assert_eq!(first.len(), 5);
        assert!(first.iter().all(|cell| dimensions.contains(*cell)));
        assert!(first.iter().all(|cell| !reserved.contains(cell)));
        let distinct: BTreeSet<Cell> = first.iter().copied().collect();
        assert_eq!(distinct.len(), 5);
    }

    #[test]
    fn scatter_larger_than_grid_fails_to_resolve() {
        let crowded = spec(ObstacleSpec::Scatter { count: 30, seed: 1 });
        assert!(crowded.resolve(&TemplateCatalog::builtin()).is_err());
    }

    #[test]
    fn resolved_scenario_starts_an_encounter() {
        let scenario = spec(ObstacleSpec::Scatter { count: 4, seed: 3 })
            .resolve(&TemplateCatalog::builtin())
            .unwrap();
        let session = scenario.start(EncounterConfig::instant()).unwrap();

        assert_eq!(session.units().len(), 2);
        assert_eq!(session.grid().blocked_cells().count(), 6);
    }
}
