//! Scenario loader.
//!
//! Loads [`ScenarioSpec`]s from RON files. Units are resolved separately
//! against a template catalog via [`ScenarioSpec::resolve`].

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::scenario::ScenarioSpec;

const BUILTIN: [(&str, &str); 2] = [
    (
        "dark_forest",
        include_str!("../../data/scenarios/dark_forest.ron"),
    ),
    ("boss_cave", include_str!("../../data/scenarios/boss_cave.ron")),
];

/// Loader for scenario definitions from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    /// Load a scenario from a RON file.
    pub fn load(path: &Path) -> LoadResult<ScenarioSpec> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    /// Parse a scenario from RON text.
    pub fn parse(content: &str) -> LoadResult<ScenarioSpec> {
        let spec: ScenarioSpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))?;

        if spec.dimensions.0 == 0 || spec.dimensions.1 == 0 {
            anyhow::bail!(
                "scenario '{}' has empty dimensions {:?}",
                spec.name,
                spec.dimensions
            );
        }

        Ok(spec)
    }

    /// Names of the scenarios shipped with the crate.
    pub fn builtin_names() -> impl Iterator<Item = &'static str> {
        BUILTIN.iter().map(|(name, _)| *name)
    }

    /// Load a scenario shipped with the crate by name.
    pub fn builtin(name: &str) -> LoadResult<ScenarioSpec> {
        let (_, content) = BUILTIN
            .iter()
            .find(|(builtin, _)| *builtin == name)
            .ok_or_else(|| anyhow::anyhow!("Unknown builtin scenario '{}'", name))?;
        Self::parse(content)
    }
}
