//! Data-driven content definitions and loaders.
//!
//! This crate houses static encounter content and provides loaders for
//! RON/TOML data files:
//! - Unit templates for party classes and monsters
//! - Scenario layouts (data-driven via RON), with explicit or seeded
//!   obstacle placement
//! - Encounter configuration (data-driven via TOML)
//!
//! Content is consumed when an encounter is set up and never appears in
//! encounter state.

pub mod templates;

#[cfg(feature = "loaders")]
pub mod loaders;
#[cfg(feature = "loaders")]
pub mod scenario;

pub use templates::{TemplateCatalog, UnitTemplate};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, LoadResult, ScenarioLoader, TemplateLoader};
#[cfg(feature = "loaders")]
pub use scenario::{ObstacleSpec, Placement, Scenario, ScenarioSpec, scatter_obstacles};
