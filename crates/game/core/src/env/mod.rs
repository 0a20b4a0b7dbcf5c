//! Battlefield geometry: occupancy index and path planning.
//!
//! [`GridIndex`] is the single owner of "is something standing here" and of
//! the mapping to presentation coordinates. [`PathPlanner`] borrows a grid
//! snapshot to answer shortest-path and reachability queries.
mod grid;
mod pathing;

pub use grid::{GridDimensions, GridIndex, WorldMapping};
pub use pathing::{Path, PathPlanner};
