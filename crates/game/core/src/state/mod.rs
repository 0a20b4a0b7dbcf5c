//! Unit and roster state representation.
//!
//! This module owns the value types that describe units, grid coordinates and
//! the encounter roster. The grid and planner never hold units, only cells
//! derived from them.
pub mod roster;
pub mod types;

pub use roster::Roster;
pub use types::{
    Cell, Direction, Millis, ResourceMeter, Side, Unit, UnitFlags, UnitId, UnitStats, WorldPoint,
};
