pub mod common;
pub mod unit;

// Re-export common types
pub use common::{Cell, Direction, Millis, ResourceMeter, UnitId, WorldPoint};

// Re-export unit types
pub use unit::{Side, Unit, UnitFlags, UnitStats};
