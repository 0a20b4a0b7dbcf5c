//! Intent provider implementations for party members.

pub mod autopilot;
pub mod scripted;

pub use autopilot::AutoPilot;
pub use scripted::ScriptedProvider;
