//! Deterministic rules for turn-based grid encounters.
//!
//! `tactics-core` defines the canonical rules (grid occupancy, path planning,
//! turn order, combat) and the [`EncounterSession`] state machine that drives
//! them from resolved intents. Everything here is synchronous and owns no
//! timers or I/O: presentation delays are deferred continuations on a virtual
//! clock, advanced by the caller.
//!
//! Supporting crates depend on the types re-exported here.
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;

pub use combat::{
    AttackOutcome, AttackRejection, MINIMUM_DAMAGE, apply_damage, calculate_damage, is_in_range,
    resolve_attack,
};
pub use config::EncounterConfig;
pub use engine::policy::{Decision, decide, nearest_opponent};
pub use engine::{
    Continuation, DeferredQueue, EncounterEvent, EncounterSession, EncounterSnapshot,
    EncounterSummary, EventListener, Initiative, Intent, LifetimeToken, Outcome, RejectedIntent,
    SchedulerPhase, SessionError, SessionPhase, SetupError, SurvivorSummary, TurnError,
    TurnScheduler, TurnStart,
};
pub use env::{GridDimensions, GridIndex, Path, PathPlanner, WorldMapping};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    Cell, Direction, Millis, ResourceMeter, Roster, Side, Unit, UnitFlags, UnitId, UnitStats,
    WorldPoint,
};
