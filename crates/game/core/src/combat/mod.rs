//! Combat resolution.
//!
//! Attacks are deterministic: there is no hit roll and no randomness in the
//! damage formula.
//!
//! # Core Functions
//!
//! - `is_in_range`: Manhattan distance check, safe for speculative callers
//! - `calculate_damage`: `max(1, str - def)`
//! - `resolve_attack`: precondition checks, hp reduction, death and grid release

pub mod damage;
pub mod result;

pub use damage::{MINIMUM_DAMAGE, apply_damage, calculate_damage};
pub use result::{AttackOutcome, AttackRejection, is_in_range, resolve_attack};
