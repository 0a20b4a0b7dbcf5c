//! Asynchronous abstraction for sourcing party intents.
//!
//! Runtime users plug in [`IntentProvider`] implementations so an encounter
//! can run with human input, scripted fixtures, or the built-in policy.
use async_trait::async_trait;
use tactics_core::{EncounterSnapshot, Intent, RejectedIntent};

use super::errors::Result;

/// Trait for providing party intents based on the current encounter.
///
/// Different implementations can handle:
/// - Player input (from UI/CLI)
/// - Scripted fixtures
/// - Auto-play using the enemy policy
#[async_trait]
pub trait IntentProvider: Send {
    /// Provide the next intent for the acting party member.
    ///
    /// Called only while the session awaits an intent; `view` is a copy of
    /// the battlefield at that moment.
    async fn next_intent(&mut self, view: &EncounterSnapshot) -> Result<Intent>;

    /// Called when the session refused the last intent. Nothing changed.
    fn rejected(&mut self, _intent: Intent, _reason: RejectedIntent) {}
}

/// A provider that always ends the turn.
/// Useful for testing or as a fallback.
pub struct EndTurnProvider;

#[async_trait]
impl IntentProvider for EndTurnProvider {
    async fn next_intent(&mut self, _view: &EncounterSnapshot) -> Result<Intent> {
        Ok(Intent::EndTurn)
    }
}
