//! Replays a fixed list of intents.

use std::collections::VecDeque;

use async_trait::async_trait;
use tactics_core::{EncounterSnapshot, Intent, RejectedIntent};
use tracing::debug;

use crate::api::{IntentProvider, Result};

/// Hands out queued intents in order, then ends every turn.
#[derive(Clone, Debug, Default)]
pub struct ScriptedProvider {
    script: VecDeque<Intent>,
    rejections: Vec<(Intent, RejectedIntent)>,
}

impl ScriptedProvider {
    pub fn new(script: impl IntoIterator<Item = Intent>) -> Self {
        Self {
            script: script.into_iter().collect(),
            rejections: Vec::new(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    /// Intents the session refused, in the order they were refused.
    pub fn rejections(&self) -> &[(Intent, RejectedIntent)] {
        &self.rejections
    }
}

#[async_trait]
impl IntentProvider for ScriptedProvider {
    async fn next_intent(&mut self, _view: &EncounterSnapshot) -> Result<Intent> {
        Ok(self.script.pop_front().unwrap_or(Intent::EndTurn))
    }

    fn rejected(&mut self, intent: Intent, reason: RejectedIntent) {
        debug!(intent = intent.name(), %reason, "scripted intent rejected");
        self.rejections.push((intent, reason));
    }
}
