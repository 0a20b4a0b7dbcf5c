//! Topic-based event bus implementation.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tactics_core::{EncounterEvent, EventListener};
use tokio::sync::broadcast;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Turn and round hand-over
    Turn,
    /// Selection, movement, attacks and deaths
    Action,
    /// Encounter outcome
    Encounter,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Turn, Topic::Action, Topic::Encounter];

    pub fn of(event: &EncounterEvent) -> Topic {
        match event {
            EncounterEvent::TurnStarted { .. } | EncounterEvent::RoundAdvanced { .. } => {
                Topic::Turn
            }
            EncounterEvent::SelectionChanged { .. }
            | EncounterEvent::UnitMoved { .. }
            | EncounterEvent::AttackResolved { .. }
            | EncounterEvent::UnitDied { .. } => Topic::Action,
            EncounterEvent::EncounterEnded { .. } => Topic::Encounter,
        }
    }

    fn index(self) -> usize {
        match self {
            Topic::Turn => 0,
            Topic::Action => 1,
            Topic::Encounter => 2,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Cloning shares the underlying channels.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<[broadcast::Sender<EncounterEvent>; 3]>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let channels = Topic::ALL.map(|_| broadcast::channel(capacity).0);
        Self {
            channels: Arc::new(channels),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: EncounterEvent) {
        let topic = Topic::of(&event);
        if self.channels[topic.index()].send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<EncounterEvent> {
        self.channels[topic.index()].subscribe()
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<EncounterEvent>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventListener for EventBus {
    fn on_event(&mut self, event: &EncounterEvent) {
        self.publish(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactics_core::{Outcome, UnitId};

    #[tokio::test]
    async fn subscribers_only_see_their_topic() {
        let bus = EventBus::new();
        let mut turns = bus.subscribe(Topic::Turn);
        let mut outcome = bus.subscribe(Topic::Encounter);

        bus.publish(EncounterEvent::RoundAdvanced { round: 1 });
        bus.publish(EncounterEvent::UnitDied { unit: UnitId(3) });
        bus.publish(EncounterEvent::EncounterEnded {
            outcome: Outcome::Victory,
        });

        assert_eq!(
            turns.recv().await.unwrap(),
            EncounterEvent::RoundAdvanced { round: 1 }
        );
        assert!(turns.try_recv().is_err());
        assert_eq!(
            outcome.recv().await.unwrap(),
            EncounterEvent::EncounterEnded {
                outcome: Outcome::Victory
            }
        );
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let mut bus = EventBus::with_capacity(4);
        bus.on_event(&EncounterEvent::UnitDied { unit: UnitId(1) });
    }
}
