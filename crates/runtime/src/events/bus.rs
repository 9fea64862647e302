//! Topic-based event bus implementation.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::{CombatEvent, MonsterEvent, RollEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize, strum::EnumIter)]
pub enum Topic {
    /// Encounter lifecycle, turns, rounds and rewinds
    Combat,
    /// Hits, round ticks and attacks on monster sheets
    Damage,
    /// Attack rolls
    Roll,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Combat(CombatEvent),
    Damage(MonsterEvent),
    Roll(RollEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Combat(_) => Topic::Combat,
            Event::Damage(_) => Topic::Damage,
            Event::Roll(_) => Topic::Roll,
        }
    }
}

/// Topic-based event bus
///
/// Channels for every topic are created up front, so publishing and
/// subscribing never contend on a lock. Delivery is best-effort: events
/// published while a topic has no subscriber are dropped.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

struct Channels {
    combat: broadcast::Sender<Event>,
    damage: broadcast::Sender<Event>,
    roll: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Channels {
                combat: broadcast::channel(capacity).0,
                damage: broadcast::channel(capacity).0,
                roll: broadcast::channel(capacity).0,
            }),
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Combat => &self.channels.combat,
            Topic::Damage => &self.channels.damage,
            Topic::Roll => &self.channels.roll,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: impl Into<Event>) {
        let event = event.into();
        let topic = event.topic();

        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
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

impl From<CombatEvent> for Event {
    fn from(event: CombatEvent) -> Self {
        Event::Combat(event)
    }
}

impl From<MonsterEvent> for Event {
    fn from(event: MonsterEvent) -> Self {
        Event::Damage(event)
    }
}

impl From<RollEvent> for Event {
    fn from(event: RollEvent) -> Self {
        Event::Roll(event)
    }
}

#[cfg(test)]
mod tests {
    use hunt_core::EncounterId;
    use strum::IntoEnumIterator;

    use super::*;

    #[tokio::test]
    async fn subscribers_only_see_their_topic() {
        let bus = EventBus::with_capacity(8);
        let mut receivers = bus.subscribe_multiple(&Topic::iter().collect::<Vec<_>>());

        bus.publish(CombatEvent::Started {
            encounter: EncounterId::new("hunt-1"),
        });

        let combat = receivers.get_mut(&Topic::Combat).unwrap();
        assert!(matches!(
            combat.recv().await.unwrap(),
            Event::Combat(CombatEvent::Started { .. })
        ));
        assert!(receivers.get_mut(&Topic::Damage).unwrap().try_recv().is_err());
        assert!(receivers.get_mut(&Topic::Roll).unwrap().try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let bus = EventBus::new();
        bus.publish(CombatEvent::Ended {
            encounter: EncounterId::new("hunt-1"),
        });
    }
}
