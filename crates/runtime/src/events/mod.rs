//! Topic-based notification bus.
//!
//! The network/visibility collaborator subscribes to the topics it cares
//! about and is solely responsible for encoding notifications into wire
//! messages and choosing observers. Publishing is best-effort: a topic with
//! no subscribers drops its notifications.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use game_core::Notification;

/// Topics for notification routing.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Cast starts.
    Ability,
    /// Effect applied / ticked / ended.
    Effect,
    /// Health changes.
    Vitals,
}

impl Topic {
    /// The topic a notification is routed to.
    pub fn of(notification: &Notification) -> Self {
        match notification {
            Notification::AbilityStarted { .. } => Topic::Ability,
            Notification::EffectApplied { .. }
            | Notification::EffectTicked { .. }
            | Notification::EffectEnded { .. } => Topic::Effect,
            Notification::HealthChanged { .. } => Topic::Vitals,
        }
    }
}

/// Topic-based notification bus.
///
/// Allows consumers to subscribe to specific topics and only receive
/// notifications they care about.
pub struct NotificationBus {
    channels: Arc<RwLock<HashMap<Topic, broadcast::Sender<Notification>>>>,
}

impl NotificationBus {
    /// Creates a new bus with default capacity for each topic.
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Creates a new bus with the specified capacity per topic.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut channels = HashMap::new();

        // Pre-create channels for each topic
        channels.insert(Topic::Ability, broadcast::channel(capacity).0);
        channels.insert(Topic::Effect, broadcast::channel(capacity).0);
        channels.insert(Topic::Vitals, broadcast::channel(capacity).0);

        Self {
            channels: Arc::new(RwLock::new(channels)),
        }
    }

    /// Publishes one notification to its topic.
    pub fn publish(&self, notification: Notification) {
        let topic = Topic::of(&notification);
        let channels = self.channels.read().expect("notification bus poisoned");
        if let Some(tx) = channels.get(&topic)
            && tx.send(notification).is_err()
        {
            // No subscribers for this topic - normal, not an error
            tracing::trace!(target: "runtime::events", ?topic, "no subscribers");
        }
    }

    /// Publishes a batch, preserving order.
    pub fn publish_all<I>(&self, notifications: I)
    where
        I: IntoIterator<Item = Notification>,
    {
        for notification in notifications {
            self.publish(notification);
        }
    }

    /// Subscribes to a specific topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Notification> {
        let channels = self.channels.read().expect("notification bus poisoned");
        channels
            .get(&topic)
            .expect("topic channel not initialized")
            .subscribe()
    }
}

impl Clone for NotificationBus {
    fn clone(&self) -> Self {
        Self {
            channels: Arc::clone(&self.channels),
        }
    }
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new()
    }
}
