//! Broadcast-channel event bus.

use crate::{BusEvent, EventKind};
use parking_lot::RwLock;
use std::collections::HashMap;
use tokio::sync::broadcast;
use tracing::trace;

const DEFAULT_CAPACITY: usize = 256;

/// Fire-and-forget pub/sub over tokio broadcast channels.
///
/// Every event goes to the global stream and to its kind's sub-topic.
/// Sub-topic channels are created lazily on first subscribe or publish.
/// Slow subscribers lag and drop old events rather than back-pressure
/// publishers.
pub struct EventBus {
    global: broadcast::Sender<BusEvent>,
    topics: RwLock<HashMap<EventKind, broadcast::Sender<BusEvent>>>,
    capacity: usize,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (global, _) = broadcast::channel(capacity);
        Self {
            global,
            topics: RwLock::new(HashMap::new()),
            capacity,
        }
    }

    /// Publish to the global stream and the event's sub-topic.
    ///
    /// Send errors mean no subscriber is currently listening, which is fine.
    pub fn publish(&self, event: BusEvent) {
        trace!(kind = %event.kind, "Publishing bus event");
        if let Some(topic) = self.topics.read().get(&event.kind) {
            let _ = topic.send(event.clone());
        }
        let _ = self.global.send(event);
    }

    /// Subscribe to the global stream.
    pub fn subscribe(&self) -> broadcast::Receiver<BusEvent> {
        self.global.subscribe()
    }

    /// Subscribe to one event kind only.
    pub fn subscribe_topic(&self, kind: EventKind) -> broadcast::Receiver<BusEvent> {
        let mut topics = self.topics.write();
        let sender = topics.entry(kind).or_insert_with(|| {
            let (tx, _) = broadcast::channel(self.capacity);
            tx
        });
        sender.subscribe()
    }

    /// Number of global-stream subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.global.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
