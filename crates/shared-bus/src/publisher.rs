//! # Event Publisher
//!
//! Defines the publishing side of the event bus.

use crate::events::{BridgeEvent, EventFilter};
use crate::subscriber::Subscription;
use crate::DEFAULT_CHANNEL_CAPACITY;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;
use tracing::debug;

/// Trait for publishing events to the bus.
///
/// This is the interface the subsystem cores hold; they publish and move on.
/// Delivery is best-effort fan-out — a publish with no subscribers is not an
/// error.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish an event to the bus.
    ///
    /// Returns the number of active subscribers that received the event.
    async fn publish(&self, event: BridgeEvent) -> usize;

    /// Total number of events published so far.
    fn events_published(&self) -> u64;
}

/// In-memory implementation of the event bus.
///
/// Uses `tokio::sync::broadcast` for multi-producer, multi-consumer
/// semantics. Suitable for single-node operation; distributed deployments
/// would implement [`EventPublisher`] over an external log.
pub struct InMemoryEventBus {
    /// Broadcast sender for events.
    sender: broadcast::Sender<BridgeEvent>,

    /// Total events published.
    events_published: AtomicU64,
}

impl InMemoryEventBus {
    /// Create a bus with the default channel capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a bus with a custom channel capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            events_published: AtomicU64::new(0),
        }
    }

    /// Subscribe to events matching `filter`.
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        Subscription::new(self.sender.subscribe(), filter)
    }

    /// Number of currently attached subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: BridgeEvent) -> usize {
        self.events_published.fetch_add(1, Ordering::Relaxed);
        match self.sender.send(event) {
            Ok(receivers) => receivers,
            Err(_) => {
                // No subscribers attached; the event is dropped.
                debug!("event published with no subscribers");
                0
            }
        }
    }

    fn events_published(&self) -> u64 {
        self.events_published.load(Ordering::Relaxed)
    }
}

/// Publisher that records every event for later inspection.
///
/// Used by the subsystem test suites to assert on emission.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<BridgeEvent>>,
}

impl RecordingSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything published so far.
    pub fn events(&self) -> Vec<BridgeEvent> {
        self.events.lock().clone()
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// True if nothing was published.
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

#[async_trait]
impl EventPublisher for RecordingSink {
    async fn publish(&self, event: BridgeEvent) -> usize {
        self.events.lock().push(event);
        1
    }

    fn events_published(&self) -> u64 {
        self.events.lock().len() as u64
    }
}
