//! # Event Subscriber
//!
//! Defines the subscription side of the event bus.

use crate::events::{BridgeEvent, EventFilter};
use tokio::sync::broadcast;
use tracing::debug;

/// A subscription handle for receiving events.
///
/// Dropping the handle detaches the subscriber.
pub struct Subscription {
    /// The broadcast receiver.
    receiver: broadcast::Receiver<BridgeEvent>,

    /// Filter for this subscription.
    filter: EventFilter,
}

impl Subscription {
    pub(crate) fn new(receiver: broadcast::Receiver<BridgeEvent>, filter: EventFilter) -> Self {
        Self { receiver, filter }
    }

    /// Receive the next event that matches the filter.
    ///
    /// Returns `None` when the bus has been dropped. A lagged subscriber
    /// skips the overwritten events and keeps receiving.
    pub async fn recv(&mut self) -> Option<BridgeEvent> {
        loop {
            let event = match self.receiver.recv().await {
                Ok(e) => e,
                Err(broadcast::error::RecvError::Closed) => return None,
                Err(broadcast::error::RecvError::Lagged(count)) => {
                    debug!(lagged = count, "subscriber lagged, events dropped");
                    continue;
                }
            };

            if self.filter.matches(&event) {
                return Some(event);
            }
        }
    }

    /// Drain every matching event that is already buffered, without waiting.
    pub fn drain(&mut self) -> Vec<BridgeEvent> {
        let mut out = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if self.filter.matches(&event) {
                        out.push(event);
                    }
                }
                Err(broadcast::error::TryRecvError::Lagged(count)) => {
                    debug!(lagged = count, "subscriber lagged, events dropped");
                }
                Err(_) => return out,
            }
        }
    }
}
