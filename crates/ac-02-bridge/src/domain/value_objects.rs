//! # Domain Value Objects

use serde::{Deserialize, Serialize};

/// Bridge request state machine.
///
/// `Processing` is the in-flight claim a relayer takes on a request.
/// Under the single-writer lock it is taken and resolved within one guard,
/// but it exists as a distinct status so an asynchronous deployment keeps
/// the exactly-one-winner property.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BridgeStatus {
    /// Created, custody locked, awaiting a relayer.
    #[default]
    Pending,
    /// Claimed by a relayer, outcome not yet recorded.
    Processing,
    /// Destination transfer succeeded; custody released to the recipient.
    Completed,
    /// Destination transfer failed; custody refunded to the sender.
    Failed,
    /// Sender backed out before processing; custody refunded.
    Cancelled,
}

impl BridgeStatus {
    /// Check if transition is valid.
    pub fn can_transition_to(&self, next: BridgeStatus) -> bool {
        match (self, next) {
            (Self::Pending, Self::Processing) => true,
            (Self::Pending, Self::Cancelled) => true,
            (Self::Processing, Self::Completed) => true,
            (Self::Processing, Self::Failed) => true,
            _ => false,
        }
    }

    /// Check if terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }
}
