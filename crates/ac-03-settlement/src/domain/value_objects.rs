//! # Domain Value Objects

use serde::{Deserialize, Serialize};

/// Settlement state machine.
///
/// A settlement whose dispute window elapses without confirmation stays
/// PENDING; confirmation is an explicit action, never a timer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SettlementStatus {
    /// Registered, escrow locked, dispute window open.
    #[default]
    Pending,
    /// Confirmed within the window; escrow released to the recipient.
    Confirmed,
    /// Contested by the recipient or a resolver.
    Disputed,
    /// Dispute upheld the settlement; escrow released.
    Resolved,
    /// Dispute rejected the settlement; escrow stays for manual recovery.
    Cancelled,
}

impl SettlementStatus {
    /// Check if transition is valid.
    pub fn can_transition_to(&self, next: SettlementStatus) -> bool {
        match (self, next) {
            (Self::Pending, Self::Confirmed) => true,
            (Self::Pending, Self::Disputed) => true,
            (Self::Disputed, Self::Resolved) => true,
            (Self::Disputed, Self::Cancelled) => true,
            _ => false,
        }
    }

    /// Check if terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Resolved | Self::Cancelled)
    }
}
