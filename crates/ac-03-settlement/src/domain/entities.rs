//! # Domain Entities
//!
//! The settlement record and its attached dispute.

use super::errors::SettlementError;
use super::value_objects::SettlementStatus;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount, Hash, Timestamp};

/// Caller-supplied parameters for a new settlement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSettlementParams {
    /// Paying side on L3 (the escrow source on L2).
    pub from: Address,
    /// Receiving side.
    pub to: Address,
    /// Settled amount in the settlement asset.
    pub amount: Amount,
    /// L3 transaction reference; globally unique across all settlements.
    pub source_transaction_id: Hash,
    /// Opaque proof handle asserting the L3 transaction occurred.
    pub verification_root: Hash,
}

/// A dispute attached to a settlement. Created only on PENDING→DISPUTED,
/// closed exactly once.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dispute {
    /// The settlement this dispute contests.
    pub settlement_id: u64,
    /// Who opened the dispute.
    pub initiator: Address,
    /// Short reason.
    pub reason: String,
    /// Free-form supporting detail.
    pub details: String,
    /// When the dispute was opened.
    pub created_at: Timestamp,
    /// Whether the dispute has been closed.
    pub resolved: bool,
    /// Who closed it.
    pub resolver: Option<Address>,
    /// The recorded resolution text.
    pub resolution: Option<String>,
}

/// An L3 transaction reconciled into L2.
///
/// Immutable once CONFIRMED, RESOLVED, or CANCELLED.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// Monotonic id.
    pub id: u64,
    /// Paying side.
    pub from: Address,
    /// Receiving side.
    pub to: Address,
    /// Settled amount.
    pub amount: Amount,
    /// Creation time.
    pub created_at: Timestamp,
    /// Current status.
    pub status: SettlementStatus,
    /// L3 transaction reference (replay guard key).
    pub source_transaction_id: Hash,
    /// Opaque proof handle.
    pub verification_root: Hash,
    /// End of the dispute window.
    pub dispute_deadline: Timestamp,
    /// The attached dispute, once one is opened.
    pub dispute: Option<Dispute>,
}

impl Settlement {
    /// Transition to a new status, enforcing the state machine.
    pub fn transition_to(&mut self, next: SettlementStatus) -> Result<(), SettlementError> {
        if !self.status.can_transition_to(next) {
            return Err(SettlementError::InvalidTransition {
                id: self.id,
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }

    /// Is `now` still inside the dispute window?
    pub fn within_window(&self, now: Timestamp) -> bool {
        now <= self.dispute_deadline
    }
}
