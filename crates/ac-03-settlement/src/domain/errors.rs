//! # Domain Errors

use super::value_objects::SettlementStatus;
use ac_01_asset_custody::CustodyError;
use shared_types::{display_address, display_hash, Address, Amount, Hash, Timestamp};
use thiserror::Error;

/// Settlement error types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettlementError {
    /// Caller lacks the capability or identity the operation requires.
    #[error("Unauthorized: {} may not {action}", display_address(.actor))]
    Unauthorized {
        /// The rejected caller.
        actor: Address,
        /// What was attempted.
        action: &'static str,
    },

    /// Source transaction already settled (replay guard).
    #[error("Duplicate source transaction: {}", display_hash(.0))]
    DuplicateSource(Hash),

    /// Amount exceeds the settlement ceiling.
    #[error("Amount {amount} exceeds maximum {maximum}")]
    AmountTooLarge {
        /// Requested amount.
        amount: Amount,
        /// Configured ceiling.
        maximum: Amount,
    },

    /// Settlements must move a positive amount.
    #[error("Settlement amount must be positive")]
    ZeroAmount,

    /// Recipient is the zero address.
    #[error("Recipient address is null")]
    NullRecipient,

    /// No settlement with this id.
    #[error("Settlement not found: {0}")]
    SettlementNotFound(u64),

    /// Status precondition failed (covers "not pending").
    #[error("Invalid transition for settlement {id}: {from:?} -> {to:?}")]
    InvalidTransition {
        /// Settlement id.
        id: u64,
        /// Current status.
        from: SettlementStatus,
        /// Attempted status.
        to: SettlementStatus,
    },

    /// The dispute window has closed.
    #[error("Dispute window expired at {deadline}, now {now}")]
    WindowExpired {
        /// The settlement's dispute deadline.
        deadline: Timestamp,
        /// Wall-clock time of the attempt.
        now: Timestamp,
    },

    /// The dispute on this settlement was already closed.
    #[error("Dispute already resolved for settlement {0}")]
    AlreadyResolved(u64),

    /// Paid fee is below the configured dispute fee.
    #[error("Insufficient dispute fee: required {required}, paid {paid}")]
    InsufficientFee {
        /// Configured dispute fee.
        required: Amount,
        /// What the caller paid.
        paid: Amount,
    },

    /// The proof verifier declined the verification root.
    #[error("Proof rejected for source transaction {}", display_hash(.source_tx))]
    ProofRejected {
        /// The claimed source transaction.
        source_tx: Hash,
    },

    /// The asset ledger declined lock/release.
    #[error("Custody failure: {0}")]
    Custody(#[from] CustodyError),
}
