//! # Domain Errors

use super::value_objects::BridgeStatus;
use ac_01_asset_custody::CustodyError;
use shared_types::{display_address, display_hash, Address, Amount, ChainId, Hash};
use thiserror::Error;

/// Bridge error types.
///
/// All are terminal, synchronous failures returned to the caller; nothing
/// is retried internally. A `Custody` failure during processing leaves the
/// request status unchanged so the whole operation can be retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// Fungible transfers must move a positive amount.
    #[error("Transfer amount must be positive")]
    ZeroAmount,

    /// Amount exceeds the per-transfer ceiling.
    #[error("Amount {amount} exceeds maximum {maximum}")]
    AmountTooLarge {
        /// Requested amount.
        amount: Amount,
        /// Configured ceiling.
        maximum: Amount,
    },

    /// Recipient is the zero address.
    #[error("Recipient address is null")]
    NullRecipient,

    /// Source and destination chain are the same.
    #[error("Same-chain transfer on {0}")]
    SameChainTransfer(ChainId),

    /// Destination chain is not in the registry.
    #[error("Unsupported chain: {0}")]
    UnsupportedChain(ChainId),

    /// Destination chain is registered but deactivated.
    #[error("Inactive chain: {0}")]
    InactiveChain(ChainId),

    /// Registry operation against a chain that was never added.
    #[error("Unknown chain: {0}")]
    UnknownChain(ChainId),

    /// Chain is already in the registry.
    #[error("Chain already supported: {0}")]
    AlreadySupported(ChainId),

    /// The home chain cannot be added, removed, or deactivated.
    #[error("Home chain {0} is immutable")]
    HomeChainImmutable(ChainId),

    /// Paid fee is below the quoted bridge fee.
    #[error("Insufficient fee: required {required}, paid {paid}")]
    InsufficientFee {
        /// Quoted fee.
        required: Amount,
        /// What the caller paid.
        paid: Amount,
    },

    /// Stake below the registration minimum.
    #[error("Insufficient stake: {stake} < minimum {minimum}")]
    InsufficientStake {
        /// Offered or current stake.
        stake: Amount,
        /// Registry minimum.
        minimum: Amount,
    },

    /// Withdrawal would leave an active relayer under the floor.
    #[error("Withdrawal leaves stake {remaining} below minimum {minimum}")]
    BelowMinimumStake {
        /// Stake after the withdrawal.
        remaining: Amount,
        /// Registry minimum.
        minimum: Amount,
    },

    /// Relayer is already registered and active.
    #[error("Relayer already registered: {}", display_address(.0))]
    AlreadyRegistered(Address),

    /// No such relayer.
    #[error("Unknown relayer: {}", display_address(.0))]
    UnknownRelayer(Address),

    /// Relayer exists but was deactivated.
    #[error("Relayer inactive: {}", display_address(.0))]
    RelayerInactive(Address),

    /// Caller lacks the capability or identity the operation requires.
    #[error("Unauthorized: {} may not {action}", display_address(.actor))]
    Unauthorized {
        /// The rejected caller.
        actor: Address,
        /// What was attempted.
        action: &'static str,
    },

    /// Relayer's chain context does not match the request destination.
    #[error("Wrong destination: request targets {expected}, relayer serves {got}")]
    WrongDestination {
        /// The request's destination chain.
        expected: ChainId,
        /// The relayer's chain context.
        got: ChainId,
    },

    /// Content hash already processed (replay guard).
    #[error("Duplicate request: content hash {} already seen", display_hash(.0))]
    DuplicateRequest(Hash),

    /// No request with this id.
    #[error("Request not found: {0}")]
    RequestNotFound(u64),

    /// Status precondition failed (covers "not pending").
    #[error("Invalid transition for request {id}: {from:?} -> {to:?}")]
    InvalidTransition {
        /// Request id.
        id: u64,
        /// Current status.
        from: BridgeStatus,
        /// Attempted status.
        to: BridgeStatus,
    },

    /// Request originated on another chain; its lifecycle is owned there.
    #[error("Request originated on foreign chain {chain}")]
    ForeignOrigin {
        /// The foreign source chain.
        chain: ChainId,
    },

    /// The asset ledger declined lock/release/refund.
    #[error("Custody failure: {0}")]
    Custody(#[from] CustodyError),
}
