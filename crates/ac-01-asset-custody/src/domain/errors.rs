//! # Custody Errors

use super::entities::{AssetKind, EscrowId};
use thiserror::Error;

/// Asset custody error types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CustodyError {
    /// The external asset ledger declined the transfer (insufficient
    /// balance or allowance, or NFT ownership mismatch).
    #[error("Transfer rejected by asset ledger: {reason}")]
    TransferRejected {
        /// Ledger-supplied decline reason.
        reason: String,
    },

    /// No locked balance exists for the escrow id driving the call.
    #[error("No custody entry for {0}")]
    CustodyEmpty(EscrowId),

    /// An entry already exists for this escrow id.
    #[error("Custody entry already exists for {0}")]
    DuplicateEscrow(EscrowId),

    /// Asset kind and value shape disagree (fungible kinds carry an amount,
    /// NFTs carry a token id).
    #[error("Asset value does not match kind {kind:?}")]
    MismatchedValue {
        /// The declared asset kind.
        kind: AssetKind,
    },

    /// Fungible locks must carry a positive amount.
    #[error("Zero-amount custody lock")]
    ZeroValue,
}
