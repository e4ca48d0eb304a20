//! # Custody Entities
//!
//! What gets escrowed, and under which key.

use super::errors::CustodyError;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount, Timestamp, TokenId};

/// The three asset kinds the platform bridges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetKind {
    /// Fungible platform token.
    Token,
    /// Non-fungible item.
    Nft,
    /// Fungible in-game asset (consumables, currencies).
    GamingAsset,
}

impl AssetKind {
    /// Fungible kinds carry an amount; NFTs carry a token id.
    pub fn is_fungible(&self) -> bool {
        matches!(self, AssetKind::Token | AssetKind::GamingAsset)
    }
}

/// The escrowed quantity: an amount for fungibles, a token id for NFTs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetValue {
    /// Fungible amount.
    Fungible(Amount),
    /// Non-fungible token id.
    NonFungible(TokenId),
}

/// A concrete asset to lock: kind, contract address, and quantity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetSpec {
    /// Asset kind.
    pub kind: AssetKind,
    /// Asset contract address on the home chain.
    pub asset: Address,
    /// Escrowed quantity.
    pub value: AssetValue,
}

impl AssetSpec {
    /// Fungible spec constructor.
    pub fn fungible(kind: AssetKind, asset: Address, amount: Amount) -> Self {
        Self {
            kind,
            asset,
            value: AssetValue::Fungible(amount),
        }
    }

    /// NFT spec constructor.
    pub fn nft(asset: Address, token_id: TokenId) -> Self {
        Self {
            kind: AssetKind::Nft,
            asset,
            value: AssetValue::NonFungible(token_id),
        }
    }

    /// Check kind/value agreement and positivity.
    pub fn validate(&self) -> Result<(), CustodyError> {
        match (self.kind.is_fungible(), self.value) {
            (true, AssetValue::Fungible(amount)) => {
                if amount == 0 {
                    Err(CustodyError::ZeroValue)
                } else {
                    Ok(())
                }
            }
            (false, AssetValue::NonFungible(_)) => Ok(()),
            _ => Err(CustodyError::MismatchedValue { kind: self.kind }),
        }
    }

    /// The fungible amount, or zero for NFTs (used for volume accounting).
    pub fn fungible_amount(&self) -> Amount {
        match self.value {
            AssetValue::Fungible(amount) => amount,
            AssetValue::NonFungible(_) => 0,
        }
    }
}

/// Escrow key: which entity's funds this entry backs.
///
/// Bridge requests and settlements share one vault; the enum key keeps
/// their id spaces from colliding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EscrowId {
    /// Funds backing a bridge request.
    Bridge(u64),
    /// Funds backing a settlement.
    Settlement(u64),
}

impl std::fmt::Display for EscrowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EscrowId::Bridge(id) => write!(f, "bridge-request-{id}"),
            EscrowId::Settlement(id) => write!(f, "settlement-{id}"),
        }
    }
}

/// A locked holding, keyed by escrow id in the vault.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustodyEntry {
    /// The escrow key.
    pub escrow: EscrowId,
    /// What is locked.
    pub spec: AssetSpec,
    /// Who the funds came from (refund target).
    pub locked_from: Address,
    /// When the lock was taken.
    pub locked_at: Timestamp,
}
