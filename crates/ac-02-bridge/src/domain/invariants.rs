//! # Domain Invariants
//!
//! Pure validation rules and the request content hash.

use super::errors::BridgeError;
use ac_01_asset_custody::{AssetSpec, AssetValue};
use sha2::{Digest, Sha256};
use shared_types::{Address, Amount, ChainId, Hash, Timestamp, ZERO_ADDRESS};

/// Deterministic fingerprint of a bridge request.
///
/// Covers (sender, recipient, chains, asset, creation time) — everything
/// that identifies the transfer, and nothing assigned by this instance
/// (the monotonic id is deliberately excluded, otherwise no two requests
/// could ever collide and the replay set would be inert).
pub fn content_hash(
    sender: &Address,
    recipient: &Address,
    source_chain: ChainId,
    destination_chain: ChainId,
    asset: &AssetSpec,
    created_at: Timestamp,
) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(sender);
    hasher.update(recipient);
    hasher.update(source_chain.as_u64().to_be_bytes());
    hasher.update(destination_chain.as_u64().to_be_bytes());
    hasher.update([asset.kind as u8]);
    hasher.update(asset.asset);
    match asset.value {
        AssetValue::Fungible(amount) => {
            hasher.update([0u8]);
            hasher.update(amount.to_be_bytes());
        }
        AssetValue::NonFungible(token_id) => {
            hasher.update([1u8]);
            hasher.update(token_id.to_be_bytes());
        }
    }
    hasher.update(created_at.to_be_bytes());
    hasher.finalize().into()
}

/// Invariant: fungible transfers move a positive amount.
pub fn invariant_positive_value(asset: &AssetSpec) -> Result<(), BridgeError> {
    match asset.value {
        AssetValue::Fungible(0) => Err(BridgeError::ZeroAmount),
        _ => Ok(()),
    }
}

/// Invariant: fungible transfers stay within the system ceiling.
pub fn invariant_within_ceiling(asset: &AssetSpec, maximum: Amount) -> Result<(), BridgeError> {
    match asset.value {
        AssetValue::Fungible(amount) if amount > maximum => {
            Err(BridgeError::AmountTooLarge { amount, maximum })
        }
        _ => Ok(()),
    }
}

/// Invariant: the recipient must be a real address.
pub fn invariant_recipient_present(recipient: &Address) -> Result<(), BridgeError> {
    if *recipient == ZERO_ADDRESS {
        return Err(BridgeError::NullRecipient);
    }
    Ok(())
}

/// Invariant: a bridge request must actually cross chains.
pub fn invariant_cross_chain(
    source: ChainId,
    destination: ChainId,
) -> Result<(), BridgeError> {
    if source == destination {
        return Err(BridgeError::SameChainTransfer(source));
    }
    Ok(())
}
