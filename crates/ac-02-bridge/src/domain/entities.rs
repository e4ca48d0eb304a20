//! # Domain Entities
//!
//! Chain configuration, relayer accounting, and the bridge request itself.

use super::errors::BridgeError;
use super::value_objects::BridgeStatus;
use ac_01_asset_custody::AssetSpec;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount, ChainId, Hash, Timestamp};

/// Configuration for one destination chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    /// The chain this entry describes.
    pub chain_id: ChainId,
    /// Whether the bridge recognizes the chain at all.
    pub is_supported: bool,
    /// Whether transfers to the chain are currently accepted.
    pub is_active: bool,
    /// Confirmations required before a relayer may report an outcome.
    pub min_confirmations: u64,
    /// Maximum in-flight requests the chain side can absorb.
    pub max_throughput: u64,
    /// Admin-set base fee per transfer.
    pub bridge_fee: Amount,
}

/// Per-relayer stake and throughput accounting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayerInfo {
    /// Relayer address.
    pub address: Address,
    /// Current stake.
    pub stake: Amount,
    /// Requests processed (success or failure outcomes both count).
    pub total_processed: u64,
    /// Fungible volume moved across all processed requests.
    pub total_volume: Amount,
    /// Last time this relayer registered, staked, or processed.
    pub last_activity: Timestamp,
    /// Active flag; relayers are deactivated, never deleted.
    pub is_active: bool,
}

/// Caller-supplied parameters for a new bridge request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRequestParams {
    /// Recipient on the destination chain.
    pub recipient: Address,
    /// Destination chain.
    pub destination: ChainId,
    /// The asset to move.
    pub asset: AssetSpec,
}

/// A cross-chain transfer request.
///
/// Immutable once in a terminal status; the content hash is computed once
/// at creation and never recomputed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeRequest {
    /// Monotonic id.
    pub id: u64,
    /// Originating sender.
    pub sender: Address,
    /// Destination-side recipient.
    pub recipient: Address,
    /// Chain the request was created on.
    pub source_chain: ChainId,
    /// Chain the asset is headed to.
    pub destination_chain: ChainId,
    /// The asset being moved.
    pub asset: AssetSpec,
    /// Replay-guard fingerprint.
    pub content_hash: Hash,
    /// Current status.
    pub status: BridgeStatus,
    /// Creation time.
    pub created_at: Timestamp,
    /// When a terminal status was reached.
    pub processed_at: Option<Timestamp>,
    /// The relayer that claimed the request.
    pub processing_relayer: Option<Address>,
}

impl BridgeRequest {
    /// Transition to a new status, enforcing the state machine.
    pub fn transition_to(&mut self, next: BridgeStatus) -> Result<(), BridgeError> {
        if !self.status.can_transition_to(next) {
            return Err(BridgeError::InvalidTransition {
                id: self.id,
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }
}
