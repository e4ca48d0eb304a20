//! # Inbound Ports
//!
//! The surface the bridge exposes to callers: wallets, relayer nodes, and
//! the admin console.

use crate::domain::{
    BridgeError, BridgeRequest, BridgeStatus, ChainConfig, CreateRequestParams, RelayerInfo,
};
use crate::state::BridgeStats;
use async_trait::async_trait;
use shared_types::{Address, Amount, ChainId};

/// Bridge API - inbound port.
#[async_trait]
pub trait BridgeApi: Send + Sync {
    /// Create a bridge request; the single authoritative entry point.
    ///
    /// Locks the asset into custody and records the request as PENDING.
    async fn create_request(
        &self,
        sender: Address,
        params: CreateRequestParams,
        fee_paid: Amount,
    ) -> Result<u64, BridgeError>;

    /// Report the destination-side outcome of a request.
    ///
    /// `relayer_chain` is the chain context the relayer serves; it must
    /// match the request's destination. Exactly one concurrent attempt per
    /// request succeeds.
    async fn process_request(
        &self,
        relayer: Address,
        relayer_chain: ChainId,
        request_id: u64,
        success: bool,
    ) -> Result<BridgeStatus, BridgeError>;

    /// Cancel a still-PENDING request; sender only, home-origin only.
    async fn cancel_request(&self, caller: Address, request_id: u64) -> Result<(), BridgeError>;

    /// Register as a relayer with an initial stake.
    async fn register_relayer(&self, relayer: Address, stake: Amount) -> Result<(), BridgeError>;

    /// Top up relayer stake. Returns the new stake.
    async fn add_stake(&self, relayer: Address, amount: Amount) -> Result<Amount, BridgeError>;

    /// Withdraw relayer stake down to the floor. Returns the remaining stake.
    async fn withdraw_stake(&self, relayer: Address, amount: Amount)
        -> Result<Amount, BridgeError>;

    /// Add a destination chain (admin).
    async fn add_chain(
        &self,
        admin: Address,
        chain: ChainId,
        min_confirmations: u64,
        max_throughput: u64,
        bridge_fee: Amount,
    ) -> Result<(), BridgeError>;

    /// Activate or deactivate a destination chain (admin).
    async fn set_chain_active(
        &self,
        admin: Address,
        chain: ChainId,
        active: bool,
    ) -> Result<(), BridgeError>;

    /// Drain the accrued fee pool (admin). Returns the amount withdrawn.
    async fn collect_fees(&self, admin: Address) -> Result<Amount, BridgeError>;

    /// Get a request by id.
    fn request(&self, request_id: u64) -> Option<BridgeRequest>;

    /// All requests created by `sender`, in creation order.
    fn requests_by_sender(&self, sender: &Address) -> Vec<BridgeRequest>;

    /// Ids of PENDING requests headed to `chain`.
    fn pending_for_chain(&self, chain: ChainId) -> Vec<u64>;

    /// Get a relayer's accounting record.
    fn relayer(&self, relayer: &Address) -> Option<RelayerInfo>;

    /// Get a chain's configuration.
    fn chain(&self, chain: ChainId) -> Option<ChainConfig>;

    /// Aggregate counters.
    fn stats(&self) -> BridgeStats;
}
