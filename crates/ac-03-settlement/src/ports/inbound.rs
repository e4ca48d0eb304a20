//! # Inbound Ports
//!
//! The surface the settlement ledger exposes to the confirmer, recipients,
//! and dispute resolvers.

use crate::domain::{CreateSettlementParams, Settlement, SettlementError};
use crate::state::SettlementStats;
use async_trait::async_trait;
use shared_types::{Address, Amount};

/// Settlement API - inbound port.
#[async_trait]
pub trait SettlementApi: Send + Sync {
    /// Register an L3 transaction as a settlement (confirmer capability).
    ///
    /// Verifies the proof, locks escrow, and opens the dispute window.
    async fn create_settlement(
        &self,
        caller: Address,
        params: CreateSettlementParams,
    ) -> Result<u64, SettlementError>;

    /// Confirm a PENDING settlement within its dispute window (confirmer
    /// capability). Releases escrow to the recipient.
    async fn confirm_settlement(
        &self,
        caller: Address,
        settlement_id: u64,
    ) -> Result<(), SettlementError>;

    /// Contest a PENDING settlement within its window. Only the
    /// settlement's recipient or a dispute-resolver may initiate; a
    /// dispute fee is due.
    async fn initiate_dispute(
        &self,
        caller: Address,
        settlement_id: u64,
        reason: String,
        details: String,
        fee_paid: Amount,
    ) -> Result<(), SettlementError>;

    /// Close a dispute (dispute-resolver capability). Approval releases
    /// escrow to the recipient; rejection cancels the settlement and
    /// leaves the escrow in custody.
    async fn resolve_dispute(
        &self,
        caller: Address,
        settlement_id: u64,
        resolution: String,
        approve: bool,
    ) -> Result<(), SettlementError>;

    /// Get a settlement by id.
    fn settlement(&self, settlement_id: u64) -> Option<Settlement>;

    /// All settlements where `party` pays or receives, in creation order.
    fn settlements_for(&self, party: &Address) -> Vec<Settlement>;

    /// Aggregate counters.
    fn stats(&self) -> SettlementStats;
}
