//! # Settlement State
//!
//! The settlement table, the source-transaction replay set, and the
//! per-party index, all guarded by the service's lock.

use crate::domain::Settlement;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount, Hash};
use std::collections::{HashMap, HashSet};

/// Aggregate counters surfaced by the query API.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementStats {
    /// Settlements ever created.
    pub total_settlements: u64,
    /// Amount ever locked into settlement escrow.
    pub total_amount: Amount,
    /// Undrained dispute fee pool.
    pub dispute_fee_pool: Amount,
    /// Disputes ever opened.
    pub total_disputes: u64,
}

/// The mutable settlement state; all access goes through the service's lock.
pub struct SettlementState {
    /// All settlements by id.
    pub settlements: HashMap<u64, Settlement>,
    /// Next monotonic settlement id.
    pub next_settlement_id: u64,
    /// Replay guard: source transaction ids ever settled.
    pub seen_sources: HashSet<Hash>,
    /// Settlement ids per participating address (payer or recipient).
    pub by_party: HashMap<Address, Vec<u64>>,
    /// Accrued, undrained dispute fees. Wholly separate from custody.
    pub dispute_fee_pool: Amount,
    /// Settlements ever created.
    pub total_settlements: u64,
    /// Amount ever locked.
    pub total_amount: Amount,
    /// Disputes ever opened.
    pub total_disputes: u64,
}

impl SettlementState {
    /// Fresh, empty state.
    pub fn new() -> Self {
        Self {
            settlements: HashMap::new(),
            next_settlement_id: 1,
            seen_sources: HashSet::new(),
            by_party: HashMap::new(),
            dispute_fee_pool: 0,
            total_settlements: 0,
            total_amount: 0,
            total_disputes: 0,
        }
    }

    /// Index a freshly inserted settlement under both parties.
    pub fn index_insert(&mut self, id: u64, from: Address, to: Address) {
        self.by_party.entry(from).or_default().push(id);
        if to != from {
            self.by_party.entry(to).or_default().push(id);
        }
    }

    /// Snapshot of the aggregate counters.
    pub fn stats(&self) -> SettlementStats {
        SettlementStats {
            total_settlements: self.total_settlements,
            total_amount: self.total_amount,
            dispute_fee_pool: self.dispute_fee_pool,
            total_disputes: self.total_disputes,
        }
    }
}

impl Default for SettlementState {
    fn default() -> Self {
        Self::new()
    }
}
