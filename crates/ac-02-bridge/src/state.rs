//! # Bridge State
//!
//! Everything the service guards behind one lock: the request table, the
//! replay set, the registries, the fee pool, and the secondary indexes.
//!
//! ## Indexes
//!
//! - `by_sender`: request ids per sender, in creation order
//! - `by_destination`: ids per (destination chain, status), maintained
//!   incrementally on every transition so enumeration never scans the
//!   whole table

use crate::domain::{BridgeRequest, BridgeStatus, ChainRegistry, RelayerRegistry};
use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount, ChainId, Hash};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Aggregate counters surfaced by the query API.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeStats {
    /// Requests ever created.
    pub total_requests: u64,
    /// Fungible volume ever locked at creation.
    pub total_volume: Amount,
    /// Undrained admin fee pool.
    pub fee_pool: Amount,
    /// Requests currently PENDING.
    pub open_requests: u64,
}

/// The mutable bridge state; all access goes through the service's lock.
pub struct BridgeState {
    /// Chain configuration store.
    pub chains: ChainRegistry,
    /// Relayer authorization and accounting.
    pub relayers: RelayerRegistry,
    /// All requests by id.
    pub requests: HashMap<u64, BridgeRequest>,
    /// Next monotonic request id.
    pub next_request_id: u64,
    /// Replay guard: content hashes ever accepted.
    pub seen_hashes: HashSet<Hash>,
    /// Request ids per sender.
    pub by_sender: HashMap<Address, Vec<u64>>,
    /// Request ids per (destination, status).
    pub by_destination: HashMap<(ChainId, BridgeStatus), BTreeSet<u64>>,
    /// Accrued, undrained bridge fees. Wholly separate from custody.
    pub fee_pool: Amount,
    /// Requests ever created.
    pub total_requests: u64,
    /// Fungible volume ever locked.
    pub total_volume: Amount,
}

impl BridgeState {
    /// Fresh state with the home chain registered and an empty relayer set.
    pub fn new(home_chain: ChainId, minimum_relayer_stake: Amount) -> Self {
        Self {
            chains: ChainRegistry::new(home_chain),
            relayers: RelayerRegistry::new(minimum_relayer_stake),
            requests: HashMap::new(),
            next_request_id: 1,
            seen_hashes: HashSet::new(),
            by_sender: HashMap::new(),
            by_destination: HashMap::new(),
            fee_pool: 0,
            total_requests: 0,
            total_volume: 0,
        }
    }

    /// Index a freshly inserted request.
    pub fn index_insert(&mut self, id: u64, sender: Address, destination: ChainId) {
        self.by_sender.entry(sender).or_default().push(id);
        self.by_destination
            .entry((destination, BridgeStatus::Pending))
            .or_default()
            .insert(id);
    }

    /// Move a request between (destination, status) index buckets.
    pub fn reindex(
        &mut self,
        id: u64,
        destination: ChainId,
        old_status: BridgeStatus,
        new_status: BridgeStatus,
    ) {
        if let Some(bucket) = self.by_destination.get_mut(&(destination, old_status)) {
            bucket.remove(&id);
        }
        self.by_destination
            .entry((destination, new_status))
            .or_default()
            .insert(id);
    }

    /// Snapshot of the aggregate counters.
    pub fn stats(&self) -> BridgeStats {
        let open_requests = self
            .by_destination
            .iter()
            .filter(|((_, status), _)| *status == BridgeStatus::Pending)
            .map(|(_, bucket)| bucket.len() as u64)
            .sum();
        BridgeStats {
            total_requests: self.total_requests,
            total_volume: self.total_volume,
            fee_pool: self.fee_pool,
            open_requests,
        }
    }
}
