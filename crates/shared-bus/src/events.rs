//! # Bridge & Settlement Events
//!
//! Defines all event types that flow through the shared bus.
//!
//! Transition payloads carry the entity id, the old and new status (as
//! strings, so the bus stays decoupled from subsystem status enums), the
//! acting address, and the timestamp of the transition.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount, ChainId, Timestamp};
use uuid::Uuid;

/// A single accepted state transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transition {
    /// Correlation id for pairing with downstream records.
    pub correlation_id: Uuid,
    /// Entity id (request id or settlement id).
    pub entity_id: u64,
    /// Status before the transition.
    pub from: String,
    /// Status after the transition.
    pub to: String,
    /// The address that drove the transition.
    pub actor: Address,
    /// When the transition happened.
    pub timestamp: Timestamp,
}

impl Transition {
    /// Build a transition record with a fresh correlation id.
    pub fn new(
        entity_id: u64,
        from: impl Into<String>,
        to: impl Into<String>,
        actor: Address,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            entity_id,
            from: from.into(),
            to: to.into(),
            actor,
            timestamp,
        }
    }
}

/// All events that can be published to the event bus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BridgeEvent {
    // =========================================================================
    // AC-02: BRIDGE
    // =========================================================================
    /// A bridge request entered the system.
    RequestCreated {
        /// The new request's id.
        request_id: u64,
        /// The sending address.
        sender: Address,
        /// Destination chain.
        destination: ChainId,
        /// Creation time.
        timestamp: Timestamp,
    },

    /// A bridge request changed status (process / cancel).
    RequestTransition(Transition),

    /// A relayer registered with stake.
    RelayerRegistered {
        /// The relayer address.
        relayer: Address,
        /// Initial stake.
        stake: Amount,
        /// Registration time.
        timestamp: Timestamp,
    },

    /// A relayer's stake changed (add / withdraw).
    RelayerStakeChanged {
        /// The relayer address.
        relayer: Address,
        /// Stake after the change.
        stake: Amount,
        /// When the change happened.
        timestamp: Timestamp,
    },

    /// A destination chain was added to the registry.
    ChainAdded {
        /// The new chain.
        chain: ChainId,
        /// When it was added.
        timestamp: Timestamp,
    },

    /// A chain was activated or deactivated.
    ChainActivation {
        /// The chain.
        chain: ChainId,
        /// New active flag.
        active: bool,
        /// When the flag changed.
        timestamp: Timestamp,
    },

    /// Accrued fees were withdrawn by an admin.
    FeesCollected {
        /// The withdrawing address.
        collector: Address,
        /// Amount drained from the pool.
        amount: Amount,
        /// When the withdrawal happened.
        timestamp: Timestamp,
    },

    // =========================================================================
    // AC-03: SETTLEMENT
    // =========================================================================
    /// An L3 transaction was registered as a settlement.
    SettlementCreated {
        /// The new settlement's id.
        settlement_id: u64,
        /// Paying side.
        from: Address,
        /// Receiving side.
        to: Address,
        /// Settled amount.
        amount: Amount,
        /// End of the dispute window.
        dispute_deadline: Timestamp,
        /// Creation time.
        timestamp: Timestamp,
    },

    /// A settlement changed status (confirm / dispute / resolve).
    SettlementTransition(Transition),

    /// A dispute was opened against a settlement.
    DisputeOpened {
        /// The disputed settlement.
        settlement_id: u64,
        /// Who opened the dispute.
        initiator: Address,
        /// Short reason.
        reason: String,
        /// When the dispute was opened.
        timestamp: Timestamp,
    },

    /// A dispute was closed.
    DisputeResolved {
        /// The settlement the dispute belonged to.
        settlement_id: u64,
        /// The resolving address.
        resolver: Address,
        /// Whether the settlement was approved (funds released).
        approved: bool,
        /// When the dispute was closed.
        timestamp: Timestamp,
    },
}

/// Coarse event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Bridge request lifecycle.
    Requests,
    /// Relayer registration and stake.
    Relayers,
    /// Chain registry changes.
    Chains,
    /// Fee pool withdrawals.
    Fees,
    /// Settlement lifecycle.
    Settlements,
    /// Dispute lifecycle.
    Disputes,
}

impl BridgeEvent {
    /// The topic this event belongs to.
    pub fn topic(&self) -> EventTopic {
        match self {
            BridgeEvent::RequestCreated { .. } | BridgeEvent::RequestTransition(_) => {
                EventTopic::Requests
            }
            BridgeEvent::RelayerRegistered { .. } | BridgeEvent::RelayerStakeChanged { .. } => {
                EventTopic::Relayers
            }
            BridgeEvent::ChainAdded { .. } | BridgeEvent::ChainActivation { .. } => {
                EventTopic::Chains
            }
            BridgeEvent::FeesCollected { .. } => EventTopic::Fees,
            BridgeEvent::SettlementCreated { .. } | BridgeEvent::SettlementTransition(_) => {
                EventTopic::Settlements
            }
            BridgeEvent::DisputeOpened { .. } | BridgeEvent::DisputeResolved { .. } => {
                EventTopic::Disputes
            }
        }
    }
}

/// Filter applied on the subscriber side.
///
/// An empty filter matches everything.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    topics: Option<std::collections::HashSet<EventTopic>>,
}

impl EventFilter {
    /// Match all events.
    pub fn all() -> Self {
        Self::default()
    }

    /// Match only the given topics.
    pub fn topics(topics: impl IntoIterator<Item = EventTopic>) -> Self {
        Self {
            topics: Some(topics.into_iter().collect()),
        }
    }

    /// Does `event` pass this filter?
    pub fn matches(&self, event: &BridgeEvent) -> bool {
        match &self.topics {
            None => true,
            Some(set) => set.contains(&event.topic()),
        }
    }
}
