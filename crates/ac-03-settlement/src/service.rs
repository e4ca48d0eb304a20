//! # Settlement Service
//!
//! Registration, confirmation, and the dispute sub-lifecycle. Transitions
//! validate and write under one guard; the dispute deadline is compared
//! against the injected clock at call time, never by a background timer.

use crate::domain::{
    CreateSettlementParams, Dispute, Settlement, SettlementError, SettlementStatus,
};
use crate::ports::{ProofVerifier, SettlementApi};
use crate::state::{SettlementState, SettlementStats};
use ac_01_asset_custody::{AssetKind, AssetLedger, AssetSpec, CustodyVault, EscrowId};
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_bus::{BridgeEvent, EventPublisher, Transition};
use shared_types::{
    display_address, Address, Amount, Capability, Clock, IdentityProvider, ZERO_ADDRESS,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Three days, the default dispute window.
const DEFAULT_DISPUTE_WINDOW_SECS: u64 = 3 * 24 * 3600;

/// Settlement configuration.
#[derive(Clone, Copy, Debug)]
pub struct SettlementConfig {
    /// Length of the dispute window after creation.
    pub dispute_window_secs: u64,
    /// Per-settlement amount ceiling.
    pub max_settlement_amount: Amount,
    /// Admin-set fee due when opening a dispute.
    pub dispute_fee: Amount,
    /// The asset settlements escrow in (the platform token).
    pub settlement_asset: Address,
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            dispute_window_secs: DEFAULT_DISPUTE_WINDOW_SECS,
            max_settlement_amount: 1_000_000_000_000,
            dispute_fee: 100,
            settlement_asset: [0x51u8; 20],
        }
    }
}

/// Settlement service implementation.
pub struct SettlementService<L, I, V>
where
    L: AssetLedger,
    I: IdentityProvider,
    V: ProofVerifier,
{
    config: SettlementConfig,
    state: Arc<RwLock<SettlementState>>,
    custody: Arc<CustodyVault<L>>,
    identity: Arc<I>,
    verifier: Arc<V>,
    clock: Arc<dyn Clock>,
    bus: Arc<dyn EventPublisher>,
}

impl<L, I, V> SettlementService<L, I, V>
where
    L: AssetLedger,
    I: IdentityProvider,
    V: ProofVerifier,
{
    /// Create a settlement service.
    pub fn new(
        config: SettlementConfig,
        custody: Arc<CustodyVault<L>>,
        identity: Arc<I>,
        verifier: Arc<V>,
        clock: Arc<dyn Clock>,
        bus: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            config,
            state: Arc::new(RwLock::new(SettlementState::new())),
            custody,
            identity,
            verifier,
            clock,
            bus,
        }
    }

    /// The configuration this service was built with.
    pub fn config(&self) -> &SettlementConfig {
        &self.config
    }

    /// Drain the accrued dispute fee pool (admin). Returns the amount.
    pub async fn collect_dispute_fees(&self, admin: Address) -> Result<Amount, SettlementError> {
        self.require_capability(&admin, Capability::Admin, "collect dispute fees")?;
        let now = self.clock.now();
        let amount = {
            let mut st = self.state.write();
            std::mem::take(&mut st.dispute_fee_pool)
        };
        self.bus
            .publish(BridgeEvent::FeesCollected {
                collector: admin,
                amount,
                timestamp: now,
            })
            .await;
        Ok(amount)
    }

    fn require_capability(
        &self,
        who: &Address,
        capability: Capability,
        action: &'static str,
    ) -> Result<(), SettlementError> {
        if !self.identity.has_capability(who, capability) {
            warn!(actor = %display_address(who), action, "capability missing");
            return Err(SettlementError::Unauthorized { actor: *who, action });
        }
        Ok(())
    }

    async fn publish_all(&self, events: Vec<BridgeEvent>) {
        for event in events {
            self.bus.publish(event).await;
        }
    }
}

#[async_trait]
impl<L, I, V> SettlementApi for SettlementService<L, I, V>
where
    L: AssetLedger,
    I: IdentityProvider,
    V: ProofVerifier,
{
    async fn create_settlement(
        &self,
        caller: Address,
        params: CreateSettlementParams,
    ) -> Result<u64, SettlementError> {
        self.require_capability(&caller, Capability::Confirmer, "create a settlement")?;
        let now = self.clock.now();
        let mut events = Vec::new();
        let id = {
            let mut st = self.state.write();

            if params.to == ZERO_ADDRESS {
                return Err(SettlementError::NullRecipient);
            }
            if params.amount == 0 {
                return Err(SettlementError::ZeroAmount);
            }
            if params.amount > self.config.max_settlement_amount {
                return Err(SettlementError::AmountTooLarge {
                    amount: params.amount,
                    maximum: self.config.max_settlement_amount,
                });
            }
            if st.seen_sources.contains(&params.source_transaction_id) {
                return Err(SettlementError::DuplicateSource(params.source_transaction_id));
            }
            if !self
                .verifier
                .verify(&params.verification_root, &params.source_transaction_id)
            {
                return Err(SettlementError::ProofRejected {
                    source_tx: params.source_transaction_id,
                });
            }

            let id = st.next_settlement_id;
            self.custody.lock(
                EscrowId::Settlement(id),
                AssetSpec::fungible(AssetKind::Token, self.config.settlement_asset, params.amount),
                params.from,
                now,
            )?;

            let dispute_deadline = now + self.config.dispute_window_secs;
            st.seen_sources.insert(params.source_transaction_id);
            st.settlements.insert(
                id,
                Settlement {
                    id,
                    from: params.from,
                    to: params.to,
                    amount: params.amount,
                    created_at: now,
                    status: SettlementStatus::Pending,
                    source_transaction_id: params.source_transaction_id,
                    verification_root: params.verification_root,
                    dispute_deadline,
                    dispute: None,
                },
            );
            st.index_insert(id, params.from, params.to);
            st.next_settlement_id += 1;
            st.total_settlements += 1;
            st.total_amount += params.amount;

            events.push(BridgeEvent::SettlementCreated {
                settlement_id: id,
                from: params.from,
                to: params.to,
                amount: params.amount,
                dispute_deadline,
                timestamp: now,
            });
            id
        };

        info!(settlement_id = id, amount = params.amount, "settlement created");
        self.publish_all(events).await;
        Ok(id)
    }

    async fn confirm_settlement(
        &self,
        caller: Address,
        settlement_id: u64,
    ) -> Result<(), SettlementError> {
        self.require_capability(&caller, Capability::Confirmer, "confirm a settlement")?;
        let now = self.clock.now();
        let mut events = Vec::new();
        {
            let mut st = self.state.write();
            let settlement = st
                .settlements
                .get_mut(&settlement_id)
                .ok_or(SettlementError::SettlementNotFound(settlement_id))?;
            if settlement.status != SettlementStatus::Pending {
                return Err(SettlementError::InvalidTransition {
                    id: settlement_id,
                    from: settlement.status,
                    to: SettlementStatus::Confirmed,
                });
            }
            if !settlement.within_window(now) {
                return Err(SettlementError::WindowExpired {
                    deadline: settlement.dispute_deadline,
                    now,
                });
            }

            // Status untouched if the ledger declines, so the confirmer can
            // retry the whole operation.
            self.custody
                .release(EscrowId::Settlement(settlement_id), &settlement.to)?;
            settlement.transition_to(SettlementStatus::Confirmed)?;

            events.push(BridgeEvent::SettlementTransition(Transition::new(
                settlement_id,
                "Pending",
                "Confirmed",
                caller,
                now,
            )));
        }

        info!(settlement_id, "settlement confirmed");
        self.publish_all(events).await;
        Ok(())
    }

    async fn initiate_dispute(
        &self,
        caller: Address,
        settlement_id: u64,
        reason: String,
        details: String,
        fee_paid: Amount,
    ) -> Result<(), SettlementError> {
        let now = self.clock.now();
        let mut events = Vec::new();
        {
            let mut st = self.state.write();
            let settlement = st
                .settlements
                .get_mut(&settlement_id)
                .ok_or(SettlementError::SettlementNotFound(settlement_id))?;

            let is_recipient = caller == settlement.to;
            if !is_recipient
                && !self
                    .identity
                    .has_capability(&caller, Capability::DisputeResolver)
            {
                return Err(SettlementError::Unauthorized {
                    actor: caller,
                    action: "dispute this settlement",
                });
            }
            if settlement.status != SettlementStatus::Pending {
                return Err(SettlementError::InvalidTransition {
                    id: settlement_id,
                    from: settlement.status,
                    to: SettlementStatus::Disputed,
                });
            }
            if !settlement.within_window(now) {
                return Err(SettlementError::WindowExpired {
                    deadline: settlement.dispute_deadline,
                    now,
                });
            }
            if fee_paid < self.config.dispute_fee {
                return Err(SettlementError::InsufficientFee {
                    required: self.config.dispute_fee,
                    paid: fee_paid,
                });
            }

            settlement.transition_to(SettlementStatus::Disputed)?;
            settlement.dispute = Some(Dispute {
                settlement_id,
                initiator: caller,
                reason: reason.clone(),
                details,
                created_at: now,
                resolved: false,
                resolver: None,
                resolution: None,
            });
            st.dispute_fee_pool += self.config.dispute_fee;
            st.total_disputes += 1;

            events.push(BridgeEvent::SettlementTransition(Transition::new(
                settlement_id,
                "Pending",
                "Disputed",
                caller,
                now,
            )));
            events.push(BridgeEvent::DisputeOpened {
                settlement_id,
                initiator: caller,
                reason,
                timestamp: now,
            });
        }

        info!(settlement_id, "dispute opened");
        self.publish_all(events).await;
        Ok(())
    }

    async fn resolve_dispute(
        &self,
        caller: Address,
        settlement_id: u64,
        resolution: String,
        approve: bool,
    ) -> Result<(), SettlementError> {
        self.require_capability(&caller, Capability::DisputeResolver, "resolve a dispute")?;
        let now = self.clock.now();
        let mut events = Vec::new();
        {
            let mut st = self.state.write();
            let settlement = st
                .settlements
                .get_mut(&settlement_id)
                .ok_or(SettlementError::SettlementNotFound(settlement_id))?;

            match settlement.status {
                SettlementStatus::Disputed => {}
                SettlementStatus::Resolved | SettlementStatus::Cancelled => {
                    return Err(SettlementError::AlreadyResolved(settlement_id));
                }
                other => {
                    return Err(SettlementError::InvalidTransition {
                        id: settlement_id,
                        from: other,
                        to: SettlementStatus::Resolved,
                    });
                }
            }

            let outcome = if approve {
                // Approval makes the recipient whole.
                self.custody
                    .release(EscrowId::Settlement(settlement_id), &settlement.to)?;
                settlement.transition_to(SettlementStatus::Resolved)?;
                "Resolved"
            } else {
                // Rejection cancels the settlement. The escrow entry stays
                // in custody for manual recovery; the L3-side sender is
                // off-system and cannot be refunded from here.
                settlement.transition_to(SettlementStatus::Cancelled)?;
                "Cancelled"
            };

            if let Some(dispute) = settlement.dispute.as_mut() {
                dispute.resolved = true;
                dispute.resolver = Some(caller);
                dispute.resolution = Some(resolution);
            }

            events.push(BridgeEvent::SettlementTransition(Transition::new(
                settlement_id,
                "Disputed",
                outcome,
                caller,
                now,
            )));
            events.push(BridgeEvent::DisputeResolved {
                settlement_id,
                resolver: caller,
                approved: approve,
                timestamp: now,
            });
        }

        info!(settlement_id, approve, "dispute resolved");
        self.publish_all(events).await;
        Ok(())
    }

    fn settlement(&self, settlement_id: u64) -> Option<Settlement> {
        self.state.read().settlements.get(&settlement_id).cloned()
    }

    fn settlements_for(&self, party: &Address) -> Vec<Settlement> {
        let st = self.state.read();
        st.by_party
            .get(party)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| st.settlements.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn stats(&self) -> SettlementStats {
        self.state.read().stats()
    }
}
