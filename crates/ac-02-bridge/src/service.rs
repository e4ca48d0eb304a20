//! # Bridge Service
//!
//! The request processor: creation, relayer processing, cancellation, and
//! the admin surface over the chain and relayer registries.
//!
//! Every transition validates and writes inside one write guard, so two
//! concurrent `process_request` calls on the same id resolve to exactly
//! one winner; the loser observes the status precondition failure.

use crate::domain::{
    invariants, BridgeError, BridgeRequest, BridgeStatus, ChainConfig, CreateRequestParams,
    RelayerInfo,
};
use crate::ports::{BridgeApi, FeeOracle};
use crate::state::{BridgeState, BridgeStats};
use ac_01_asset_custody::{AssetLedger, CustodyVault, EscrowId};
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_bus::{BridgeEvent, EventPublisher, Transition};
use shared_types::{
    display_address, Address, Amount, Capability, ChainId, Clock, IdentityProvider,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Bridge configuration.
#[derive(Clone, Copy, Debug)]
pub struct BridgeConfig {
    /// The chain this instance runs on.
    pub home_chain: ChainId,
    /// Per-transfer ceiling for fungible amounts.
    pub max_transfer_amount: Amount,
    /// Stake floor for relayer registration and processing.
    pub minimum_relayer_stake: Amount,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            home_chain: ChainId(1),
            max_transfer_amount: 1_000_000_000_000,
            minimum_relayer_stake: 10_000,
        }
    }
}

/// Bridge service implementation.
pub struct BridgeService<L, I, F>
where
    L: AssetLedger,
    I: IdentityProvider,
    F: FeeOracle,
{
    config: BridgeConfig,
    state: Arc<RwLock<BridgeState>>,
    custody: Arc<CustodyVault<L>>,
    identity: Arc<I>,
    fee_oracle: Arc<F>,
    clock: Arc<dyn Clock>,
    bus: Arc<dyn EventPublisher>,
}

impl<L, I, F> BridgeService<L, I, F>
where
    L: AssetLedger,
    I: IdentityProvider,
    F: FeeOracle,
{
    /// Create a bridge service.
    pub fn new(
        config: BridgeConfig,
        custody: Arc<CustodyVault<L>>,
        identity: Arc<I>,
        fee_oracle: Arc<F>,
        clock: Arc<dyn Clock>,
        bus: Arc<dyn EventPublisher>,
    ) -> Self {
        let state = BridgeState::new(config.home_chain, config.minimum_relayer_stake);
        Self {
            config,
            state: Arc::new(RwLock::new(state)),
            custody,
            identity,
            fee_oracle,
            clock,
            bus,
        }
    }

    /// The configuration this service was built with.
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    fn require_admin(&self, who: &Address, action: &'static str) -> Result<(), BridgeError> {
        if !self.identity.has_capability(who, Capability::Admin) {
            warn!(actor = %display_address(who), action, "admin capability missing");
            return Err(BridgeError::Unauthorized { actor: *who, action });
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
impl<L, I, F> BridgeApi for BridgeService<L, I, F>
where
    L: AssetLedger,
    I: IdentityProvider,
    F: FeeOracle,
{
    async fn create_request(
        &self,
        sender: Address,
        params: CreateRequestParams,
        fee_paid: Amount,
    ) -> Result<u64, BridgeError> {
        let now = self.clock.now();
        let mut events = Vec::new();
        let id = {
            let mut st = self.state.write();

            invariants::invariant_recipient_present(&params.recipient)?;
            invariants::invariant_positive_value(&params.asset)?;
            invariants::invariant_within_ceiling(&params.asset, self.config.max_transfer_amount)?;
            invariants::invariant_cross_chain(st.chains.home(), params.destination)?;

            let required = {
                let chain = st.chains.require_routable(params.destination)?;
                self.fee_oracle.bridge_fee(params.destination, chain.bridge_fee)
            };
            if fee_paid < required {
                return Err(BridgeError::InsufficientFee {
                    required,
                    paid: fee_paid,
                });
            }

            let source = st.chains.home();
            let hash = invariants::content_hash(
                &sender,
                &params.recipient,
                source,
                params.destination,
                &params.asset,
                now,
            );
            if st.seen_hashes.contains(&hash) {
                return Err(BridgeError::DuplicateRequest(hash));
            }

            let id = st.next_request_id;
            self.custody
                .lock(EscrowId::Bridge(id), params.asset, sender, now)?;

            st.seen_hashes.insert(hash);
            st.requests.insert(
                id,
                BridgeRequest {
                    id,
                    sender,
                    recipient: params.recipient,
                    source_chain: source,
                    destination_chain: params.destination,
                    asset: params.asset,
                    content_hash: hash,
                    status: BridgeStatus::Pending,
                    created_at: now,
                    processed_at: None,
                    processing_relayer: None,
                },
            );
            st.index_insert(id, sender, params.destination);
            st.next_request_id += 1;
            st.fee_pool += required;
            st.total_requests += 1;
            st.total_volume += params.asset.fungible_amount();

            events.push(BridgeEvent::RequestCreated {
                request_id: id,
                sender,
                destination: params.destination,
                timestamp: now,
            });
            id
        };

        info!(
            request_id = id,
            sender = %display_address(&sender),
            destination = %params.destination,
            "bridge request created"
        );
        self.publish_all(events).await;
        Ok(id)
    }

    async fn process_request(
        &self,
        relayer: Address,
        relayer_chain: ChainId,
        request_id: u64,
        success: bool,
    ) -> Result<BridgeStatus, BridgeError> {
        let now = self.clock.now();
        let mut events = Vec::new();
        let final_status = {
            let mut st = self.state.write();
            st.relayers.require_authorized(&relayer)?;

            let (destination, volume, final_status) = {
                let req = st
                    .requests
                    .get_mut(&request_id)
                    .ok_or(BridgeError::RequestNotFound(request_id))?;
                if req.status != BridgeStatus::Pending {
                    return Err(BridgeError::InvalidTransition {
                        id: request_id,
                        from: req.status,
                        to: BridgeStatus::Processing,
                    });
                }
                if req.destination_chain != relayer_chain {
                    return Err(BridgeError::WrongDestination {
                        expected: req.destination_chain,
                        got: relayer_chain,
                    });
                }

                // Claim. Held and resolved within this same guard.
                req.transition_to(BridgeStatus::Processing)?;
                req.processing_relayer = Some(relayer);

                let custody_result = if success {
                    self.custody.release(EscrowId::Bridge(request_id), &req.recipient)
                } else {
                    self.custody.refund(EscrowId::Bridge(request_id))
                };
                if let Err(err) = custody_result {
                    // Roll the claim back: the status must read PENDING so
                    // the whole operation can be retried.
                    req.status = BridgeStatus::Pending;
                    req.processing_relayer = None;
                    warn!(request_id, error = %err, "custody declined, request left pending");
                    return Err(err.into());
                }

                let final_status = if success {
                    BridgeStatus::Completed
                } else {
                    BridgeStatus::Failed
                };
                req.transition_to(final_status)?;
                req.processed_at = Some(now);
                (req.destination_chain, req.asset.fungible_amount(), final_status)
            };

            st.reindex(request_id, destination, BridgeStatus::Pending, final_status);
            st.relayers.record_activity(&relayer, volume, now);

            events.push(BridgeEvent::RequestTransition(Transition::new(
                request_id,
                "Pending",
                "Processing",
                relayer,
                now,
            )));
            events.push(BridgeEvent::RequestTransition(Transition::new(
                request_id,
                "Processing",
                format!("{final_status:?}"),
                relayer,
                now,
            )));
            final_status
        };

        info!(
            request_id,
            relayer = %display_address(&relayer),
            outcome = ?final_status,
            "bridge request processed"
        );
        self.publish_all(events).await;
        Ok(final_status)
    }

    async fn cancel_request(&self, caller: Address, request_id: u64) -> Result<(), BridgeError> {
        let now = self.clock.now();
        let mut events = Vec::new();
        {
            let mut st = self.state.write();
            let home = st.chains.home();
            let destination = {
                let req = st
                    .requests
                    .get_mut(&request_id)
                    .ok_or(BridgeError::RequestNotFound(request_id))?;
                if req.sender != caller {
                    return Err(BridgeError::Unauthorized {
                        actor: caller,
                        action: "cancel this request",
                    });
                }
                if req.source_chain != home {
                    return Err(BridgeError::ForeignOrigin {
                        chain: req.source_chain,
                    });
                }
                if req.status != BridgeStatus::Pending {
                    return Err(BridgeError::InvalidTransition {
                        id: request_id,
                        from: req.status,
                        to: BridgeStatus::Cancelled,
                    });
                }

                self.custody.refund(EscrowId::Bridge(request_id))?;
                req.transition_to(BridgeStatus::Cancelled)?;
                req.processed_at = Some(now);
                req.destination_chain
            };
            st.reindex(
                request_id,
                destination,
                BridgeStatus::Pending,
                BridgeStatus::Cancelled,
            );
            events.push(BridgeEvent::RequestTransition(Transition::new(
                request_id,
                "Pending",
                "Cancelled",
                caller,
                now,
            )));
        }

        info!(request_id, "bridge request cancelled by sender");
        self.publish_all(events).await;
        Ok(())
    }

    async fn register_relayer(&self, relayer: Address, stake: Amount) -> Result<(), BridgeError> {
        let now = self.clock.now();
        self.state.write().relayers.register(relayer, stake, now)?;
        self.publish_all(vec![BridgeEvent::RelayerRegistered {
            relayer,
            stake,
            timestamp: now,
        }])
        .await;
        Ok(())
    }

    async fn add_stake(&self, relayer: Address, amount: Amount) -> Result<Amount, BridgeError> {
        let now = self.clock.now();
        let stake = self.state.write().relayers.add_stake(&relayer, amount, now)?;
        self.publish_all(vec![BridgeEvent::RelayerStakeChanged {
            relayer,
            stake,
            timestamp: now,
        }])
        .await;
        Ok(stake)
    }

    async fn withdraw_stake(
        &self,
        relayer: Address,
        amount: Amount,
    ) -> Result<Amount, BridgeError> {
        let now = self.clock.now();
        let stake = self
            .state
            .write()
            .relayers
            .withdraw_stake(&relayer, amount, now)?;
        self.publish_all(vec![BridgeEvent::RelayerStakeChanged {
            relayer,
            stake,
            timestamp: now,
        }])
        .await;
        Ok(stake)
    }

    async fn add_chain(
        &self,
        admin: Address,
        chain: ChainId,
        min_confirmations: u64,
        max_throughput: u64,
        bridge_fee: Amount,
    ) -> Result<(), BridgeError> {
        self.require_admin(&admin, "add a chain")?;
        let now = self.clock.now();
        self.state
            .write()
            .chains
            .add_chain(chain, min_confirmations, max_throughput, bridge_fee)?;
        info!(%chain, bridge_fee, "chain added");
        self.publish_all(vec![BridgeEvent::ChainAdded {
            chain,
            timestamp: now,
        }])
        .await;
        Ok(())
    }

    async fn set_chain_active(
        &self,
        admin: Address,
        chain: ChainId,
        active: bool,
    ) -> Result<(), BridgeError> {
        self.require_admin(&admin, "change chain activation")?;
        let now = self.clock.now();
        self.state.write().chains.set_active(chain, active)?;
        info!(%chain, active, "chain activation changed");
        self.publish_all(vec![BridgeEvent::ChainActivation {
            chain,
            active,
            timestamp: now,
        }])
        .await;
        Ok(())
    }

    async fn collect_fees(&self, admin: Address) -> Result<Amount, BridgeError> {
        self.require_admin(&admin, "collect fees")?;
        let now = self.clock.now();
        let amount = {
            let mut st = self.state.write();
            std::mem::take(&mut st.fee_pool)
        };
        info!(amount, "fee pool drained");
        self.publish_all(vec![BridgeEvent::FeesCollected {
            collector: admin,
            amount,
            timestamp: now,
        }])
        .await;
        Ok(amount)
    }

    fn request(&self, request_id: u64) -> Option<BridgeRequest> {
        self.state.read().requests.get(&request_id).copied()
    }

    fn requests_by_sender(&self, sender: &Address) -> Vec<BridgeRequest> {
        let st = self.state.read();
        st.by_sender
            .get(sender)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| st.requests.get(id).copied())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn pending_for_chain(&self, chain: ChainId) -> Vec<u64> {
        self.state
            .read()
            .by_destination
            .get(&(chain, BridgeStatus::Pending))
            .map(|bucket| bucket.iter().copied().collect())
            .unwrap_or_default()
    }

    fn relayer(&self, relayer: &Address) -> Option<RelayerInfo> {
        self.state.read().relayers.get(relayer).copied()
    }

    fn chain(&self, chain: ChainId) -> Option<ChainConfig> {
        self.state.read().chains.get(chain).copied()
    }

    fn stats(&self) -> BridgeStats {
        self.state.read().stats()
    }
}

/// Admin operations beyond the inbound port.
impl<L, I, F> BridgeService<L, I, F>
where
    L: AssetLedger,
    I: IdentityProvider,
    F: FeeOracle,
{
    /// Deactivate (or reactivate) a relayer without deleting its record.
    pub fn set_relayer_active(
        &self,
        admin: Address,
        relayer: Address,
        active: bool,
    ) -> Result<(), BridgeError> {
        self.require_admin(&admin, "change relayer activation")?;
        self.state.write().relayers.set_active(&relayer, active)
    }

    /// Change a chain's admin-set base fee.
    pub fn set_bridge_fee(
        &self,
        admin: Address,
        chain: ChainId,
        fee: Amount,
    ) -> Result<(), BridgeError> {
        self.require_admin(&admin, "change a bridge fee")?;
        self.state.write().chains.set_bridge_fee(chain, fee)
    }
}
