//! # Integration Harness
//!
//! Assembles the bridge and settlement services over one shared custody
//! vault, one event bus, and one manual clock — the way a node wires them.

use ac_01_asset_custody::{CustodyVault, InMemoryAssetLedger};
use ac_02_bridge::{BridgeApi, BridgeConfig, BridgeService, FixedFeeOracle};
use ac_03_settlement::{SettlementConfig, SettlementService, StaticProofVerifier};
use shared_bus::InMemoryEventBus;
use shared_types::{Address, Amount, Capability, ChainId, ManualClock, StaticIdentityProvider};
use std::sync::Arc;

/// The home chain every world runs on.
pub const HOME: ChainId = ChainId(1);
/// A registered, active destination chain.
pub const DEST: ChainId = ChainId(137);
/// The platform token contract.
pub const TOKEN: Address = [0xA1u8; 20];
/// The settlement escrow asset (same platform token by default).
pub const SETTLEMENT_ASSET: Address = [0xA1u8; 20];

/// Well-known actors.
pub const ALICE: Address = [0x01u8; 20];
/// Receiving player.
pub const BOB: Address = [0x02u8; 20];
/// First relayer.
pub const RELAYER_A: Address = [0x0Au8; 20];
/// Second relayer.
pub const RELAYER_B: Address = [0x0Bu8; 20];
/// Settlement confirmer (the L2 operator).
pub const CONFIRMER: Address = [0x0Cu8; 20];
/// Dispute resolver.
pub const RESOLVER: Address = [0x0Du8; 20];
/// Platform admin.
pub const ADMIN: Address = [0x0Eu8; 20];
/// The confirmer-controlled L3 escrow account.
pub const L3_ESCROW: Address = [0xE5u8; 20];

/// Standard parameters shared by the scenarios.
pub const MIN_STAKE: Amount = 10_000;
/// Admin-set fee for transfers to [`DEST`].
pub const BRIDGE_FEE: Amount = 10;
/// Fee due when opening a dispute.
pub const DISPUTE_FEE: Amount = 100;
/// Dispute window used by every world (3 days).
pub const DISPUTE_WINDOW: u64 = 3 * 24 * 3600;

/// Concrete service types as the harness assembles them.
pub type Bridge = BridgeService<InMemoryAssetLedger, StaticIdentityProvider, FixedFeeOracle>;
/// Settlement service over the same ledger/identity stack.
pub type Settlement =
    SettlementService<InMemoryAssetLedger, StaticIdentityProvider, StaticProofVerifier>;

/// A fully wired world.
pub struct World {
    /// The bridge, shareable across tasks.
    pub bridge: Arc<Bridge>,
    /// The settlement ledger.
    pub settlement: Arc<Settlement>,
    /// The backing asset ledger.
    pub ledger: Arc<InMemoryAssetLedger>,
    /// The shared custody vault.
    pub custody: Arc<CustodyVault<InMemoryAssetLedger>>,
    /// The proof verifier (accepting by default).
    pub verifier: Arc<StaticProofVerifier>,
    /// Hand-driven clock, starts at 1_000_000.
    pub clock: Arc<ManualClock>,
    /// The event bus both services publish to.
    pub bus: Arc<InMemoryEventBus>,
}

impl World {
    /// Build a world with funded actors, one active destination chain, and
    /// both relayers registered at the stake floor.
    pub async fn new() -> Self {
        let ledger = Arc::new(InMemoryAssetLedger::new());
        ledger.mint(TOKEN, ALICE, 1_000_000);
        ledger.mint(SETTLEMENT_ASSET, L3_ESCROW, 1_000_000);

        let custody = Arc::new(CustodyVault::new(ledger.clone()));
        let identity = Arc::new(StaticIdentityProvider::new());
        identity.grant(ADMIN, Capability::Admin);
        identity.grant(CONFIRMER, Capability::Confirmer);
        identity.grant(RESOLVER, Capability::DisputeResolver);

        let clock = Arc::new(ManualClock::at(1_000_000));
        let bus = Arc::new(InMemoryEventBus::new());
        let verifier = Arc::new(StaticProofVerifier::accepting());

        let bridge = Arc::new(BridgeService::new(
            BridgeConfig {
                home_chain: HOME,
                max_transfer_amount: 100_000,
                minimum_relayer_stake: MIN_STAKE,
            },
            custody.clone(),
            identity.clone(),
            Arc::new(FixedFeeOracle::new()),
            clock.clone(),
            bus.clone(),
        ));
        bridge
            .add_chain(ADMIN, DEST, 128, 10_000, BRIDGE_FEE)
            .await
            .expect("destination chain registers");
        bridge
            .register_relayer(RELAYER_A, MIN_STAKE)
            .await
            .expect("relayer A registers");
        bridge
            .register_relayer(RELAYER_B, MIN_STAKE)
            .await
            .expect("relayer B registers");

        let settlement = Arc::new(SettlementService::new(
            SettlementConfig {
                dispute_window_secs: DISPUTE_WINDOW,
                max_settlement_amount: 100_000,
                dispute_fee: DISPUTE_FEE,
                settlement_asset: SETTLEMENT_ASSET,
            },
            custody.clone(),
            identity,
            verifier.clone(),
            clock.clone(),
            bus.clone(),
        ));

        Self {
            bridge,
            settlement,
            ledger,
            custody,
            verifier,
            clock,
            bus,
        }
    }
}
