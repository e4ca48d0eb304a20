//! # AC-02 Cross-Chain Bridge
//!
//! Stake-gated movement of tokens, NFTs, and gaming assets between chains.
//!
//! **Subsystem ID:** 2
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//! **Status:** Production-Ready
//!
//! ## Purpose
//!
//! A sender locks an asset into custody and a staked relayer reports the
//! outcome of the destination-side transfer:
//! - `create_request` is the single entry point; it locks custody and
//!   records the request as PENDING
//! - `process_request` releases to the recipient (success) or refunds the
//!   sender (failure); exactly one concurrent attempt wins
//! - `cancel_request` lets the sender back out of a still-PENDING request
//!
//! ## Safety Properties
//!
//! | Defense | Description |
//! |---------|-------------|
//! | Content-hash replay set | Identical request tuples are rejected |
//! | Single-writer state | Transitions are compare-and-swap under one lock |
//! | Per-request escrow | A release can only draw on its own lock |
//! | Stake gating | Only active relayers above the floor may process |
//!
//! ## Module Structure
//!
//! ```text
//! ac-02-bridge/
//! ├── domain/          # BridgeRequest, registries, invariants, errors
//! ├── ports/           # BridgeApi (inbound), FeeOracle (outbound)
//! ├── adapters/        # FixedFeeOracle
//! ├── state.rs         # Locked state + secondary indexes
//! └── service.rs       # BridgeService
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;
pub mod state;

// Re-exports
pub use adapters::FixedFeeOracle;
pub use domain::{
    BridgeError, BridgeRequest, BridgeStatus, ChainConfig, ChainRegistry, CreateRequestParams,
    RelayerInfo, RelayerRegistry,
};
pub use ports::{BridgeApi, FeeOracle};
pub use service::{BridgeConfig, BridgeService};
pub use state::{BridgeState, BridgeStats};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
