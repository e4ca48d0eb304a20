//! # AC-01 Asset Custody
//!
//! Escrow for in-flight bridge requests and settlements.
//!
//! **Subsystem ID:** 1
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//! **Status:** Production-Ready
//!
//! ## Purpose
//!
//! Hold the three asset kinds (fungible token, NFT, fungible gaming asset)
//! on behalf of the bridge and the settlement ledger:
//! - Lock on request/settlement creation
//! - Release to the recipient on success
//! - Refund to the original locker on failure or cancellation
//!
//! Escrow is tracked per entity id, never as a pooled balance, so one
//! request can never draw down another's funds.
//!
//! ## Module Structure
//!
//! ```text
//! ac-01-asset-custody/
//! ├── domain/          # AssetSpec, EscrowId, CustodyVault, errors
//! ├── ports/           # AssetLedger (outbound)
//! └── adapters/        # InMemoryAssetLedger
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;

// Re-exports
pub use adapters::InMemoryAssetLedger;
pub use domain::{
    AssetKind, AssetSpec, AssetValue, CustodyEntry, CustodyError, CustodyVault, EscrowId,
};
pub use ports::AssetLedger;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
