//! # AC-03 Settlement Ledger
//!
//! Reconciliation of L3 transactions into the authoritative L2, with a
//! dispute window before funds are released.
//!
//! **Subsystem ID:** 3
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//! **Status:** Production-Ready
//!
//! ## Purpose
//!
//! A confirmer registers an L3 transaction as a settlement backed by an
//! opaque verification root:
//! - `create_settlement` verifies the proof, locks escrow, and opens a
//!   dispute window
//! - `confirm_settlement` releases funds once, only within the window
//! - `initiate_dispute` / `resolve_dispute` run the dispute sub-lifecycle;
//!   a rejected settlement is cancelled and its escrow deliberately stays
//!   put for manual recovery
//!
//! The source transaction id maps to at most one settlement ever.
//!
//! ## Module Structure
//!
//! ```text
//! ac-03-settlement/
//! ├── domain/          # Settlement, Dispute, errors
//! ├── ports/           # SettlementApi (inbound), ProofVerifier (outbound)
//! ├── state.rs         # Locked state + replay set
//! └── service.rs       # SettlementService
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod ports;
pub mod service;
pub mod state;

// Re-exports
pub use domain::{
    CreateSettlementParams, Dispute, Settlement, SettlementError, SettlementStatus,
};
pub use ports::{ProofVerifier, SettlementApi, StaticProofVerifier};
pub use service::{SettlementConfig, SettlementService};
pub use state::{SettlementState, SettlementStats};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
