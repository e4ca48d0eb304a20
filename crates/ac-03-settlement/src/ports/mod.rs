//! Ports for the settlement ledger.

pub mod inbound;
pub mod outbound;

pub use inbound::SettlementApi;
pub use outbound::{ProofVerifier, StaticProofVerifier};
