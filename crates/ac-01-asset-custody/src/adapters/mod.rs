//! Adapters for Asset Custody.

pub mod memory_ledger;

pub use memory_ledger::InMemoryAssetLedger;
