//! Ports for Asset Custody.

pub mod outbound;

pub use outbound::AssetLedger;
