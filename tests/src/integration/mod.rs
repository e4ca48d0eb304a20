//! Cross-subsystem integration scenarios.

pub mod harness;

mod bridge_flows;
mod concurrency;
mod settlement_flows;
