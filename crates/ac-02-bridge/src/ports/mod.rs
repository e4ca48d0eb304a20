//! Ports for the bridge.

pub mod inbound;
pub mod outbound;

pub use inbound::BridgeApi;
pub use outbound::FeeOracle;
