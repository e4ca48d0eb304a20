//! # Outbound Ports
//!
//! External pricing for bridge fees. The admin-set per-chain fee is the
//! base; an oracle may reprice it dynamically.

use shared_types::{Amount, ChainId};

/// Fee oracle - outbound port.
pub trait FeeOracle: Send + Sync {
    /// Quote the fee for a transfer to `destination`, given the
    /// admin-configured base fee for that chain.
    fn bridge_fee(&self, destination: ChainId, configured: Amount) -> Amount;
}
