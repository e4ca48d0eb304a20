//! # Fixed Fee Oracle
//!
//! Passes the admin-configured fee through unchanged, with optional
//! per-chain overrides for deployments (and tests) that need dynamic
//! pricing on specific routes.

use crate::ports::FeeOracle;
use parking_lot::RwLock;
use shared_types::{Amount, ChainId};
use std::collections::HashMap;

/// Oracle that quotes the configured fee, unless overridden.
#[derive(Default)]
pub struct FixedFeeOracle {
    overrides: RwLock<HashMap<ChainId, Amount>>,
}

impl FixedFeeOracle {
    /// Create a pure pass-through oracle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Force a quote for one chain, regardless of its configured fee.
    pub fn set_override(&self, chain: ChainId, fee: Amount) {
        self.overrides.write().insert(chain, fee);
    }

    /// Remove a per-chain override.
    pub fn clear_override(&self, chain: ChainId) {
        self.overrides.write().remove(&chain);
    }
}

impl FeeOracle for FixedFeeOracle {
    fn bridge_fee(&self, destination: ChainId, configured: Amount) -> Amount {
        self.overrides
            .read()
            .get(&destination)
            .copied()
            .unwrap_or(configured)
    }
}
