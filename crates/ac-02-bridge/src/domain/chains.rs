//! # Chain Registry
//!
//! Which destination chains the bridge will route to, with per-chain
//! confirmation requirements and fees. No state machine here: a chain is
//! simply supported+active or not.

use super::entities::ChainConfig;
use super::errors::BridgeError;
use serde::{Deserialize, Serialize};
use shared_types::{Amount, ChainId};
use std::collections::HashMap;

/// Confirmations assumed for the home chain entry.
const HOME_MIN_CONFIRMATIONS: u64 = 1;

/// Registry of supported chains.
///
/// The home chain is inserted at construction and can never be removed or
/// deactivated. All mutation goes through the admin surface of the
/// bridge service.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChainRegistry {
    home: ChainId,
    chains: HashMap<ChainId, ChainConfig>,
}

impl ChainRegistry {
    /// Create a registry with the home chain pre-registered.
    pub fn new(home: ChainId) -> Self {
        let mut chains = HashMap::new();
        chains.insert(
            home,
            ChainConfig {
                chain_id: home,
                is_supported: true,
                is_active: true,
                min_confirmations: HOME_MIN_CONFIRMATIONS,
                max_throughput: u64::MAX,
                bridge_fee: 0,
            },
        );
        Self { home, chains }
    }

    /// The home chain id.
    pub fn home(&self) -> ChainId {
        self.home
    }

    /// Add a destination chain. New chains start active.
    pub fn add_chain(
        &mut self,
        chain_id: ChainId,
        min_confirmations: u64,
        max_throughput: u64,
        bridge_fee: Amount,
    ) -> Result<(), BridgeError> {
        if chain_id == self.home {
            return Err(BridgeError::HomeChainImmutable(chain_id));
        }
        if self.chains.contains_key(&chain_id) {
            return Err(BridgeError::AlreadySupported(chain_id));
        }
        self.chains.insert(
            chain_id,
            ChainConfig {
                chain_id,
                is_supported: true,
                is_active: true,
                min_confirmations,
                max_throughput,
                bridge_fee,
            },
        );
        Ok(())
    }

    /// Activate or deactivate a chain.
    pub fn set_active(&mut self, chain_id: ChainId, active: bool) -> Result<(), BridgeError> {
        if chain_id == self.home {
            return Err(BridgeError::HomeChainImmutable(chain_id));
        }
        let config = self
            .chains
            .get_mut(&chain_id)
            .ok_or(BridgeError::UnknownChain(chain_id))?;
        config.is_active = active;
        Ok(())
    }

    /// Change the admin-set base fee for a chain.
    pub fn set_bridge_fee(&mut self, chain_id: ChainId, fee: Amount) -> Result<(), BridgeError> {
        let config = self
            .chains
            .get_mut(&chain_id)
            .ok_or(BridgeError::UnknownChain(chain_id))?;
        config.bridge_fee = fee;
        Ok(())
    }

    /// Lookup a chain's configuration.
    pub fn get(&self, chain_id: ChainId) -> Option<&ChainConfig> {
        self.chains.get(&chain_id)
    }

    /// Is the chain supported and active?
    pub fn is_routable(&self, chain_id: ChainId) -> bool {
        self.chains
            .get(&chain_id)
            .is_some_and(|c| c.is_supported && c.is_active)
    }

    /// Lookup a chain that must be routable, with the precise failure.
    pub fn require_routable(&self, chain_id: ChainId) -> Result<&ChainConfig, BridgeError> {
        let config = self
            .chains
            .get(&chain_id)
            .ok_or(BridgeError::UnsupportedChain(chain_id))?;
        if !config.is_supported {
            return Err(BridgeError::UnsupportedChain(chain_id));
        }
        if !config.is_active {
            return Err(BridgeError::InactiveChain(chain_id));
        }
        Ok(config)
    }
}
