//! # Core Primitives
//!
//! The small vocabulary every subsystem speaks: hashes, addresses, amounts,
//! chain identifiers, and timestamps.

use serde::{Deserialize, Serialize};

/// A 32-byte hash (SHA-256).
pub type Hash = [u8; 32];

/// A 20-byte account address.
pub type Address = [u8; 20];

/// A token amount. u128 covers 18-decimal fungible supplies with headroom.
pub type Amount = u128;

/// A non-fungible token identifier.
pub type TokenId = u64;

/// Unix timestamp in seconds.
pub type Timestamp = u64;

/// The all-zero address, used as the "no recipient" sentinel.
pub const ZERO_ADDRESS: Address = [0u8; 20];

/// Numeric chain identifier (EVM-style).
///
/// Chains are registered at runtime, so this is an open newtype rather than
/// a closed enum of known networks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChainId(pub u64);

impl ChainId {
    /// Raw numeric id.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "chain-{}", self.0)
    }
}

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Render an address as `0x`-prefixed hex for logs and events.
pub fn display_address(addr: &Address) -> String {
    format!("0x{}", hex::encode(addr))
}

/// Render a hash as `0x`-prefixed hex for logs and events.
pub fn display_hash(hash: &Hash) -> String {
    format!("0x{}", hex::encode(hash))
}
