//! # Capability Resolution
//!
//! Authorization is modeled as an explicit capability set per caller,
//! resolved through the [`IdentityProvider`] port. Subsystems check the
//! capability they need at their entry point and reject before touching
//! any asset state.
//!
//! Sender and relayer authorization are intentionally NOT capabilities:
//! senders are authorized positionally (caller must equal the recorded
//! sender) and relayers are authorized by stake in the relayer registry.

use crate::entities::Address;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Privileged operations a caller may hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// Chain registry mutation, relayer deactivation, fee collection.
    Admin,
    /// Settlement creation and confirmation.
    Confirmer,
    /// Dispute initiation (on behalf of recipients) and resolution.
    DisputeResolver,
}

/// Resolves a caller address to its capability set.
///
/// Implementations are expected to be cheap and infallible; an unknown
/// caller simply holds no capabilities.
pub trait IdentityProvider: Send + Sync {
    /// Does `who` hold `capability`?
    fn has_capability(&self, who: &Address, capability: Capability) -> bool;
}

/// Table-backed identity provider.
///
/// Suitable for single-node operation and tests; a deployment fronted by an
/// external identity service would implement [`IdentityProvider`] against it.
#[derive(Default)]
pub struct StaticIdentityProvider {
    grants: RwLock<HashMap<Address, HashSet<Capability>>>,
}

impl StaticIdentityProvider {
    /// Create an empty provider (nobody holds anything).
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant a capability to an address.
    pub fn grant(&self, who: Address, capability: Capability) {
        self.grants.write().entry(who).or_default().insert(capability);
    }

    /// Revoke a capability from an address.
    pub fn revoke(&self, who: &Address, capability: Capability) {
        if let Some(set) = self.grants.write().get_mut(who) {
            set.remove(&capability);
        }
    }
}

impl IdentityProvider for StaticIdentityProvider {
    fn has_capability(&self, who: &Address, capability: Capability) -> bool {
        self.grants
            .read()
            .get(who)
            .is_some_and(|set| set.contains(&capability))
    }
}
