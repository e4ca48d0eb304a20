//! # Outbound Ports
//!
//! The opaque proof predicate settlements are checked against.

use parking_lot::RwLock;
use shared_types::Hash;
use std::collections::HashSet;

/// Proof verifier - outbound port.
///
/// Given a verification root and a claimed source transaction id, decides
/// whether the L3 transaction occurred. The scheme behind the root is not
/// this subsystem's concern; the predicate is used opaquely and
/// synchronously at settlement creation.
pub trait ProofVerifier: Send + Sync {
    /// Does `verification_root` prove `source_transaction_id`?
    fn verify(&self, verification_root: &Hash, source_transaction_id: &Hash) -> bool;
}

// =============================================================================
// Static Implementation for Testing / Single-Node Operation
// =============================================================================

/// Verifier with a fixed verdict and optional per-root rejections.
pub struct StaticProofVerifier {
    default_verdict: bool,
    rejected_roots: RwLock<HashSet<Hash>>,
}

impl StaticProofVerifier {
    /// Accept every proof (the permissive default for tests).
    pub fn accepting() -> Self {
        Self {
            default_verdict: true,
            rejected_roots: RwLock::new(HashSet::new()),
        }
    }

    /// Reject every proof.
    pub fn rejecting() -> Self {
        Self {
            default_verdict: false,
            rejected_roots: RwLock::new(HashSet::new()),
        }
    }

    /// Reject one specific root regardless of the default verdict.
    pub fn reject_root(&self, root: Hash) {
        self.rejected_roots.write().insert(root);
    }
}

impl ProofVerifier for StaticProofVerifier {
    fn verify(&self, verification_root: &Hash, _source_transaction_id: &Hash) -> bool {
        if self.rejected_roots.read().contains(verification_root) {
            return false;
        }
        self.default_verdict
    }
}
