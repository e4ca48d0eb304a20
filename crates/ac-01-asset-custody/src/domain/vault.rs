//! # Custody Vault
//!
//! Per-escrow tracking of locked assets. Every entry is keyed by the
//! entity id it backs; there is no pooled balance, so a release can only
//! ever draw on the funds its own request locked.

use super::entities::{AssetSpec, CustodyEntry, EscrowId};
use super::errors::CustodyError;
use crate::ports::AssetLedger;
use parking_lot::RwLock;
use shared_types::{Address, Timestamp};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// The custody vault.
///
/// Wraps the external [`AssetLedger`] with insert-once escrow accounting.
/// Ledger calls happen inside the entry-map guard, so a lock and its entry
/// insertion are one indivisible step.
pub struct CustodyVault<L: AssetLedger> {
    ledger: Arc<L>,
    entries: RwLock<HashMap<EscrowId, CustodyEntry>>,
}

impl<L: AssetLedger> CustodyVault<L> {
    /// Create a vault over the given ledger.
    pub fn new(ledger: Arc<L>) -> Self {
        Self {
            ledger,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Lock `spec` from `from` under `escrow`.
    ///
    /// # Errors
    /// - `DuplicateEscrow` if the id already holds an entry
    /// - `MismatchedValue` / `ZeroValue` on a malformed spec
    /// - `TransferRejected` if the ledger declines
    pub fn lock(
        &self,
        escrow: EscrowId,
        spec: AssetSpec,
        from: Address,
        now: Timestamp,
    ) -> Result<(), CustodyError> {
        spec.validate()?;

        let mut entries = self.entries.write();
        if entries.contains_key(&escrow) {
            return Err(CustodyError::DuplicateEscrow(escrow));
        }
        self.ledger.lock(&spec, &from)?;
        entries.insert(
            escrow,
            CustodyEntry {
                escrow,
                spec,
                locked_from: from,
                locked_at: now,
            },
        );
        info!(%escrow, "assets locked into custody");
        Ok(())
    }

    /// Release the escrowed asset to `to`.
    ///
    /// # Errors
    /// - `CustodyEmpty` if no entry exists for the id
    /// - `TransferRejected` if the ledger declines (the entry is kept)
    pub fn release(&self, escrow: EscrowId, to: &Address) -> Result<(), CustodyError> {
        let mut entries = self.entries.write();
        let entry = entries
            .get(&escrow)
            .ok_or(CustodyError::CustodyEmpty(escrow))?;
        self.ledger.release(&entry.spec, to)?;
        entries.remove(&escrow);
        info!(%escrow, "assets released from custody");
        Ok(())
    }

    /// Return the escrowed asset to whoever locked it.
    ///
    /// # Errors
    /// - `CustodyEmpty` if no entry exists for the id
    /// - `TransferRejected` if the ledger declines (the entry is kept)
    pub fn refund(&self, escrow: EscrowId) -> Result<(), CustodyError> {
        let mut entries = self.entries.write();
        let entry = entries
            .get(&escrow)
            .ok_or(CustodyError::CustodyEmpty(escrow))?;
        self.ledger.refund(&entry.spec, &entry.locked_from)?;
        let refunded_to = entry.locked_from;
        entries.remove(&escrow);
        debug!(%escrow, to = %shared_types::display_address(&refunded_to), "assets refunded");
        Ok(())
    }

    /// The entry currently held for `escrow`, if any.
    pub fn holding(&self, escrow: EscrowId) -> Option<CustodyEntry> {
        self.entries.read().get(&escrow).cloned()
    }

    /// Number of open escrow entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// True if nothing is escrowed.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
