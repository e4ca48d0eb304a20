//! # Outbound Ports
//!
//! The external asset ledger the vault moves funds against.

use crate::domain::{AssetSpec, CustodyError};
use shared_types::Address;

/// External asset ledger - outbound port.
///
/// One implementation per chain backend. Calls are synchronous and
/// all-or-nothing: a ledger must either complete the full transfer or
/// decline it, never partially apply. Declines surface as
/// [`CustodyError::TransferRejected`].
pub trait AssetLedger: Send + Sync {
    /// Move the asset from `from` into custody.
    fn lock(&self, spec: &AssetSpec, from: &Address) -> Result<(), CustodyError>;

    /// Move a custodied asset out to `to`.
    fn release(&self, spec: &AssetSpec, to: &Address) -> Result<(), CustodyError>;

    /// Return a custodied asset to `to` (the original locker).
    fn refund(&self, spec: &AssetSpec, to: &Address) -> Result<(), CustodyError>;
}
