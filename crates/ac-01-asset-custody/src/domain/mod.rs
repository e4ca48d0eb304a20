//! Domain layer for Asset Custody.

pub mod entities;
pub mod errors;
pub mod vault;

pub use entities::{AssetKind, AssetSpec, AssetValue, CustodyEntry, EscrowId};
pub use errors::CustodyError;
pub use vault::CustodyVault;
