//! # In-Memory Asset Ledger
//!
//! Backing ledger for tests and single-node operation. Tracks fungible
//! balances per (asset, holder) and one owner per NFT. A production
//! deployment implements [`AssetLedger`] against the chain's token
//! contracts instead.

use crate::domain::{AssetSpec, AssetValue, CustodyError};
use crate::ports::AssetLedger;
use parking_lot::RwLock;
use shared_types::{display_address, Address, Amount, TokenId};
use std::collections::HashMap;
use tracing::debug;

/// The account custodied assets sit under.
const CUSTODY_ACCOUNT: Address = [0xCCu8; 20];

/// In-memory ledger with all-or-nothing transfers.
#[derive(Default)]
pub struct InMemoryAssetLedger {
    /// (asset, holder) -> balance.
    balances: RwLock<HashMap<(Address, Address), Amount>>,
    /// (asset, token id) -> owner.
    nft_owners: RwLock<HashMap<(Address, TokenId), Address>>,
}

impl InMemoryAssetLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `amount` of `asset` to `holder` (test/bootstrap helper).
    pub fn mint(&self, asset: Address, holder: Address, amount: Amount) {
        *self.balances.write().entry((asset, holder)).or_insert(0) += amount;
    }

    /// Assign ownership of an NFT (test/bootstrap helper).
    pub fn mint_nft(&self, asset: Address, token_id: TokenId, owner: Address) {
        self.nft_owners.write().insert((asset, token_id), owner);
    }

    /// Fungible balance of `holder`.
    pub fn balance_of(&self, asset: Address, holder: Address) -> Amount {
        *self.balances.read().get(&(asset, holder)).unwrap_or(&0)
    }

    /// Current owner of an NFT.
    pub fn owner_of(&self, asset: Address, token_id: TokenId) -> Option<Address> {
        self.nft_owners.read().get(&(asset, token_id)).copied()
    }

    fn transfer_fungible(
        &self,
        asset: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), CustodyError> {
        let mut balances = self.balances.write();
        let from_balance = balances.get(&(asset, from)).copied().unwrap_or(0);
        if from_balance < amount {
            return Err(CustodyError::TransferRejected {
                reason: format!(
                    "insufficient balance: {} holds {from_balance}, needs {amount}",
                    display_address(&from)
                ),
            });
        }
        balances.insert((asset, from), from_balance - amount);
        *balances.entry((asset, to)).or_insert(0) += amount;
        debug!(
            asset = %display_address(&asset),
            from = %display_address(&from),
            to = %display_address(&to),
            amount,
            "fungible transfer"
        );
        Ok(())
    }

    fn transfer_nft(
        &self,
        asset: Address,
        from: Address,
        to: Address,
        token_id: TokenId,
    ) -> Result<(), CustodyError> {
        let mut owners = self.nft_owners.write();
        match owners.get(&(asset, token_id)) {
            Some(owner) if *owner == from => {
                owners.insert((asset, token_id), to);
                debug!(
                    asset = %display_address(&asset),
                    token_id,
                    to = %display_address(&to),
                    "nft transfer"
                );
                Ok(())
            }
            Some(_) => Err(CustodyError::TransferRejected {
                reason: format!("token {token_id} not owned by {}", display_address(&from)),
            }),
            None => Err(CustodyError::TransferRejected {
                reason: format!("unknown token {token_id}"),
            }),
        }
    }

    fn transfer(
        &self,
        spec: &AssetSpec,
        from: Address,
        to: Address,
    ) -> Result<(), CustodyError> {
        match spec.value {
            AssetValue::Fungible(amount) => self.transfer_fungible(spec.asset, from, to, amount),
            AssetValue::NonFungible(token_id) => self.transfer_nft(spec.asset, from, to, token_id),
        }
    }
}

impl AssetLedger for InMemoryAssetLedger {
    fn lock(&self, spec: &AssetSpec, from: &Address) -> Result<(), CustodyError> {
        self.transfer(spec, *from, CUSTODY_ACCOUNT)
    }

    fn release(&self, spec: &AssetSpec, to: &Address) -> Result<(), CustodyError> {
        self.transfer(spec, CUSTODY_ACCOUNT, *to)
    }

    fn refund(&self, spec: &AssetSpec, to: &Address) -> Result<(), CustodyError> {
        self.transfer(spec, CUSTODY_ACCOUNT, *to)
    }
}
