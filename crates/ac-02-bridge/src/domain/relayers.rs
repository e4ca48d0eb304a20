//! # Relayer Registry
//!
//! Stake-weighted authorization for processing. A relayer must be active
//! and hold at least the minimum stake to claim requests; stake can only
//! be withdrawn down to the minimum while active. Relayers are never
//! deleted, only deactivated.

use super::entities::RelayerInfo;
use super::errors::BridgeError;
use serde::{Deserialize, Serialize};
use shared_types::{display_address, Address, Amount, Timestamp};
use std::collections::HashMap;
use tracing::info;

/// Registry of relayers keyed by address.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RelayerRegistry {
    minimum_stake: Amount,
    relayers: HashMap<Address, RelayerInfo>,
}

impl RelayerRegistry {
    /// Create a registry with the given stake floor.
    pub fn new(minimum_stake: Amount) -> Self {
        Self {
            minimum_stake,
            relayers: HashMap::new(),
        }
    }

    /// The configured stake floor.
    pub fn minimum_stake(&self) -> Amount {
        self.minimum_stake
    }

    /// Register a relayer with an initial stake.
    ///
    /// A previously deactivated relayer re-registers by topping up; its
    /// history is kept.
    pub fn register(
        &mut self,
        relayer: Address,
        stake: Amount,
        now: Timestamp,
    ) -> Result<(), BridgeError> {
        if stake < self.minimum_stake {
            return Err(BridgeError::InsufficientStake {
                stake,
                minimum: self.minimum_stake,
            });
        }
        if let Some(existing) = self.relayers.get_mut(&relayer) {
            if existing.is_active {
                return Err(BridgeError::AlreadyRegistered(relayer));
            }
            existing.stake += stake;
            existing.is_active = true;
            existing.last_activity = now;
            return Ok(());
        }
        self.relayers.insert(
            relayer,
            RelayerInfo {
                address: relayer,
                stake,
                total_processed: 0,
                total_volume: 0,
                last_activity: now,
                is_active: true,
            },
        );
        info!(relayer = %display_address(&relayer), stake, "relayer registered");
        Ok(())
    }

    /// Add to a relayer's stake. Returns the new stake.
    pub fn add_stake(
        &mut self,
        relayer: &Address,
        amount: Amount,
        now: Timestamp,
    ) -> Result<Amount, BridgeError> {
        let info = self
            .relayers
            .get_mut(relayer)
            .ok_or(BridgeError::UnknownRelayer(*relayer))?;
        info.stake += amount;
        info.last_activity = now;
        Ok(info.stake)
    }

    /// Withdraw stake. Active relayers may only draw down to the minimum;
    /// deactivated relayers may exit fully. Returns the remaining stake.
    pub fn withdraw_stake(
        &mut self,
        relayer: &Address,
        amount: Amount,
        now: Timestamp,
    ) -> Result<Amount, BridgeError> {
        let info = self
            .relayers
            .get_mut(relayer)
            .ok_or(BridgeError::UnknownRelayer(*relayer))?;
        let remaining =
            info.stake
                .checked_sub(amount)
                .ok_or(BridgeError::BelowMinimumStake {
                    remaining: 0,
                    minimum: self.minimum_stake,
                })?;
        if info.is_active && remaining < self.minimum_stake {
            return Err(BridgeError::BelowMinimumStake {
                remaining,
                minimum: self.minimum_stake,
            });
        }
        info.stake = remaining;
        info.last_activity = now;
        Ok(remaining)
    }

    /// Activate or deactivate a relayer.
    pub fn set_active(&mut self, relayer: &Address, active: bool) -> Result<(), BridgeError> {
        let info = self
            .relayers
            .get_mut(relayer)
            .ok_or(BridgeError::UnknownRelayer(*relayer))?;
        info.is_active = active;
        Ok(())
    }

    /// Check that a relayer may process requests right now.
    pub fn require_authorized(&self, relayer: &Address) -> Result<(), BridgeError> {
        let info = self
            .relayers
            .get(relayer)
            .ok_or(BridgeError::UnknownRelayer(*relayer))?;
        if !info.is_active {
            return Err(BridgeError::RelayerInactive(*relayer));
        }
        if info.stake < self.minimum_stake {
            return Err(BridgeError::InsufficientStake {
                stake: info.stake,
                minimum: self.minimum_stake,
            });
        }
        Ok(())
    }

    /// Record a processed request. Called by the request processor only.
    pub(crate) fn record_activity(&mut self, relayer: &Address, volume: Amount, now: Timestamp) {
        if let Some(info) = self.relayers.get_mut(relayer) {
            info.total_processed += 1;
            info.total_volume += volume;
            info.last_activity = now;
        }
    }

    /// Lookup a relayer.
    pub fn get(&self, relayer: &Address) -> Option<&RelayerInfo> {
        self.relayers.get(relayer)
    }

    /// Number of registered relayers (active or not).
    pub fn len(&self) -> usize {
        self.relayers.len()
    }

    /// True if no relayer ever registered.
    pub fn is_empty(&self) -> bool {
        self.relayers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RELAYER: Address = [7u8; 20];
    const MIN: Amount = 1_000;

    fn registry() -> RelayerRegistry {
        RelayerRegistry::new(MIN)
    }

    #[test]
    fn test_register_below_minimum_rejected() {
        let mut reg = registry();
        let err = reg.register(RELAYER, MIN - 1, 0).unwrap_err();
        assert!(matches!(err, BridgeError::InsufficientStake { .. }));
        assert!(reg.get(&RELAYER).is_none());
    }

    #[test]
    fn test_register_and_authorize() {
        let mut reg = registry();
        reg.register(RELAYER, MIN, 10).unwrap();
        assert!(reg.require_authorized(&RELAYER).is_ok());
        assert_eq!(reg.get(&RELAYER).unwrap().last_activity, 10);
    }

    #[test]
    fn test_double_register_rejected() {
        let mut reg = registry();
        reg.register(RELAYER, MIN, 0).unwrap();
        assert_eq!(
            reg.register(RELAYER, MIN, 0),
            Err(BridgeError::AlreadyRegistered(RELAYER))
        );
    }

    #[test]
    fn test_reregister_after_deactivation_keeps_history() {
        let mut reg = registry();
        reg.register(RELAYER, MIN, 0).unwrap();
        reg.record_activity(&RELAYER, 500, 1);
        reg.set_active(&RELAYER, false).unwrap();
        reg.register(RELAYER, MIN, 2).unwrap();
        let info = reg.get(&RELAYER).unwrap();
        assert_eq!(info.total_processed, 1);
        assert_eq!(info.stake, MIN * 2);
    }

    #[test]
    fn test_withdraw_to_floor_allowed() {
        let mut reg = registry();
        reg.register(RELAYER, MIN + 500, 0).unwrap();
        assert_eq!(reg.withdraw_stake(&RELAYER, 500, 1).unwrap(), MIN);
    }

    #[test]
    fn test_withdraw_below_floor_rejected() {
        let mut reg = registry();
        reg.register(RELAYER, MIN + 500, 0).unwrap();
        let err = reg.withdraw_stake(&RELAYER, 501, 1).unwrap_err();
        assert_eq!(
            err,
            BridgeError::BelowMinimumStake {
                remaining: MIN - 1,
                minimum: MIN,
            }
        );
        assert_eq!(reg.get(&RELAYER).unwrap().stake, MIN + 500);
    }

    #[test]
    fn test_overdraw_rejected() {
        let mut reg = registry();
        reg.register(RELAYER, MIN, 0).unwrap();
        assert!(reg.withdraw_stake(&RELAYER, MIN * 2, 1).is_err());
    }

    #[test]
    fn test_inactive_relayer_can_exit_fully() {
        let mut reg = registry();
        reg.register(RELAYER, MIN, 0).unwrap();
        reg.set_active(&RELAYER, false).unwrap();
        assert_eq!(reg.withdraw_stake(&RELAYER, MIN, 1).unwrap(), 0);
    }

    #[test]
    fn test_inactive_relayer_not_authorized() {
        let mut reg = registry();
        reg.register(RELAYER, MIN, 0).unwrap();
        reg.set_active(&RELAYER, false).unwrap();
        assert_eq!(
            reg.require_authorized(&RELAYER),
            Err(BridgeError::RelayerInactive(RELAYER))
        );
    }

    #[test]
    fn test_record_activity_accumulates() {
        let mut reg = registry();
        reg.register(RELAYER, MIN, 0).unwrap();
        reg.record_activity(&RELAYER, 100, 5);
        reg.record_activity(&RELAYER, 250, 6);
        let info = reg.get(&RELAYER).unwrap();
        assert_eq!(info.total_processed, 2);
        assert_eq!(info.total_volume, 350);
        assert_eq!(info.last_activity, 6);
    }
}
