//! # Settlement & Dispute Lifecycle
//!
//! L3 reconciliation over the assembled world: confirmation inside the
//! window, the dispute-and-reject path, and window enforcement driven by
//! the manual clock.

#[cfg(test)]
mod tests {
    use crate::integration::harness::*;
    use ac_01_asset_custody::EscrowId;
    use ac_02_bridge::BridgeApi;
    use ac_03_settlement::{
        CreateSettlementParams, SettlementApi, SettlementError, SettlementStatus,
    };

    const DAY: u64 = 24 * 3600;

    fn params(source: u8, amount: u128) -> CreateSettlementParams {
        CreateSettlementParams {
            from: L3_ESCROW,
            to: BOB,
            amount,
            source_transaction_id: [source; 32],
            verification_root: [0x10u8; 32],
        }
    }

    #[tokio::test]
    async fn confirm_inside_window_pays_recipient() {
        let world = World::new().await;
        let id = world
            .settlement
            .create_settlement(CONFIRMER, params(1, 750))
            .await
            .unwrap();

        world.clock.advance(DAY);
        world
            .settlement
            .confirm_settlement(CONFIRMER, id)
            .await
            .unwrap();

        assert_eq!(world.ledger.balance_of(SETTLEMENT_ASSET, BOB), 750);
        assert_eq!(
            world.settlement.settlement(id).unwrap().status,
            SettlementStatus::Confirmed
        );
    }

    #[tokio::test]
    async fn dispute_at_day_two_then_rejection_releases_nothing() {
        let world = World::new().await;
        let id = world
            .settlement
            .create_settlement(CONFIRMER, params(1, 500))
            .await
            .unwrap();

        world.clock.advance(2 * DAY); // day 2 of a 3-day window
        world
            .settlement
            .initiate_dispute(
                BOB,
                id,
                "result manipulation".to_string(),
                "match replay does not support the payout".to_string(),
                DISPUTE_FEE,
            )
            .await
            .unwrap();
        assert_eq!(
            world.settlement.settlement(id).unwrap().status,
            SettlementStatus::Disputed
        );

        world
            .settlement
            .resolve_dispute(RESOLVER, id, "fraud confirmed".to_string(), false)
            .await
            .unwrap();

        // Cancelled, nothing released, escrow entry still in custody.
        assert_eq!(
            world.settlement.settlement(id).unwrap().status,
            SettlementStatus::Cancelled
        );
        assert_eq!(world.ledger.balance_of(SETTLEMENT_ASSET, BOB), 0);
        assert!(world.custody.holding(EscrowId::Settlement(id)).is_some());
    }

    #[tokio::test]
    async fn window_expiry_blocks_confirmation_and_disputes() {
        let world = World::new().await;
        let id = world
            .settlement
            .create_settlement(CONFIRMER, params(1, 500))
            .await
            .unwrap();

        world.clock.advance(DISPUTE_WINDOW + 1);
        assert!(matches!(
            world
                .settlement
                .confirm_settlement(CONFIRMER, id)
                .await
                .unwrap_err(),
            SettlementError::WindowExpired { .. }
        ));
        assert!(matches!(
            world
                .settlement
                .initiate_dispute(BOB, id, "late".to_string(), String::new(), DISPUTE_FEE)
                .await
                .unwrap_err(),
            SettlementError::WindowExpired { .. }
        ));
        // Permanently PENDING; escrow stays locked.
        assert_eq!(
            world.settlement.settlement(id).unwrap().status,
            SettlementStatus::Pending
        );
        assert!(world.custody.holding(EscrowId::Settlement(id)).is_some());
    }

    #[tokio::test]
    async fn dispute_exclusivity_and_single_resolution() {
        let world = World::new().await;
        let id = world
            .settlement
            .create_settlement(CONFIRMER, params(1, 500))
            .await
            .unwrap();

        world
            .settlement
            .initiate_dispute(BOB, id, "check".to_string(), String::new(), DISPUTE_FEE)
            .await
            .unwrap();
        assert!(matches!(
            world
                .settlement
                .initiate_dispute(BOB, id, "again".to_string(), String::new(), DISPUTE_FEE)
                .await
                .unwrap_err(),
            SettlementError::InvalidTransition { .. }
        ));

        world
            .settlement
            .resolve_dispute(RESOLVER, id, "payout stands".to_string(), true)
            .await
            .unwrap();
        assert_eq!(
            world
                .settlement
                .resolve_dispute(RESOLVER, id, "flip".to_string(), false)
                .await
                .unwrap_err(),
            SettlementError::AlreadyResolved(id)
        );

        // The approval released exactly once.
        assert_eq!(world.ledger.balance_of(SETTLEMENT_ASSET, BOB), 500);
    }

    #[tokio::test]
    async fn source_transaction_settles_at_most_once() {
        let world = World::new().await;
        world
            .settlement
            .create_settlement(CONFIRMER, params(1, 500))
            .await
            .unwrap();
        let err = world
            .settlement
            .create_settlement(CONFIRMER, params(1, 999))
            .await
            .unwrap_err();
        assert_eq!(err, SettlementError::DuplicateSource([1u8; 32]));

        // A different L3 transaction settles fine.
        assert!(world
            .settlement
            .create_settlement(CONFIRMER, params(2, 999))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn bridge_and_settlement_share_custody_without_collision() {
        let world = World::new().await;

        // A bridge request and a settlement with the same numeric id.
        let request_id = world
            .bridge
            .create_request(
                ALICE,
                ac_02_bridge::CreateRequestParams {
                    recipient: BOB,
                    destination: DEST,
                    asset: ac_01_asset_custody::AssetSpec::fungible(
                        ac_01_asset_custody::AssetKind::Token,
                        TOKEN,
                        100,
                    ),
                },
                BRIDGE_FEE,
            )
            .await
            .unwrap();
        let settlement_id = world
            .settlement
            .create_settlement(CONFIRMER, params(1, 500))
            .await
            .unwrap();
        assert_eq!(request_id, settlement_id);
        assert_eq!(world.custody.len(), 2);

        // Confirming the settlement leaves the bridge escrow untouched.
        world
            .settlement
            .confirm_settlement(CONFIRMER, settlement_id)
            .await
            .unwrap();
        assert!(world
            .custody
            .holding(EscrowId::Bridge(request_id))
            .is_some());
    }
}
