//! # Bridge Request Lifecycle
//!
//! End-to-end request scenarios over the assembled world: inactive-chain
//! rejection, conservation through completion and refund, replay safety,
//! cancellation, and relayer stake gating.

#[cfg(test)]
mod tests {
    use crate::integration::harness::*;
    use ac_01_asset_custody::{AssetKind, AssetSpec};
    use ac_02_bridge::{BridgeApi, BridgeError, BridgeStatus, CreateRequestParams};
    use shared_bus::{EventFilter, EventTopic};

    fn token_params(amount: u128) -> CreateRequestParams {
        CreateRequestParams {
            recipient: BOB,
            destination: DEST,
            asset: AssetSpec::fungible(AssetKind::Token, TOKEN, amount),
        }
    }

    #[tokio::test]
    async fn inactive_destination_rejects_before_any_lock() {
        let world = World::new().await;
        world
            .bridge
            .set_chain_active(ADMIN, DEST, false)
            .await
            .unwrap();

        let err = world
            .bridge
            .create_request(ALICE, token_params(100), BRIDGE_FEE)
            .await
            .unwrap_err();
        assert_eq!(err, BridgeError::InactiveChain(DEST));
        // No asset movement was attempted.
        assert_eq!(world.ledger.balance_of(TOKEN, ALICE), 1_000_000);
        assert!(world.custody.is_empty());
        assert_eq!(world.bridge.stats().total_requests, 0);
    }

    #[tokio::test]
    async fn completed_request_conserves_amount_exactly() {
        let world = World::new().await;
        let id = world
            .bridge
            .create_request(ALICE, token_params(100), BRIDGE_FEE)
            .await
            .unwrap();

        world
            .bridge
            .process_request(RELAYER_A, DEST, id, true)
            .await
            .unwrap();

        // The recipient gets exactly what was locked; the fee is charged
        // separately and never deducted from the transfer.
        assert_eq!(world.ledger.balance_of(TOKEN, BOB), 100);
        assert_eq!(world.ledger.balance_of(TOKEN, ALICE), 1_000_000 - 100);
        assert_eq!(world.bridge.stats().fee_pool, BRIDGE_FEE);
        assert!(world.custody.is_empty());
    }

    #[tokio::test]
    async fn failed_request_returns_full_amount_to_sender() {
        let world = World::new().await;
        let id = world
            .bridge
            .create_request(ALICE, token_params(2_500), BRIDGE_FEE)
            .await
            .unwrap();

        let status = world
            .bridge
            .process_request(RELAYER_B, DEST, id, false)
            .await
            .unwrap();
        assert_eq!(status, BridgeStatus::Failed);
        assert_eq!(world.ledger.balance_of(TOKEN, ALICE), 1_000_000);
        assert_eq!(world.ledger.balance_of(TOKEN, BOB), 0);
    }

    #[tokio::test]
    async fn cancel_then_process_is_rejected() {
        let world = World::new().await;
        let id = world
            .bridge
            .create_request(ALICE, token_params(300), BRIDGE_FEE)
            .await
            .unwrap();

        world.bridge.cancel_request(ALICE, id).await.unwrap();
        assert_eq!(world.ledger.balance_of(TOKEN, ALICE), 1_000_000);
        assert_eq!(
            world.bridge.request(id).unwrap().status,
            BridgeStatus::Cancelled
        );

        let err = world
            .bridge
            .process_request(RELAYER_A, DEST, id, true)
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::InvalidTransition { .. }));
        // Nothing was paid out after the refund.
        assert_eq!(world.ledger.balance_of(TOKEN, BOB), 0);
    }

    #[tokio::test]
    async fn understaked_registration_leaves_no_record() {
        let world = World::new().await;
        let err = world
            .bridge
            .register_relayer([0x42u8; 20], MIN_STAKE - 1)
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::InsufficientStake { .. }));
        assert!(world.bridge.relayer(&[0x42u8; 20]).is_none());
    }

    #[tokio::test]
    async fn replay_of_identical_tuple_is_rejected() {
        let world = World::new().await;
        world
            .bridge
            .create_request(ALICE, token_params(100), BRIDGE_FEE)
            .await
            .unwrap();

        // Identical tuple in the same second: the hash collides.
        let err = world
            .bridge
            .create_request(ALICE, token_params(100), BRIDGE_FEE)
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::DuplicateRequest(_)));

        // One second later it is a distinct transfer.
        world.clock.advance(1);
        assert!(world
            .bridge
            .create_request(ALICE, token_params(100), BRIDGE_FEE)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn fee_pool_is_isolated_from_custody() {
        let world = World::new().await;
        let id = world
            .bridge
            .create_request(ALICE, token_params(100), BRIDGE_FEE)
            .await
            .unwrap();

        // Draining fees must not touch the escrow backing the request.
        let drained = world.bridge.collect_fees(ADMIN).await.unwrap();
        assert_eq!(drained, BRIDGE_FEE);
        assert!(world.custody.holding(
            ac_01_asset_custody::EscrowId::Bridge(id)
        ).is_some());

        // The request still completes normally afterwards.
        world
            .bridge
            .process_request(RELAYER_A, DEST, id, true)
            .await
            .unwrap();
        assert_eq!(world.ledger.balance_of(TOKEN, BOB), 100);
    }

    #[tokio::test]
    async fn withdrawal_never_breaches_the_stake_floor() {
        let world = World::new().await;
        world.bridge.add_stake(RELAYER_A, 5_000).await.unwrap();
        assert_eq!(
            world.bridge.withdraw_stake(RELAYER_A, 5_000).await.unwrap(),
            MIN_STAKE
        );
        let err = world
            .bridge
            .withdraw_stake(RELAYER_A, 1)
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::BelowMinimumStake { .. }));
        assert_eq!(world.bridge.relayer(&RELAYER_A).unwrap().stake, MIN_STAKE);
    }

    #[tokio::test]
    async fn nft_transfer_moves_ownership() {
        let world = World::new().await;
        world.ledger.mint_nft(TOKEN, 7, ALICE);

        let id = world
            .bridge
            .create_request(
                ALICE,
                CreateRequestParams {
                    recipient: BOB,
                    destination: DEST,
                    asset: AssetSpec::nft(TOKEN, 7),
                },
                BRIDGE_FEE,
            )
            .await
            .unwrap();
        world
            .bridge
            .process_request(RELAYER_A, DEST, id, true)
            .await
            .unwrap();
        assert_eq!(world.ledger.owner_of(TOKEN, 7), Some(BOB));
    }

    #[tokio::test]
    async fn transitions_are_observable_on_the_bus() {
        let world = World::new().await;
        let mut sub = world.bus.subscribe(EventFilter::topics([EventTopic::Requests]));

        let id = world
            .bridge
            .create_request(ALICE, token_params(100), BRIDGE_FEE)
            .await
            .unwrap();
        world
            .bridge
            .process_request(RELAYER_A, DEST, id, true)
            .await
            .unwrap();

        // Created + claim + resolution.
        let events = sub.drain();
        assert_eq!(events.len(), 3);
    }
}
