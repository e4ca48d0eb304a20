//! # Double-Processing Races
//!
//! The correctness-critical property: across all relayers and concurrent
//! attempts, exactly one `process_request` per id succeeds, and the
//! recipient is paid exactly once.

#[cfg(test)]
mod tests {
    use crate::integration::harness::*;
    use ac_01_asset_custody::{AssetKind, AssetSpec};
    use ac_02_bridge::{BridgeApi, BridgeError, BridgeStatus, CreateRequestParams};
    use std::sync::Arc;

    fn token_params(amount: u128) -> CreateRequestParams {
        CreateRequestParams {
            recipient: BOB,
            destination: DEST,
            asset: AssetSpec::fungible(AssetKind::Token, TOKEN, amount),
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn two_relayers_race_exactly_one_wins() {
        let world = World::new().await;
        let id = world
            .bridge
            .create_request(ALICE, token_params(100), BRIDGE_FEE)
            .await
            .unwrap();

        let bridge_a = Arc::clone(&world.bridge);
        let bridge_b = Arc::clone(&world.bridge);
        let a = tokio::spawn(async move {
            bridge_a.process_request(RELAYER_A, DEST, id, true).await
        });
        let b = tokio::spawn(async move {
            bridge_b.process_request(RELAYER_B, DEST, id, true).await
        });

        let results = [a.await.unwrap(), b.await.unwrap()];
        let wins = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(wins, 1);

        // The loser observed the status precondition failure.
        let loss = results
            .iter()
            .find_map(|r| r.as_ref().err())
            .expect("one attempt lost");
        assert!(matches!(loss, BridgeError::InvalidTransition { .. }));

        // Paid exactly once.
        assert_eq!(world.ledger.balance_of(TOKEN, BOB), 100);
        assert_eq!(
            world.bridge.request(id).unwrap().status,
            BridgeStatus::Completed
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn many_racing_attempts_across_many_requests() {
        let world = World::new().await;

        let mut ids = Vec::new();
        for i in 0..10u64 {
            world.clock.advance(1); // distinct creation tuples
            let id = world
                .bridge
                .create_request(ALICE, token_params(50 + i as u128), BRIDGE_FEE)
                .await
                .unwrap();
            ids.push(id);
        }

        // Both relayers attack every request, with mixed outcomes.
        let mut handles = Vec::new();
        for &id in &ids {
            for (relayer, success) in [(RELAYER_A, true), (RELAYER_B, false)] {
                let bridge = Arc::clone(&world.bridge);
                handles.push(tokio::spawn(async move {
                    bridge.process_request(relayer, DEST, id, success).await
                }));
            }
        }

        let mut wins = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                wins += 1;
            }
        }
        // Exactly one win per request.
        assert_eq!(wins, ids.len());

        // Every request ended terminal, and custody fully drained.
        for id in ids {
            assert!(world.bridge.request(id).unwrap().status.is_terminal());
        }
        assert!(world.custody.is_empty());

        // Conservation: whatever was not completed went back to the
        // sender; the rest reached the recipient. Nothing vanished.
        let alice = world.ledger.balance_of(TOKEN, ALICE);
        let bob = world.ledger.balance_of(TOKEN, BOB);
        assert_eq!(alice + bob, 1_000_000);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn cancel_races_processing() {
        let world = World::new().await;
        let id = world
            .bridge
            .create_request(ALICE, token_params(100), BRIDGE_FEE)
            .await
            .unwrap();

        let bridge_r = Arc::clone(&world.bridge);
        let bridge_c = Arc::clone(&world.bridge);
        let process = tokio::spawn(async move {
            bridge_r.process_request(RELAYER_A, DEST, id, true).await.map(|_| ())
        });
        let cancel = tokio::spawn(async move { bridge_c.cancel_request(ALICE, id).await });

        let outcomes = [process.await.unwrap(), cancel.await.unwrap()];
        let wins = outcomes.iter().filter(|r| r.is_ok()).count();
        assert_eq!(wins, 1);

        // Either way the funds went somewhere, exactly once.
        let alice = world.ledger.balance_of(TOKEN, ALICE);
        let bob = world.ledger.balance_of(TOKEN, BOB);
        assert_eq!(alice + bob, 1_000_000);
        assert!(world.custody.is_empty());
    }
}
