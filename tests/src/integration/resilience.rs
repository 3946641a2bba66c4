//! # Resilience
//!
//! Behaviour under a noisy or unresponsive host:
//!
//! ```text
//! host emits:   garbage │ unrelated │ matching reply │ late reply
//! request:      skip      skip        SETTLE           (gone)
//! ```
//!
//! Also covers concurrent requests, timeouts followed by a fresh attempt,
//! dropped callers and transport failures. Every test ends by checking that
//! no subscription outlives its request.

#[cfg(test)]
mod tests {
    use crate::host::{success, SimulatedHost};
    use bridge_bus::InMemoryHostChannel;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use wallet_bridge::{
        BridgeConfig, BridgeError, DepositRequest, OutboundEnvelope, StaticEnvironment,
        TokenName, WalletBridge, WalletBridgeApi, WithdrawRequest,
    };

    fn hosted_bridge() -> (Arc<WalletBridge>, Arc<InMemoryHostChannel>) {
        let channel = Arc::new(InMemoryHostChannel::new());
        let bridge = WalletBridge::new(
            channel.clone(),
            Arc::new(StaticEnvironment::hosted()),
            &BridgeConfig::default(),
        );
        (Arc::new(bridge), channel)
    }

    fn deposit() -> DepositRequest {
        DepositRequest::new("100", TokenName::USDC)
    }

    #[tokio::test]
    async fn test_noise_before_reply_is_skipped() {
        let (bridge, channel) = hosted_bridge();
        let _host = SimulatedHost::spawn(
            channel.clone(),
            Box::new(|_| {
                vec![
                    "<<not json>>".to_string(),
                    json!({"foo": 1}).to_string(),
                    success("WITHDRAW_RESPONSE", json!({"txHash": "0xwrong"})),
                    success("DEPOSIT_RESPONSE", json!({"txHash": "0xright"})),
                ]
            }),
        );

        let response = bridge.deposit(deposit(), None).await.unwrap();

        assert_eq!(response.outcome.data().unwrap().tx_hash, "0xright");
        let stats = bridge.stats().snapshot();
        assert_eq!(stats.ignored_malformed, 1);
        assert_eq!(stats.ignored_mismatched, 2);
        assert_eq!(stats.resolved, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_undecodable_matching_reply_settles_at_once() {
        let (bridge, channel) = hosted_bridge();
        let _host = SimulatedHost::spawn(
            channel.clone(),
            Box::new(|_| {
                vec![
                    success("DEPOSIT_RESPONSE", json!({"txHash": 123})),
                    success("DEPOSIT_RESPONSE", json!({"txHash": "0xlate"})),
                ]
            }),
        );

        let started = tokio::time::Instant::now();
        let err = bridge.deposit(deposit(), None).await.unwrap_err();

        assert!(err.is_invalid_response(), "{err}");
        assert!(err.to_string().contains("DEPOSIT_RESPONSE"));
        assert!(started.elapsed() < Duration::from_secs(60));
        assert_eq!(channel.active_subscriptions(), 0);

        let stats = bridge.stats().snapshot();
        assert_eq!(stats.invalid_replies, 1);
        assert_eq!(stats.timed_out, 0);
    }

    #[tokio::test]
    async fn test_reply_followed_by_chatter_burst_still_resolves() {
        let (bridge, channel) = hosted_bridge();
        let _host = SimulatedHost::spawn(
            channel.clone(),
            Box::new(|_| {
                let mut events = vec![success("DEPOSIT_RESPONSE", json!({"txHash": "0xfirst"}))];
                events.extend((0..1_000).map(|i| json!({"type": "scroll", "offset": i}).to_string()));
                events
            }),
        );

        let response = bridge
            .deposit(deposit(), Some(Duration::from_secs(5)))
            .await
            .unwrap();

        assert_eq!(response.outcome.data().unwrap().tx_hash, "0xfirst");
        assert_eq!(channel.active_subscriptions(), 0);
    }

    #[tokio::test]
    async fn test_settled_request_is_inert() {
        let (bridge, channel) = hosted_bridge();
        let _host = SimulatedHost::spawn(
            channel.clone(),
            Box::new(|_| vec![success("DEPOSIT_RESPONSE", json!({"txHash": "0x1"}))]),
        );

        bridge.deposit(deposit(), None).await.unwrap();
        let before = bridge.stats().snapshot();

        let delivered = channel.emit(success("DEPOSIT_RESPONSE", json!({"txHash": "0x2"})));

        assert_eq!(delivered, 0);
        assert_eq!(channel.active_subscriptions(), 0);
        assert_eq!(bridge.stats().snapshot(), before);
        assert_eq!(before.pending, 0);
    }

    #[tokio::test]
    async fn test_mixed_kinds_resolve_independently() {
        let (bridge, channel) = hosted_bridge();
        let _host = SimulatedHost::spawn(
            channel.clone(),
            Box::new(|envelope| match envelope {
                OutboundEnvelope::Deposit(_) => {
                    vec![success("DEPOSIT_RESPONSE", json!({"txHash": "0xd"}))]
                }
                OutboundEnvelope::Withdraw(_) => {
                    vec![success("WITHDRAW_RESPONSE", json!({"txHash": "0xw"}))]
                }
                _ => Vec::new(),
            }),
        );

        let (deposited, withdrawn) = tokio::join!(
            bridge.deposit(deposit(), None),
            bridge.withdraw(WithdrawRequest::new("3", TokenName::DAI), None),
        );

        assert_eq!(deposited.unwrap().outcome.data().unwrap().tx_hash, "0xd");
        assert_eq!(withdrawn.unwrap().outcome.data().unwrap().tx_hash, "0xw");
        assert_eq!(channel.active_subscriptions(), 0);
    }

    #[tokio::test]
    async fn test_same_kind_requests_share_first_reply() {
        let (bridge, channel) = hosted_bridge();
        let answered = Arc::new(AtomicUsize::new(0));
        let counter = answered.clone();
        let _host = SimulatedHost::spawn(
            channel.clone(),
            Box::new(move |_| {
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    vec![success("DEPOSIT_RESPONSE", json!({"txHash": "0xfirst"}))]
                } else {
                    Vec::new()
                }
            }),
        );

        let (first, second) = tokio::join!(
            bridge.deposit(deposit(), None),
            bridge.deposit(DepositRequest::new("7", TokenName::DAI), None),
        );

        assert_eq!(first.unwrap().outcome.data().unwrap().tx_hash, "0xfirst");
        assert_eq!(second.unwrap().outcome.data().unwrap().tx_hash, "0xfirst");
        assert_eq!(channel.messages_dispatched(), 2);
        assert_eq!(bridge.stats().snapshot().resolved, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_then_fresh_attempt_succeeds() {
        let (bridge, channel) = hosted_bridge();
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = seen.clone();
        let _host = SimulatedHost::spawn(
            channel.clone(),
            Box::new(move |_| {
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    Vec::new()
                } else {
                    vec![success("DEPOSIT_RESPONSE", json!({"txHash": "0xretry"}))]
                }
            }),
        );

        let err = bridge
            .deposit(deposit(), Some(Duration::from_millis(50)))
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::Timeout { timeout, .. } if timeout.as_millis() == 50));
        assert!(err.to_string().contains("50ms"));

        let response = bridge.deposit(deposit(), None).await.unwrap();
        assert_eq!(response.outcome.data().unwrap().tx_hash, "0xretry");

        let stats = bridge.stats().snapshot();
        assert_eq!(stats.timed_out, 1);
        assert_eq!(stats.resolved, 1);
        assert_eq!(channel.active_subscriptions(), 0);
    }

    #[tokio::test]
    async fn test_dropped_caller_releases_subscription() {
        let (bridge, channel) = hosted_bridge();
        let _host = SimulatedHost::silent(channel.clone());

        let caller = {
            let bridge = bridge.clone();
            tokio::spawn(async move { bridge.deposit(deposit(), None).await })
        };
        while channel.messages_dispatched() == 0 {
            tokio::task::yield_now().await;
        }
        assert_eq!(channel.active_subscriptions(), 1);
        assert_eq!(bridge.stats().pending(), 1);

        caller.abort();
        assert!(caller.await.unwrap_err().is_cancelled());

        assert_eq!(channel.active_subscriptions(), 0);
        assert_eq!(bridge.stats().pending(), 0);
    }

    #[tokio::test]
    async fn test_disconnected_host_fails_dispatch() {
        let (bridge, channel) = hosted_bridge();
        channel.disconnect();

        let err = bridge.deposit(deposit(), None).await.unwrap_err();

        assert!(matches!(err, BridgeError::Dispatch(_)));
        assert_eq!(channel.active_subscriptions(), 0);
        assert_eq!(bridge.stats().snapshot().dispatched, 0);
    }
}
