//! # Operation Scenarios
//!
//! One flow per facade operation, driven through a simulated host:
//!
//! ```text
//! caller ──deposit()──→ WalletBridge ──{"action":"DEPOSIT",...}──→ host
//!    ↑                                                               │
//!    └──────── BridgeResponse ←── {"action":"DEPOSIT_RESPONSE",...} ─┘
//! ```

#[cfg(test)]
mod tests {
    use crate::host::{cancelled, failure, success, SimulatedHost};
    use bridge_bus::InMemoryHostChannel;
    use primitive_types::U256;
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;
    use wallet_bridge::{
        AuthenticateRequest, BridgeConfig, BridgeError, CallContractRequest, ChainId,
        ContractCall, ContractStandard, DepositRequest, GlobalScope, GlobalScopeProbe,
        HostMarkers, OutboundEnvelope, Outcome, ResponseKind, ResultKind, StaticEnvironment,
        TokenName, WalletBridge, WalletBridgeApi, WithdrawRequest,
    };

    fn hosted_bridge() -> (WalletBridge, Arc<InMemoryHostChannel>) {
        let channel = Arc::new(InMemoryHostChannel::new());
        let bridge = WalletBridge::new(
            channel.clone(),
            Arc::new(StaticEnvironment::hosted()),
            &BridgeConfig::default(),
        );
        (bridge, channel)
    }

    #[tokio::test]
    async fn test_deposit_dispatches_envelope_and_resolves_with_receipt() {
        let (bridge, channel) = hosted_bridge();
        let host = SimulatedHost::spawn(
            channel.clone(),
            Box::new(|_| vec![success("DEPOSIT_RESPONSE", json!({"txHash": "0xabc"}))]),
        );

        let request = DepositRequest::new("100", TokenName::USDC).on_chain(ChainId::POLYGON);
        let response = bridge.deposit(request, None).await.unwrap();

        assert_eq!(
            channel.dispatched(),
            vec![r#"{"action":"DEPOSIT","data":{"amount":"100","tokenName":"USDC","chainId":137}}"#]
        );
        assert_eq!(response.action, ResponseKind::DepositResponse);
        assert_eq!(response.result(), ResultKind::Success);
        assert_eq!(response.outcome.data().unwrap().tx_hash, "0xabc");
        assert!(matches!(host.received()[0], OutboundEnvelope::Deposit(_)));
    }

    #[tokio::test]
    async fn test_withdraw_outside_host_is_refused_without_dispatch() {
        let channel = Arc::new(InMemoryHostChannel::new());
        let bridge = WalletBridge::new(
            channel.clone(),
            Arc::new(StaticEnvironment::not_hosted()),
            &BridgeConfig::default(),
        );

        let err = bridge
            .withdraw(WithdrawRequest::new("5", TokenName::USDT), None)
            .await
            .unwrap_err();

        assert!(err.is_not_hosted());
        assert_eq!(
            err.to_string(),
            "WITHDRAW can only be used inside a WalletHost container"
        );
        assert!(channel.dispatched().is_empty());
        assert_eq!(channel.active_subscriptions(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_authenticate_without_reply_times_out_after_default() {
        let (bridge, channel) = hosted_bridge();
        let _host = SimulatedHost::silent(channel.clone());

        let started = tokio::time::Instant::now();
        let err = bridge
            .authenticate(AuthenticateRequest::default(), None)
            .await
            .unwrap_err();

        assert!(err.is_timeout());
        let text = err.to_string();
        assert!(text.contains("AUTHENTICATE_RESPONSE"), "{text}");
        assert!(text.contains("60000ms"), "{text}");
        assert!(started.elapsed() >= Duration::from_millis(60_000));
        assert_eq!(
            channel.dispatched(),
            vec![r#"{"action":"AUTHENTICATE","data":{}}"#]
        );
        assert_eq!(channel.active_subscriptions(), 0);
    }

    #[tokio::test]
    async fn test_authenticate_success_carries_wallet_and_claims() {
        let (bridge, channel) = hosted_bridge();
        let _host = SimulatedHost::spawn(
            channel.clone(),
            Box::new(|envelope| match envelope {
                OutboundEnvelope::Authenticate(request) => {
                    let nonce = request.nonce.clone().unwrap_or_default();
                    vec![success(
                        "AUTHENTICATE_RESPONSE",
                        json!({
                            "wallet": "0xwallet",
                            "claims": [{"kyc": true}],
                            "signature": "0xsig",
                            "message": format!("sign-in {nonce}")
                        }),
                    )]
                }
                _ => Vec::new(),
            }),
        );

        let request = AuthenticateRequest::default()
            .with_nonce("n-1")
            .on_chain(ChainId::ETHEREUM);
        let response = bridge.authenticate(request, None).await.unwrap();

        let data = response.outcome.into_data().unwrap();
        assert_eq!(data.wallet, "0xwallet");
        assert_eq!(data.claims, vec![json!({"kyc": true})]);
        assert_eq!(data.message, "sign-in n-1");
        assert_eq!(
            channel.dispatched(),
            vec![r#"{"action":"AUTHENTICATE","data":{"nonce":"n-1","chainId":1}}"#]
        );
    }

    #[tokio::test]
    async fn test_withdraw_failed_resolves_with_error_info() {
        let (bridge, channel) = hosted_bridge();
        let _host = SimulatedHost::spawn(
            channel.clone(),
            Box::new(|_| vec![failure("WITHDRAW_RESPONSE", "INSUFFICIENT_FUNDS", "balance too low")]),
        );

        let response = bridge
            .withdraw(WithdrawRequest::new("1000000", TokenName::USDC), None)
            .await
            .unwrap();

        assert_eq!(response.result(), ResultKind::Failed);
        let error = response.outcome.error().unwrap();
        assert_eq!(error.code, "INSUFFICIENT_FUNDS");
        assert_eq!(error.message, "balance too low");
    }

    #[tokio::test]
    async fn test_contract_call_cancelled_by_user() {
        let (bridge, channel) = hosted_bridge();
        let host = SimulatedHost::spawn(
            channel.clone(),
            Box::new(|_| vec![cancelled("CALL_SMART_CONTRACT_RESPONSE")]),
        );

        let call = ContractCall::new("0xcontract", "approve")
            .param("0xspender")
            .param(wallet_bridge::big_integer(U256::MAX))
            .with_standard(ContractStandard::Erc20)
            .on_chain(ChainId::BASE);
        let request = CallContractRequest::new(vec![call]).title_value("token", "USDC");

        let response = bridge.call_smart_contract(request, None).await.unwrap();

        assert_eq!(response.outcome, Outcome::Cancelled);
        match &host.received()[0] {
            OutboundEnvelope::CallSmartContract(received) => {
                assert_eq!(received.contracts[0].function_name, "approve");
                assert_eq!(
                    received.contracts[0].function_params[1],
                    json!(U256::MAX.to_string())
                );
            }
            other => panic!("unexpected envelope: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_wide_integers_reach_host_as_exact_strings() {
        let (bridge, channel) = hosted_bridge();
        let _host = SimulatedHost::spawn(
            channel.clone(),
            Box::new(|_| vec![success("CALL_SMART_CONTRACT_RESPONSE", json!({"txHash": "0x1"}))]),
        );

        let call = ContractCall::new("0xcontract", "transfer")
            .param(9_007_199_254_740_993_u64)
            .param(42);
        bridge
            .call_smart_contract(CallContractRequest::new(vec![call]), None)
            .await
            .unwrap();

        let sent = &channel.dispatched()[0];
        assert!(sent.contains(r#""functionParams":["9007199254740993",42]"#), "{sent}");
    }

    #[tokio::test]
    async fn test_user_agent_probe_gates_operations() {
        let channel = Arc::new(InMemoryHostChannel::new());
        let scope = GlobalScope::default().with_user_agent("Mozilla/5.0 WalletHost/3.1");
        let probe = GlobalScopeProbe::new(Some(scope), HostMarkers::default());
        let bridge = WalletBridge::new(channel.clone(), Arc::new(probe), &BridgeConfig::default());
        let _host = SimulatedHost::spawn(
            channel.clone(),
            Box::new(|_| vec![success("WITHDRAW_RESPONSE", json!({"txHash": "0xw"}))]),
        );

        assert!(bridge.is_hosted());
        let response = bridge
            .withdraw(WithdrawRequest::new("1", TokenName::ETH), None)
            .await
            .unwrap();
        assert!(response.outcome.is_success());

        let detached = WalletBridge::new(
            channel.clone(),
            Arc::new(GlobalScopeProbe::detached(HostMarkers::default())),
            &BridgeConfig::default(),
        );
        let err = detached
            .withdraw(WithdrawRequest::new("1", TokenName::ETH), None)
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::NotHosted { .. }));
    }
}
