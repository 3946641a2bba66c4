//! Inbound Ports (Driving Ports)
//!
//! The operations embedded content calls.

use crate::error::BridgeError;
use async_trait::async_trait;
use bridge_types::{
    AuthenticateRequest, AuthenticateSuccess, BridgeResponse, CallContractRequest,
    CallContractSuccess, DepositRequest, DepositSuccess, WithdrawRequest, WithdrawSuccess,
};
use std::time::Duration;

/// Wallet operations exposed to embedded content.
///
/// Every operation sends one envelope and waits for the host's reply.
/// `timeout` overrides the configured default for that call only.
///
/// A reply with `result = FAILED` or `CANCELLED` is returned as `Ok`; only
/// transport problems (not hosted, timeout, channel failure) are `Err`.
#[async_trait]
pub trait WalletBridgeApi: Send + Sync {
    /// Ask the host to sign an authentication message for the wallet.
    async fn authenticate(
        &self,
        request: AuthenticateRequest,
        timeout: Option<Duration>,
    ) -> Result<BridgeResponse<AuthenticateSuccess>, BridgeError>;

    /// Ask the host to deposit funds.
    async fn deposit(
        &self,
        request: DepositRequest,
        timeout: Option<Duration>,
    ) -> Result<BridgeResponse<DepositSuccess>, BridgeError>;

    /// Ask the host to withdraw funds.
    async fn withdraw(
        &self,
        request: WithdrawRequest,
        timeout: Option<Duration>,
    ) -> Result<BridgeResponse<WithdrawSuccess>, BridgeError>;

    /// Ask the host to execute one or more contract calls.
    async fn call_smart_contract(
        &self,
        request: CallContractRequest,
        timeout: Option<Duration>,
    ) -> Result<BridgeResponse<CallContractSuccess>, BridgeError>;
}
