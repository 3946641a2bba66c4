//! Operation facades.
//!
//! Each operation wraps its payload in the matching envelope and hands it to
//! the [`Correlator`] together with the reply kind it waits for. Inputs are
//! not validated beyond what the types enforce.

use crate::domain::config::BridgeConfig;
use crate::error::BridgeError;
use crate::ports::inbound::WalletBridgeApi;
use crate::ports::outbound::{EnvironmentProbe, HostChannel};
use crate::service::correlator::{Correlator, CorrelatorStats};
use async_trait::async_trait;
use bridge_types::{
    AuthenticateRequest, AuthenticateSuccess, BridgeResponse, CallContractRequest,
    CallContractSuccess, DepositRequest, DepositSuccess, OutboundEnvelope, WithdrawRequest,
    WithdrawSuccess,
};
use std::sync::Arc;
use std::time::Duration;

/// Public entry point for embedded content.
pub struct WalletBridge {
    correlator: Correlator,
}

impl WalletBridge {
    /// Build a bridge over `channel`, using `probe` to detect the host.
    pub fn new(
        channel: Arc<dyn HostChannel>,
        probe: Arc<dyn EnvironmentProbe>,
        config: &BridgeConfig,
    ) -> Self {
        Self {
            correlator: Correlator::new(
                channel,
                probe,
                config.host.name.clone(),
                config.request_timeout,
            ),
        }
    }

    /// Whether the content currently runs inside the host container.
    #[must_use]
    pub fn is_hosted(&self) -> bool {
        self.correlator.is_hosted()
    }

    /// Statistics
    #[must_use]
    pub fn stats(&self) -> &CorrelatorStats {
        self.correlator.stats()
    }

    /// The underlying correlator, for envelopes built by hand.
    #[must_use]
    pub fn correlator(&self) -> &Correlator {
        &self.correlator
    }

    async fn send<T>(
        &self,
        envelope: OutboundEnvelope,
        timeout: Option<Duration>,
    ) -> Result<BridgeResponse<T>, BridgeError>
    where
        T: serde::de::DeserializeOwned + Send,
    {
        let expected = envelope.expected_response();
        self.correlator.request(&envelope, expected, timeout).await
    }
}

#[async_trait]
impl WalletBridgeApi for WalletBridge {
    async fn authenticate(
        &self,
        request: AuthenticateRequest,
        timeout: Option<Duration>,
    ) -> Result<BridgeResponse<AuthenticateSuccess>, BridgeError> {
        self.send(OutboundEnvelope::Authenticate(request), timeout).await
    }

    async fn deposit(
        &self,
        request: DepositRequest,
        timeout: Option<Duration>,
    ) -> Result<BridgeResponse<DepositSuccess>, BridgeError> {
        self.send(OutboundEnvelope::Deposit(request), timeout).await
    }

    async fn withdraw(
        &self,
        request: WithdrawRequest,
        timeout: Option<Duration>,
    ) -> Result<BridgeResponse<WithdrawSuccess>, BridgeError> {
        self.send(OutboundEnvelope::Withdraw(request), timeout).await
    }

    async fn call_smart_contract(
        &self,
        request: CallContractRequest,
        timeout: Option<Duration>,
    ) -> Result<BridgeResponse<CallContractSuccess>, BridgeError> {
        self.send(OutboundEnvelope::CallSmartContract(request), timeout).await
    }
}
