//! # Action Payloads
//!
//! Outbound `data` shapes per action and the success `data` shapes the host
//! returns. Field names are camelCase on the wire; optional fields are
//! omitted when absent.

use crate::catalog::{ChainId, ContractStandard};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Display;

// =============================================================================
// OUTBOUND
// =============================================================================

/// `AUTHENTICATE` payload. Every field is optional; the default is a valid
/// request and encodes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticateRequest {
    /// Caller-chosen nonce embedded in the signed message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<ChainId>,
}

impl AuthenticateRequest {
    #[must_use]
    pub fn with_nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    #[must_use]
    pub fn on_chain(mut self, chain_id: ChainId) -> Self {
        self.chain_id = Some(chain_id);
        self
    }
}

/// `DEPOSIT` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositRequest {
    /// Decimal amount in the token's base units.
    pub amount: String,
    pub token_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<ChainId>,
}

impl DepositRequest {
    /// Build a deposit. `amount` is rendered through `Display`, so wide
    /// integers such as `U256` keep every digit.
    pub fn new(amount: impl Display, token_name: impl Into<String>) -> Self {
        Self {
            amount: amount.to_string(),
            token_name: token_name.into(),
            chain_id: None,
        }
    }

    #[must_use]
    pub fn on_chain(mut self, chain_id: ChainId) -> Self {
        self.chain_id = Some(chain_id);
        self
    }
}

/// `WITHDRAW` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawRequest {
    /// Decimal amount in the token's base units.
    pub amount: String,
    pub token_name: String,
}

impl WithdrawRequest {
    pub fn new(amount: impl Display, token_name: impl Into<String>) -> Self {
        Self {
            amount: amount.to_string(),
            token_name: token_name.into(),
        }
    }
}

/// A single contract invocation inside a `CALL_SMART_CONTRACT` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractCall {
    pub contract_address: String,
    pub function_name: String,
    /// Positional ABI arguments. Wide integers must already be decimal
    /// strings by the time the envelope is encoded.
    #[serde(default)]
    pub function_params: Vec<Value>,
    /// Native value attached to the call, decimal base units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_standard: Option<ContractStandard>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<ChainId>,
    /// Host-interpreted permit objects, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permits: Option<Vec<Value>>,
}

impl ContractCall {
    pub fn new(contract_address: impl Into<String>, function_name: impl Into<String>) -> Self {
        Self {
            contract_address: contract_address.into(),
            function_name: function_name.into(),
            function_params: Vec::new(),
            value: None,
            contract_standard: None,
            chain_id: None,
            permits: None,
        }
    }

    /// Append one positional argument.
    #[must_use]
    pub fn param(mut self, param: impl Into<Value>) -> Self {
        self.function_params.push(param.into());
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Display) -> Self {
        self.value = Some(value.to_string());
        self
    }

    #[must_use]
    pub fn with_standard(mut self, standard: ContractStandard) -> Self {
        self.contract_standard = Some(standard);
        self
    }

    #[must_use]
    pub fn on_chain(mut self, chain_id: ChainId) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    #[must_use]
    pub fn with_permit(mut self, permit: Value) -> Self {
        self.permits.get_or_insert_with(Vec::new).push(permit);
        self
    }
}

/// `CALL_SMART_CONTRACT` payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallContractRequest {
    pub contracts: Vec<ContractCall>,
    /// Substitutions for the host's confirmation-screen title template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_values: Option<Map<String, Value>>,
    /// Substitutions for the host's confirmation-screen description template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_values: Option<Map<String, Value>>,
}

impl CallContractRequest {
    pub fn new(contracts: Vec<ContractCall>) -> Self {
        Self {
            contracts,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn title_value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.title_values
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn description_value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.description_values
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }
}

// =============================================================================
// INBOUND (SUCCESS DATA)
// =============================================================================

/// Success data for `AUTHENTICATE_RESPONSE`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticateSuccess {
    /// Address of the authenticated wallet.
    pub wallet: String,
    /// Host-issued claims about the wallet, passed through as-is.
    #[serde(default)]
    pub claims: Vec<Value>,
    pub signature: String,
    /// The exact message that was signed.
    pub message: String,
}

/// Success data for `DEPOSIT_RESPONSE`, `WITHDRAW_RESPONSE` and
/// `CALL_SMART_CONTRACT_RESPONSE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub tx_hash: String,
}

pub type DepositSuccess = TransactionReceipt;
pub type WithdrawSuccess = TransactionReceipt;
pub type CallContractSuccess = TransactionReceipt;
