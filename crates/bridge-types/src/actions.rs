//! # Discriminants
//!
//! Closed enumerations used to route messages in both directions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Operation requested from the host (outbound `action` field).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    /// Prove wallet ownership by signing a host-built message.
    Authenticate,
    /// Move funds from the wallet into the embedding application.
    Deposit,
    /// Move funds from the embedding application back to the wallet.
    Withdraw,
    /// Execute one or more contract calls through the wallet.
    CallSmartContract,
}

impl ActionKind {
    /// All actions, in wire-catalog order.
    pub const ALL: [ActionKind; 4] = [
        ActionKind::Authenticate,
        ActionKind::Deposit,
        ActionKind::Withdraw,
        ActionKind::CallSmartContract,
    ];

    /// Wire name of this action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ActionKind::Authenticate => "AUTHENTICATE",
            ActionKind::Deposit => "DEPOSIT",
            ActionKind::Withdraw => "WITHDRAW",
            ActionKind::CallSmartContract => "CALL_SMART_CONTRACT",
        }
    }

    /// The reply discriminant the host uses to answer this action.
    #[must_use]
    pub const fn response_kind(self) -> ResponseKind {
        match self {
            ActionKind::Authenticate => ResponseKind::AuthenticateResponse,
            ActionKind::Deposit => ResponseKind::DepositResponse,
            ActionKind::Withdraw => ResponseKind::WithdrawResponse,
            ActionKind::CallSmartContract => ResponseKind::CallSmartContractResponse,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reply discriminant (inbound `action` field).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseKind {
    AuthenticateResponse,
    DepositResponse,
    WithdrawResponse,
    CallSmartContractResponse,
}

impl ResponseKind {
    /// Wire name of this reply kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ResponseKind::AuthenticateResponse => "AUTHENTICATE_RESPONSE",
            ResponseKind::DepositResponse => "DEPOSIT_RESPONSE",
            ResponseKind::WithdrawResponse => "WITHDRAW_RESPONSE",
            ResponseKind::CallSmartContractResponse => "CALL_SMART_CONTRACT_RESPONSE",
        }
    }

    /// The action this reply answers.
    #[must_use]
    pub const fn action_kind(self) -> ActionKind {
        match self {
            ResponseKind::AuthenticateResponse => ActionKind::Authenticate,
            ResponseKind::DepositResponse => ActionKind::Deposit,
            ResponseKind::WithdrawResponse => ActionKind::Withdraw,
            ResponseKind::CallSmartContractResponse => ActionKind::CallSmartContract,
        }
    }
}

impl fmt::Display for ResponseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Business-level outcome reported by the host (inbound `result` field).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultKind {
    Success,
    Failed,
    Cancelled,
}

impl ResultKind {
    /// Wire name of this outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ResultKind::Success => "SUCCESS",
            ResultKind::Failed => "FAILED",
            ResultKind::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
