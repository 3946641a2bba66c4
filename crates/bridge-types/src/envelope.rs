//! # Envelopes
//!
//! Top-level JSON objects exchanged with the host.
//!
//! ## Outbound
//!
//! `{ "action": "DEPOSIT", "data": { ... } }`, modelled as an adjacently
//! tagged enum so the payload type is fixed by the action.
//!
//! ## Inbound
//!
//! `{ "action": "DEPOSIT_RESPONSE", "result": "SUCCESS", "data": { ... } }`
//!
//! `result` decides which of `data` / `error` is meaningful:
//!
//! | result    | carried |
//! |-----------|---------|
//! | SUCCESS   | `data`  |
//! | FAILED    | `error` |
//! | CANCELLED | neither |
//!
//! A domain-level failure is a valid response, not a transport error.

use crate::actions::{ActionKind, ResponseKind, ResultKind};
use crate::payloads::{AuthenticateRequest, CallContractRequest, DepositRequest, WithdrawRequest};
use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

/// Message sent to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutboundEnvelope {
    Authenticate(AuthenticateRequest),
    Deposit(DepositRequest),
    Withdraw(WithdrawRequest),
    CallSmartContract(CallContractRequest),
}

impl OutboundEnvelope {
    /// The action discriminant of this envelope.
    #[must_use]
    pub fn action(&self) -> ActionKind {
        match self {
            OutboundEnvelope::Authenticate(_) => ActionKind::Authenticate,
            OutboundEnvelope::Deposit(_) => ActionKind::Deposit,
            OutboundEnvelope::Withdraw(_) => ActionKind::Withdraw,
            OutboundEnvelope::CallSmartContract(_) => ActionKind::CallSmartContract,
        }
    }

    /// The reply discriminant the host answers this envelope with.
    #[must_use]
    pub fn expected_response(&self) -> ResponseKind {
        self.action().response_kind()
    }
}

/// Error details attached to a `FAILED` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub message: String,
    pub code: String,
}

impl ErrorInfo {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
        }
    }
}

/// Business outcome of a host operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The host completed the operation.
    Success(T),
    /// The host attempted the operation and it failed.
    Failed(ErrorInfo),
    /// The user dismissed the operation.
    Cancelled,
}

impl<T> Outcome<T> {
    /// The `result` discriminant for this outcome.
    #[must_use]
    pub fn kind(&self) -> ResultKind {
        match self {
            Outcome::Success(_) => ResultKind::Success,
            Outcome::Failed(_) => ResultKind::Failed,
            Outcome::Cancelled => ResultKind::Cancelled,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Success data, if any.
    pub fn data(&self) -> Option<&T> {
        match self {
            Outcome::Success(data) => Some(data),
            _ => None,
        }
    }

    /// Failure details, if any.
    pub fn error(&self) -> Option<&ErrorInfo> {
        match self {
            Outcome::Failed(error) => Some(error),
            _ => None,
        }
    }

    /// Consume into the success data, dropping failure details.
    pub fn into_data(self) -> Option<T> {
        match self {
            Outcome::Success(data) => Some(data),
            _ => None,
        }
    }
}

/// Inbound envelope with no typing applied to `data`.
///
/// This is the literal wire shape; [`BridgeResponse`] is built from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawResponse {
    pub action: ResponseKind,
    pub result: ResultKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

/// Reasons a raw inbound envelope does not form a valid [`BridgeResponse`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResponseShapeError {
    #[error("{action} reported SUCCESS without data")]
    MissingData { action: ResponseKind },

    #[error("{action} reported FAILED without error details")]
    MissingError { action: ResponseKind },

    #[error("{action} data does not match the expected shape: {reason}")]
    InvalidData { action: ResponseKind, reason: String },

    #[error("{action} reply is not a valid response envelope: {reason}")]
    InvalidEnvelope { action: ResponseKind, reason: String },
}

/// Typed reply from the host.
///
/// Fields that do not belong to the reported `result` are dropped while
/// decoding, so the outcome is always self-consistent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(
    try_from = "RawResponse",
    bound(deserialize = "T: DeserializeOwned")
)]
pub struct BridgeResponse<T> {
    pub action: ResponseKind,
    pub outcome: Outcome<T>,
}

impl<T> BridgeResponse<T> {
    pub fn success(action: ResponseKind, data: T) -> Self {
        Self {
            action,
            outcome: Outcome::Success(data),
        }
    }

    pub fn failed(action: ResponseKind, error: ErrorInfo) -> Self {
        Self {
            action,
            outcome: Outcome::Failed(error),
        }
    }

    pub fn cancelled(action: ResponseKind) -> Self {
        Self {
            action,
            outcome: Outcome::Cancelled,
        }
    }

    /// The `result` discriminant of this reply.
    #[must_use]
    pub fn result(&self) -> ResultKind {
        self.outcome.kind()
    }
}

impl<T: DeserializeOwned> TryFrom<RawResponse> for BridgeResponse<T> {
    type Error = ResponseShapeError;

    fn try_from(raw: RawResponse) -> Result<Self, Self::Error> {
        let action = raw.action;
        let outcome = match raw.result {
            ResultKind::Success => {
                let data = raw
                    .data
                    .ok_or(ResponseShapeError::MissingData { action })?;
                let data = serde_json::from_value(data).map_err(|e| {
                    ResponseShapeError::InvalidData {
                        action,
                        reason: e.to_string(),
                    }
                })?;
                Outcome::Success(data)
            }
            ResultKind::Failed => {
                let error = raw
                    .error
                    .ok_or(ResponseShapeError::MissingError { action })?;
                Outcome::Failed(error)
            }
            ResultKind::Cancelled => Outcome::Cancelled,
        };

        Ok(Self { action, outcome })
    }
}

impl<T: DeserializeOwned> BridgeResponse<T> {
    /// Decode a reply already known to carry `action == expected`.
    ///
    /// Unlike plain deserialization, the reason a reply is unusable is kept
    /// as a [`ResponseShapeError`].
    pub fn decode(value: Value, expected: ResponseKind) -> Result<Self, ResponseShapeError> {
        let raw: RawResponse =
            serde_json::from_value(value).map_err(|e| ResponseShapeError::InvalidEnvelope {
                action: expected,
                reason: e.to_string(),
            })?;
        Self::try_from(raw)
    }
}

impl<T: Serialize> Serialize for BridgeResponse<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("action", &self.action)?;
        map.serialize_entry("result", &self.outcome.kind())?;
        match &self.outcome {
            Outcome::Success(data) => map.serialize_entry("data", data)?,
            Outcome::Failed(error) => map.serialize_entry("error", error)?,
            Outcome::Cancelled => {}
        }
        map.end()
    }
}
