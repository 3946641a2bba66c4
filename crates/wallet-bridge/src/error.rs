//! Error types for the wallet bridge.
//!
//! Transport problems and unusable replies are errors. A host reply with
//! `result = FAILED` or `CANCELLED` resolves normally as an
//! [`Outcome`](bridge_types::Outcome).

use bridge_bus::ChannelError;
use bridge_types::{ActionKind, ResponseKind, ResponseShapeError};
use std::time::Duration;
use thiserror::Error;

/// Errors returned by bridge operations.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The content is not running inside the host container. Raised before
    /// anything is dispatched.
    #[error("{action} can only be used inside a {host} container")]
    NotHosted { action: ActionKind, host: String },

    /// No matching reply arrived in time.
    #[error("Request timed out after {}ms waiting for {}", .timeout.as_millis(), .expected)]
    Timeout {
        expected: ResponseKind,
        timeout: Duration,
    },

    /// The envelope could not be encoded.
    #[error("Failed to encode envelope: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The channel binding refused the outbound message.
    #[error("Dispatch failed: {0}")]
    Dispatch(#[from] ChannelError),

    /// A reply of the expected kind arrived but could not be decoded. It
    /// still settles the request.
    #[error("Invalid reply: {0}")]
    InvalidResponse(#[from] ResponseShapeError),

    /// The inbound stream ended before a reply arrived.
    #[error("Host channel closed while waiting for {expected}")]
    ChannelClosed { expected: ResponseKind },
}

impl BridgeError {
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, BridgeError::Timeout { .. })
    }

    #[must_use]
    pub fn is_not_hosted(&self) -> bool {
        matches!(self, BridgeError::NotHosted { .. })
    }

    #[must_use]
    pub fn is_invalid_response(&self) -> bool {
        matches!(self, BridgeError::InvalidResponse(_))
    }
}

/// Configuration validation errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid timeout: {0}")]
    InvalidTimeout(String),

    #[error("Host marker `{0}` cannot be empty")]
    EmptyMarker(&'static str),
}
