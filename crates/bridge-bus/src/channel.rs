//! # Host Channel
//!
//! The binding trait the bridge core depends on.

use crate::subscriber::Subscription;
use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by a channel binding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChannelError {
    /// The host side of the channel is gone.
    #[error("host channel closed")]
    Closed,

    /// The host's send primitive refused the message.
    #[error("dispatch rejected by host: {0}")]
    Rejected(String),
}

/// Bidirectional text channel to the host container.
///
/// Implementations must allow any number of concurrent subscriptions and
/// deliver every inbound event to each of them.
#[async_trait]
pub trait HostChannel: Send + Sync {
    /// Send an encoded envelope to the host. Fire-and-forget.
    async fn dispatch(&self, envelope_text: String) -> Result<(), ChannelError>;

    /// Register a new inbound subscriber.
    ///
    /// The returned handle deregisters itself when dropped.
    fn subscribe(&self) -> Subscription;
}
