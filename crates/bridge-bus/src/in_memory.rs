//! # In-Memory Host Channel
//!
//! A channel binding with both ends in process. The bridge core sees an
//! ordinary [`HostChannel`]; the host side is driven through
//! [`InMemoryHostChannel::host_listener`] and [`InMemoryHostChannel::emit`].
//! Used for simulators, embedding tests and hosts that already deliver
//! messages into the process (e.g. a webview callback pushing into `emit`).

use crate::channel::{ChannelError, HostChannel};
use crate::subscriber::{InboundHub, Subscription};
use crate::DEFAULT_CHANNEL_CAPACITY;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::RwLock;
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// In-process implementation of [`HostChannel`].
pub struct InMemoryHostChannel {
    /// Host → content events.
    inbound: InboundHub,

    /// Content → host messages, fanned out to host listeners.
    outbound: broadcast::Sender<String>,

    /// Every message dispatched, in order.
    dispatched: RwLock<Vec<String>>,

    /// Total messages dispatched.
    messages_dispatched: AtomicU64,

    /// Set once the host side is torn down.
    disconnected: AtomicBool,
}

impl InMemoryHostChannel {
    /// Create a channel with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a channel whose host listeners buffer up to `capacity`
    /// dispatched messages. Inbound delivery is never bounded.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (outbound, _) = broadcast::channel(capacity);
        Self {
            inbound: InboundHub::new(),
            outbound,
            dispatched: RwLock::new(Vec::new()),
            messages_dispatched: AtomicU64::new(0),
            disconnected: AtomicBool::new(false),
        }
    }

    /// Attach a host-side reader for dispatched messages.
    ///
    /// Only messages dispatched after this call are observed.
    #[must_use]
    pub fn host_listener(&self) -> HostListener {
        HostListener {
            receiver: self.outbound.subscribe(),
        }
    }

    /// Emit an inbound event as the host would.
    ///
    /// Returns the number of subscribers that received it.
    pub fn emit(&self, raw: impl Into<String>) -> usize {
        self.inbound.publish(raw.into())
    }

    /// Snapshot of every dispatched message, oldest first.
    #[must_use]
    pub fn dispatched(&self) -> Vec<String> {
        self.dispatched
            .read()
            .map(|log| log.clone())
            .unwrap_or_default()
    }

    /// Total messages dispatched.
    #[must_use]
    pub fn messages_dispatched(&self) -> u64 {
        self.messages_dispatched.load(Ordering::Relaxed)
    }

    /// Total inbound events emitted.
    #[must_use]
    pub fn events_emitted(&self) -> u64 {
        self.inbound.events_published()
    }

    /// Number of live inbound subscriptions.
    #[must_use]
    pub fn active_subscriptions(&self) -> usize {
        self.inbound.active_subscriptions()
    }

    /// Simulate the host going away: later dispatches fail with
    /// [`ChannelError::Closed`].
    pub fn disconnect(&self) {
        self.disconnected.store(true, Ordering::Release);
    }

    /// Whether [`disconnect`](Self::disconnect) was called.
    #[must_use]
    pub fn is_disconnected(&self) -> bool {
        self.disconnected.load(Ordering::Acquire)
    }
}

impl Default for InMemoryHostChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HostChannel for InMemoryHostChannel {
    async fn dispatch(&self, envelope_text: String) -> Result<(), ChannelError> {
        if self.is_disconnected() {
            warn!("Dispatch attempted on disconnected host channel");
            return Err(ChannelError::Closed);
        }

        self.messages_dispatched.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut log) = self.dispatched.write() {
            log.push(envelope_text.clone());
        }

        match self.outbound.send(envelope_text) {
            Ok(listeners) => debug!(listeners = listeners, "Message dispatched to host"),
            Err(_) => debug!("Message dispatched with no host listener attached"),
        }

        Ok(())
    }

    fn subscribe(&self) -> Subscription {
        self.inbound.subscribe()
    }
}

/// Host-side reader of dispatched messages.
pub struct HostListener {
    receiver: broadcast::Receiver<String>,
}

impl HostListener {
    /// Wait for the next dispatched message.
    ///
    /// Returns `None` once the channel is dropped.
    pub async fn next_message(&mut self) -> Option<String> {
        loop {
            match self.receiver.recv().await {
                Ok(message) => return Some(message),
                Err(broadcast::error::RecvError::Closed) => return None,
                Err(broadcast::error::RecvError::Lagged(count)) => {
                    debug!(lagged = count, "Host listener lagged, some messages dropped");
                }
            }
        }
    }
}
