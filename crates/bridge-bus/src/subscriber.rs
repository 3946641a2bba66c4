//! # Inbound Subscriptions
//!
//! Fan-out of raw inbound text to any number of independent subscribers.
//!
//! Every subscriber owns an unbounded queue registered in the hub, so a
//! burst of host events never overwrites one a slow subscriber has not read
//! yet. Dropping the [`Subscription`] removes its queue from the registry.

use dashmap::DashMap;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tokio_stream::Stream;
use tracing::debug;

type Registry = DashMap<u64, mpsc::UnboundedSender<String>>;

/// Broadcast hub for inbound host events.
///
/// Channel bindings own one hub and feed every message the host emits into
/// it. Subscribers created after an event was published do not see it.
pub struct InboundHub {
    /// Live subscriber queues by subscription id.
    subscribers: Arc<Registry>,

    /// Monotonic id source for subscriptions.
    next_id: AtomicU64,

    /// Total events published.
    events_published: AtomicU64,
}

impl InboundHub {
    #[must_use]
    pub fn new() -> Self {
        Self {
            subscribers: Arc::new(DashMap::new()),
            next_id: AtomicU64::new(1),
            events_published: AtomicU64::new(0),
        }
    }

    /// Register a new subscriber.
    #[must_use]
    pub fn subscribe(&self) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (sender, receiver) = mpsc::unbounded_channel();
        self.subscribers.insert(id, sender);

        debug!(subscription_id = id, "Inbound subscription created");

        Subscription {
            receiver,
            guard: SubscriptionGuard {
                id,
                registry: Arc::downgrade(&self.subscribers),
            },
        }
    }

    /// Deliver one inbound event to every live subscriber.
    ///
    /// Returns the number of subscribers that received it.
    pub fn publish(&self, raw: String) -> usize {
        self.events_published.fetch_add(1, Ordering::Relaxed);

        let receivers = self
            .subscribers
            .iter()
            .filter(|entry| entry.value().send(raw.clone()).is_ok())
            .count();

        if receivers == 0 {
            debug!("Inbound event dropped (no subscribers)");
        } else {
            debug!(receivers = receivers, "Inbound event delivered");
        }
        receivers
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn active_subscriptions(&self) -> usize {
        self.subscribers.len()
    }

    /// Total events published, delivered or not.
    #[must_use]
    pub fn events_published(&self) -> u64 {
        self.events_published.load(Ordering::Relaxed)
    }
}

impl Default for InboundHub {
    fn default() -> Self {
        Self::new()
    }
}

/// Deregisters a subscription from its hub when dropped.
struct SubscriptionGuard {
    id: u64,
    registry: Weak<Registry>,
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(&self.id);
        }
        debug!(subscription_id = self.id, "Inbound subscription dropped");
    }
}

/// Handle for receiving inbound events.
///
/// When dropped, the subscription is removed from the hub.
pub struct Subscription {
    receiver: mpsc::UnboundedReceiver<String>,
    guard: SubscriptionGuard,
}

impl Subscription {
    /// Identifier of this subscription, unique per hub.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.guard.id
    }

    /// Receive the next inbound event.
    ///
    /// # Returns
    ///
    /// - `Some(raw)` - The next event
    /// - `None` - The hub was dropped and every queued event was read
    pub async fn recv(&mut self) -> Option<String> {
        self.receiver.recv().await
    }

    /// Receive without waiting.
    ///
    /// `None` means nothing is queued right now (or the hub is gone).
    pub fn try_recv(&mut self) -> Option<String> {
        self.receiver.try_recv().ok()
    }

    /// Explicitly deregister. Equivalent to dropping the handle.
    pub fn unsubscribe(self) {}

    /// Convert into a `Stream` of inbound events.
    #[must_use]
    pub fn into_stream(self) -> InboundStream {
        InboundStream {
            inner: UnboundedReceiverStream::new(self.receiver),
            _guard: self.guard,
        }
    }
}

/// Stream adapter over a [`Subscription`]; keeps the registration alive.
pub struct InboundStream {
    inner: UnboundedReceiverStream<String>,
    _guard: SubscriptionGuard,
}

impl Stream for InboundStream {
    type Item = String;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
