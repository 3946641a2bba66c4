//! Request/response correlation over the host channel.
//!
//! Flow per request:
//! 1. Refuse immediately when not hosted (nothing acquired)
//! 2. Encode the envelope
//! 3. Subscribe to inbound events, then dispatch
//! 4. Wait for the first event whose `action` equals the expected reply kind,
//!    skipping unparseable and unrelated events. That event settles the
//!    request, even when its body cannot be decoded
//! 5. Give up after the timeout
//!
//! The subscription and the timer live inside the request future, so both
//! are released on every exit path, including the caller dropping the
//! future.
//!
//! The wire format has no per-request id. Concurrent requests waiting for
//! the same reply kind all observe the first matching reply and settle with
//! it.

use crate::domain::serialization::serialize;
use crate::error::BridgeError;
use crate::ports::outbound::{EnvironmentProbe, HostChannel};
use bridge_bus::Subscription;
use bridge_types::{BridgeResponse, OutboundEnvelope, ResponseKind, ResponseShapeError};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Counters for the correlator.
#[derive(Debug, Default)]
pub struct CorrelatorStats {
    /// Requests dispatched to the host
    pub dispatched: AtomicU64,
    /// Requests settled by a matching reply
    pub resolved: AtomicU64,
    /// Requests that hit their timeout
    pub timed_out: AtomicU64,
    /// Requests refused because the content is not hosted
    pub not_hosted: AtomicU64,
    /// Requests settled by a matching reply that could not be decoded
    pub invalid_replies: AtomicU64,
    /// Inbound events skipped because they were not JSON
    pub ignored_malformed: AtomicU64,
    /// Inbound events skipped because their discriminant did not match
    pub ignored_mismatched: AtomicU64,
    /// Requests currently waiting for a reply
    pending: AtomicUsize,
}

impl CorrelatorStats {
    /// Requests currently waiting for a reply.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::Acquire)
    }

    /// Point-in-time copy of every counter.
    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            dispatched: self.dispatched.load(Ordering::Relaxed),
            resolved: self.resolved.load(Ordering::Relaxed),
            timed_out: self.timed_out.load(Ordering::Relaxed),
            not_hosted: self.not_hosted.load(Ordering::Relaxed),
            invalid_replies: self.invalid_replies.load(Ordering::Relaxed),
            ignored_malformed: self.ignored_malformed.load(Ordering::Relaxed),
            ignored_mismatched: self.ignored_mismatched.load(Ordering::Relaxed),
            pending: self.pending(),
        }
    }
}

/// Plain copy of [`CorrelatorStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Requests dispatched to the host
    pub dispatched: u64,
    /// Requests settled by a matching reply
    pub resolved: u64,
    /// Requests that hit their timeout
    pub timed_out: u64,
    /// Requests refused because the content is not hosted
    pub not_hosted: u64,
    /// Requests settled by an undecodable matching reply
    pub invalid_replies: u64,
    /// Non-JSON inbound events skipped
    pub ignored_malformed: u64,
    /// Inbound events of another kind skipped
    pub ignored_mismatched: u64,
    /// Requests waiting at snapshot time
    pub pending: usize,
}

/// Keeps the pending gauge accurate however the request future ends.
struct PendingGuard<'a> {
    stats: &'a CorrelatorStats,
}

impl<'a> PendingGuard<'a> {
    fn enter(stats: &'a CorrelatorStats) -> Self {
        stats.pending.fetch_add(1, Ordering::AcqRel);
        Self { stats }
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.stats.pending.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Classification of one inbound event.
enum Inbound {
    /// Not JSON.
    Malformed(serde_json::Error),
    /// JSON, but not a reply of the expected kind.
    Unrelated(Option<String>),
    /// JSON whose `action` equals the expected kind.
    Matched(Value),
}

fn classify(raw: &str, expected: ResponseKind) -> Inbound {
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => return Inbound::Malformed(e),
    };

    match value.get("action").and_then(Value::as_str) {
        Some(action) if action == expected.as_str() => Inbound::Matched(value),
        other => Inbound::Unrelated(other.map(str::to_string)),
    }
}

/// Sends envelopes and correlates the host's replies.
pub struct Correlator {
    channel: Arc<dyn HostChannel>,
    probe: Arc<dyn EnvironmentProbe>,
    /// Host name for not-hosted errors
    host_name: String,
    default_timeout: Duration,
    stats: Arc<CorrelatorStats>,
}

impl Correlator {
    pub fn new(
        channel: Arc<dyn HostChannel>,
        probe: Arc<dyn EnvironmentProbe>,
        host_name: impl Into<String>,
        default_timeout: Duration,
    ) -> Self {
        Self {
            channel,
            probe,
            host_name: host_name.into(),
            default_timeout,
            stats: Arc::new(CorrelatorStats::default()),
        }
    }

    /// Whether the environment probe currently reports a host.
    #[must_use]
    pub fn is_hosted(&self) -> bool {
        self.probe.is_hosted()
    }

    /// Timeout applied when a request does not specify one.
    #[must_use]
    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    /// Statistics
    #[must_use]
    pub fn stats(&self) -> &CorrelatorStats {
        &self.stats
    }

    /// Send `envelope` and wait for a reply whose `action` is `expected`.
    ///
    /// # Errors
    ///
    /// - [`BridgeError::NotHosted`] before anything is sent
    /// - [`BridgeError::Timeout`] when no matching reply arrives in time
    /// - [`BridgeError::InvalidResponse`] when the matching reply cannot be
    ///   decoded as `T`
    /// - [`BridgeError::Serialization`] / [`BridgeError::Dispatch`] for
    ///   encoding and transport failures
    /// - [`BridgeError::ChannelClosed`] when the inbound stream ends
    pub async fn request<T>(
        &self,
        envelope: &OutboundEnvelope,
        expected: ResponseKind,
        timeout: Option<Duration>,
    ) -> Result<BridgeResponse<T>, BridgeError>
    where
        T: DeserializeOwned + Send,
    {
        let action = envelope.action();

        if !self.probe.is_hosted() {
            self.stats.not_hosted.fetch_add(1, Ordering::Relaxed);
            warn!(action = %action, host = %self.host_name, "Refusing request outside host container");
            return Err(BridgeError::NotHosted {
                action,
                host: self.host_name.clone(),
            });
        }

        let text = serialize(envelope)?;
        let timeout = timeout.unwrap_or(self.default_timeout);

        // Subscribe first so a reply emitted during dispatch is not missed.
        let mut subscription = self.channel.subscribe();
        self.channel.dispatch(text).await?;
        self.stats.dispatched.fetch_add(1, Ordering::Relaxed);

        let _pending = PendingGuard::enter(&self.stats);
        let started = Instant::now();

        debug!(
            action = %action,
            expected = %expected,
            subscription_id = subscription.id(),
            timeout_ms = timeout.as_millis(),
            "Request dispatched, waiting for reply"
        );

        let reply = self.await_reply::<T>(&mut subscription, expected);
        match tokio::time::timeout(timeout, reply).await {
            Ok(Some(Ok(response))) => {
                self.stats.resolved.fetch_add(1, Ordering::Relaxed);
                info!(
                    expected = %expected,
                    result = %response.result(),
                    elapsed_ms = started.elapsed().as_millis(),
                    "Request resolved"
                );
                Ok(response)
            }
            Ok(Some(Err(shape))) => {
                self.stats.invalid_replies.fetch_add(1, Ordering::Relaxed);
                warn!(
                    expected = %expected,
                    error = %shape,
                    "Matching reply could not be decoded"
                );
                Err(BridgeError::InvalidResponse(shape))
            }
            Ok(None) => {
                warn!(expected = %expected, "Host channel closed before reply");
                Err(BridgeError::ChannelClosed { expected })
            }
            Err(_) => {
                self.stats.timed_out.fetch_add(1, Ordering::Relaxed);
                warn!(
                    expected = %expected,
                    timeout_ms = timeout.as_millis(),
                    "Request timed out"
                );
                Err(BridgeError::Timeout { expected, timeout })
            }
        }
    }

    /// Read inbound events until one carries the expected reply kind.
    ///
    /// Returns `None` if the inbound stream ends first.
    async fn await_reply<T: DeserializeOwned>(
        &self,
        subscription: &mut Subscription,
        expected: ResponseKind,
    ) -> Option<Result<BridgeResponse<T>, ResponseShapeError>> {
        while let Some(raw) = subscription.recv().await {
            match classify(&raw, expected) {
                Inbound::Malformed(e) => {
                    self.stats.ignored_malformed.fetch_add(1, Ordering::Relaxed);
                    debug!(error = %e, "Ignoring unparseable inbound event");
                }
                Inbound::Unrelated(action) => {
                    self.stats.ignored_mismatched.fetch_add(1, Ordering::Relaxed);
                    debug!(
                        action = action.as_deref().unwrap_or("<none>"),
                        expected = %expected,
                        "Ignoring unrelated inbound event"
                    );
                }
                Inbound::Matched(value) => return Some(BridgeResponse::decode(value, expected)),
            }
        }

        None
    }
}
