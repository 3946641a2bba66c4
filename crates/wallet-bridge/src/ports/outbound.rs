//! Outbound Ports (Driven Ports)
//!
//! What the bridge needs from its surroundings: a way to tell whether it is
//! hosted, and the message channel itself.

pub use bridge_bus::HostChannel;

/// Answers whether the current runtime is embedded in the host container.
///
/// Must be cheap, synchronous and side-effect free; it is consulted before
/// every outbound call. Implementations never fail: a missing or unreadable
/// environment means "not hosted".
pub trait EnvironmentProbe: Send + Sync {
    fn is_hosted(&self) -> bool;
}
