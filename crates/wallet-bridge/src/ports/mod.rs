//! Ports: the driving API and the driven dependencies.

pub mod inbound;
pub mod outbound;

pub use inbound::WalletBridgeApi;
pub use outbound::{EnvironmentProbe, HostChannel};
