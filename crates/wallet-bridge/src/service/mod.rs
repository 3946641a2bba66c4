//! Service layer: request/response correlation and the operation facades.

pub mod correlator;
pub mod wallet_bridge;

pub use correlator::{Correlator, CorrelatorStats, StatsSnapshot};
pub use wallet_bridge::WalletBridge;
