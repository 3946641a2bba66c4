//! # Wallet Bridge
//!
//! Lets web content embedded in a mobile host container request wallet
//! operations and await typed replies.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): configuration and the lossless JSON encoder
//! - **Ports Layer** (`ports/`): `WalletBridgeApi` (driving),
//!   `EnvironmentProbe` and `HostChannel` (driven)
//! - **Adapters Layer** (`adapters/`): global-scope and fixed probes
//! - **Service Layer** (`service/`): `Correlator` and the `WalletBridge` facade
//!
//! ```text
//! facade ──▶ serialize ──▶ HostChannel::dispatch ──▶ host
//!                                                      │
//! caller ◀── Correlator ◀── Subscription ◀─────────────┘
//! ```
//!
//! ## Error Model
//!
//! - Not hosted, timeout and transport failures are `Err(BridgeError)`.
//! - `FAILED` and `CANCELLED` replies are `Ok` with the matching
//!   [`Outcome`](bridge_types::Outcome) variant.
//! - Unparseable or unrelated inbound events are logged and skipped.
//!
//! ## Known Limitation
//!
//! Replies carry no request id. Concurrent requests of the same action all
//! settle with the first matching reply.
//!
//! ## Usage Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use bridge_bus::InMemoryHostChannel;
//! use wallet_bridge::{
//!     BridgeConfig, DepositRequest, GlobalScope, GlobalScopeProbe, WalletBridge,
//!     WalletBridgeApi,
//! };
//!
//! let config = BridgeConfig::from_env();
//! config.validate()?;
//!
//! let scope = GlobalScope::default().with_global("ReactNativeWebView");
//! let probe = GlobalScopeProbe::new(Some(scope), config.host.clone());
//! let bridge = WalletBridge::new(Arc::new(InMemoryHostChannel::new()), Arc::new(probe), &config);
//!
//! let reply = bridge.deposit(DepositRequest::new("100", "USDC"), None).await?;
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod adapters;
pub mod domain;
pub mod error;
pub mod logging;
pub mod ports;
pub mod service;

// Re-export main types
pub use adapters::{GlobalScope, GlobalScopeProbe, StaticEnvironment};
pub use domain::{
    big_integer, make_lossless, serialize, BridgeConfig, HostMarkers, DEFAULT_REQUEST_TIMEOUT,
    MAX_SAFE_INTEGER,
};
pub use error::{BridgeError, ConfigError};
pub use logging::{init_logging, LoggingConfig, LoggingError};
pub use ports::{EnvironmentProbe, HostChannel, WalletBridgeApi};
pub use service::{Correlator, CorrelatorStats, StatsSnapshot, WalletBridge};

pub use bridge_types::*;
