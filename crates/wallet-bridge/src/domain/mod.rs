//! Domain layer: configuration and the transport-safe encoder. No I/O.

pub mod config;
pub mod serialization;

pub use config::{BridgeConfig, HostMarkers, DEFAULT_REQUEST_TIMEOUT};
pub use serialization::{big_integer, make_lossless, serialize, MAX_SAFE_INTEGER};
