//! Bridge configuration with validation.

use crate::error::ConfigError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// How long a request waits for its reply unless the caller overrides it.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_millis(60_000);

/// Main bridge configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Default reply timeout for every operation
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
    /// Signals identifying the host container
    pub host: HostMarkers,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            host: HostMarkers::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl BridgeConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `WALLET_BRIDGE_TIMEOUT_MS`: Reply timeout in ms (default: 60000)
    /// - `WALLET_BRIDGE_HOST_NAME`: Host name used in error messages
    /// - `WALLET_BRIDGE_BRIDGE_OBJECT`: Global injected by the host
    /// - `WALLET_BRIDGE_UA_MARKER`: User-agent substring set by the host
    /// - `WALLET_BRIDGE_ROOT_CLASS`: Class the host puts on the root element
    /// - `WALLET_BRIDGE_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `WALLET_BRIDGE_JSON_LOGS`: Emit JSON logs (default: false)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup. Unset or
    /// unparseable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let request_timeout = lookup("WALLET_BRIDGE_TIMEOUT_MS")
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.request_timeout);

        let host = HostMarkers {
            name: lookup("WALLET_BRIDGE_HOST_NAME").unwrap_or(defaults.host.name),
            bridge_object: lookup("WALLET_BRIDGE_BRIDGE_OBJECT")
                .unwrap_or(defaults.host.bridge_object),
            user_agent_marker: lookup("WALLET_BRIDGE_UA_MARKER")
                .unwrap_or(defaults.host.user_agent_marker),
            root_class: lookup("WALLET_BRIDGE_ROOT_CLASS").unwrap_or(defaults.host.root_class),
        };

        let logging = LoggingConfig {
            level: lookup("WALLET_BRIDGE_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.logging.level),
            json: lookup("WALLET_BRIDGE_JSON_LOGS")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(defaults.logging.json),
        };

        Self {
            request_timeout,
            host,
            logging,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(
                "request_timeout cannot be 0".into(),
            ));
        }

        self.host.validate()
    }

    /// Override the default reply timeout.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// The three signals that identify the host container, plus its display
/// name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostMarkers {
    /// Name used in "can only be used inside a ... container" errors
    pub name: String,
    /// Name of the global object the host injects
    pub bridge_object: String,
    /// Substring the host adds to the user agent
    pub user_agent_marker: String,
    /// Class the host sets on the root document element
    pub root_class: String,
}

impl Default for HostMarkers {
    fn default() -> Self {
        Self {
            name: "WalletHost".to_string(),
            bridge_object: "ReactNativeWebView".to_string(),
            user_agent_marker: "WalletHost".to_string(),
            root_class: "wallet-host".to_string(),
        }
    }
}

impl HostMarkers {
    /// Every marker must be non-empty, otherwise it would match any scope.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("name", &self.name),
            ("bridge_object", &self.bridge_object),
            ("user_agent_marker", &self.user_agent_marker),
            ("root_class", &self.root_class),
        ];

        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyMarker(field));
            }
        }

        Ok(())
    }
}
