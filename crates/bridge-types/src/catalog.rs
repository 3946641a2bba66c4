//! # Identifier Catalog
//!
//! Static identifiers the host container recognises. None of these carry
//! behavior; they exist so callers do not scatter magic values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// EVM chain identifier (EIP-155).
///
/// Encoded as a bare JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(pub u64);

impl ChainId {
    pub const ETHEREUM: ChainId = ChainId(1);
    pub const OPTIMISM: ChainId = ChainId(10);
    pub const BSC: ChainId = ChainId(56);
    pub const POLYGON: ChainId = ChainId(137);
    pub const BASE: ChainId = ChainId(8453);
    pub const ARBITRUM: ChainId = ChainId(42161);
    pub const AVALANCHE: ChainId = ChainId(43114);
    pub const SEPOLIA: ChainId = ChainId(11_155_111);

    /// Human readable name for well-known chains.
    #[must_use]
    pub const fn name(self) -> Option<&'static str> {
        match self.0 {
            1 => Some("Ethereum"),
            10 => Some("Optimism"),
            56 => Some("BNB Smart Chain"),
            137 => Some("Polygon"),
            8453 => Some("Base"),
            42161 => Some("Arbitrum One"),
            43114 => Some("Avalanche C-Chain"),
            11_155_111 => Some("Sepolia"),
            _ => None,
        }
    }
}

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Token symbols the host resolves by name.
pub struct TokenName;

impl TokenName {
    pub const ETH: &'static str = "ETH";
    pub const USDC: &'static str = "USDC";
    pub const USDT: &'static str = "USDT";
    pub const DAI: &'static str = "DAI";
    pub const WETH: &'static str = "WETH";
    pub const WBTC: &'static str = "WBTC";
    pub const MATIC: &'static str = "MATIC";

    /// All symbols in this catalog.
    pub const ALL: [&'static str; 7] = [
        Self::ETH,
        Self::USDC,
        Self::USDT,
        Self::DAI,
        Self::WETH,
        Self::WBTC,
        Self::MATIC,
    ];

    /// Whether `symbol` is one of the catalogued tokens (case-sensitive).
    #[must_use]
    pub fn is_known(symbol: &str) -> bool {
        Self::ALL.contains(&symbol)
    }
}

/// Token standard of the contract targeted by a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContractStandard {
    Erc20,
    Erc721,
    Erc1155,
    Native,
}
