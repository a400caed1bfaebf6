//! Wallet provider types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Chain a wallet provider signs for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Chain {
    Solana,
    Ethereum,
}

impl Chain {
    /// USDC token address on this chain (devnet mint on Solana, mainnet contract on Ethereum).
    pub fn usdc_address(self) -> &'static str {
        match self {
            Self::Solana => "4zMMC9srt5Ri5X14GAgXhaHii3GnPAEERYPJgZJDncDU",
            Self::Ethereum => "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48",
        }
    }

    /// Token contract/mint for `currency` on this chain, if Reppay knows it.
    pub fn token_address(self, currency: &str) -> Option<&'static str> {
        currency
            .eq_ignore_ascii_case("USDC")
            .then(|| self.usdc_address())
    }
}

/// Browser wallet extension a user connected with.
///
/// Wire format: lowercase name (`"phantom"`, `"metamask"`). Parsing is
/// case-insensitive so `"MetaMask"` is accepted as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletKind {
    Phantom,
    MetaMask,
}

impl WalletKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Phantom => "phantom",
            Self::MetaMask => "metamask",
        }
    }

    pub fn chain(self) -> Chain {
        match self {
            Self::Phantom => Chain::Solana,
            Self::MetaMask => Chain::Ethereum,
        }
    }
}

impl fmt::Display for WalletKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported wallet type: {0}")]
pub struct UnsupportedWallet(pub String);

impl FromStr for WalletKind {
    type Err = UnsupportedWallet;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "phantom" => Ok(Self::Phantom),
            "metamask" => Ok(Self::MetaMask),
            _ => Err(UnsupportedWallet(s.to_owned())),
        }
    }
}
