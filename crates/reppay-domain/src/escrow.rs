//! Escrow ledger types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle of an escrow entry. The only transition is `Pending -> Claimed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscrowStatus {
    Pending,
    Claimed,
}

impl EscrowStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Claimed => "claimed",
        }
    }
}

impl fmt::Display for EscrowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown escrow status: {0}")]
pub struct UnknownEscrowStatus(pub String);

impl FromStr for EscrowStatus {
    type Err = UnknownEscrowStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "claimed" => Ok(Self::Claimed),
            _ => Err(UnknownEscrowStatus(s.to_owned())),
        }
    }
}

/// Number of decimals of a token currency, if it is one Reppay settles in.
pub fn token_decimals(currency: &str) -> Option<u32> {
    match currency.to_ascii_uppercase().as_str() {
        "USDC" => Some(6),
        _ => None,
    }
}
