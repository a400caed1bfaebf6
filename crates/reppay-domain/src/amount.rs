//! Decimal amounts as entered by sponsors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A strictly positive decimal amount kept in its original string form.
///
/// Accepted: ASCII digits with an optional single fractional part
/// (`"10"`, `"0.5"`, `"12.000001"`). Rejected: signs, exponents, empty
/// parts (`"1."`, `".5"`) and zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Amount(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid amount: {0}")]
pub struct InvalidAmount(pub String);

impl Amount {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to the token's smallest unit, truncating digits beyond
    /// `decimals`. Returns `None` on overflow.
    pub fn to_base_units(&self, decimals: u32) -> Option<u64> {
        let (whole, frac) = self.0.split_once('.').unwrap_or((&self.0, ""));
        let scale = 10u64.checked_pow(decimals)?;
        let whole: u64 = whole.parse().ok()?;
        let mut frac_units = 0u64;
        for (i, digit) in frac.bytes().take(decimals as usize).enumerate() {
            let place = 10u64.checked_pow(decimals - 1 - i as u32)?;
            frac_units += u64::from(digit - b'0') * place;
        }
        whole.checked_mul(scale)?.checked_add(frac_units)
    }
}

impl FromStr for Amount {
    type Err = InvalidAmount;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || InvalidAmount(s.to_owned());
        let (whole, frac) = match s.split_once('.') {
            Some((_, "")) => return Err(invalid()),
            Some((whole, frac)) => (whole, frac),
            None => (s, ""),
        };
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() || !all_digits(whole) || !all_digits(frac) {
            return Err(invalid());
        }
        if whole.bytes().chain(frac.bytes()).all(|b| b == b'0') {
            return Err(invalid());
        }
        Ok(Self(s.to_owned()))
    }
}

impl TryFrom<String> for Amount {
    type Error = InvalidAmount;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Amount> for String {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
