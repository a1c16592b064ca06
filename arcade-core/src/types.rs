use crate::error::{ArcadeError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account or contract address, `0x` followed by 40 hex digits.
///
/// Stored lowercase so that checksummed and plain spellings compare equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    pub const HEX_LEN: usize = 40;

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `0x1234...abcd`, the short form shown next to a connected account.
    pub fn shorten(&self) -> String {
        let hex = &self.0[2..];
        format!("0x{}...{}", &hex[..4], &hex[hex.len() - 4..])
    }

    pub fn from_bytes(bytes: &[u8; 20]) -> Self {
        Self(format!("0x{}", hex::encode(bytes)))
    }
}

impl FromStr for Address {
    type Err = ArcadeError;

    fn from_str(s: &str) -> Result<Self> {
        let hex = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or_else(|| ArcadeError::InvalidAddress(format!("missing 0x prefix: {}", s)))?;

        if hex.len() != Self::HEX_LEN {
            return Err(ArcadeError::InvalidAddress(format!(
                "expected {} hex digits, got {}: {}",
                Self::HEX_LEN,
                hex.len(),
                s
            )));
        }

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ArcadeError::InvalidAddress(format!(
                "non-hex character in {}",
                s
            )));
        }

        Ok(Self(format!("0x{}", hex.to_ascii_lowercase())))
    }
}

impl TryFrom<String> for Address {
    type Error = ArcadeError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Token quantity in the token's smallest unit.
///
/// Serialized as a decimal string, JSON numbers cannot carry the full `u128` range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TokenAmount(u128);

impl TokenAmount {
    pub const ZERO: TokenAmount = TokenAmount(0);

    /// Largest decimals value whose unit still fits in a `u128`.
    pub const MAX_DECIMALS: u8 = 38;

    pub const fn from_raw(raw: u128) -> Self {
        Self(raw)
    }

    pub fn from_tokens(whole: u64, decimals: u8) -> Result<Self> {
        let unit = unit(decimals)?;
        (whole as u128)
            .checked_mul(unit)
            .map(Self)
            .ok_or_else(|| ArcadeError::InvalidAmount(format!("{} tokens overflows", whole)))
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: TokenAmount) -> Option<TokenAmount> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Human readable value with trailing fractional zeros trimmed (`10`, `1.5`).
    pub fn display(&self, decimals: u8) -> String {
        let Ok(unit) = unit(decimals) else {
            return self.0.to_string();
        };

        let whole = self.0 / unit;
        let frac = self.0 % unit;
        if frac == 0 {
            return whole.to_string();
        }

        let frac = format!("{:0width$}", frac, width = decimals as usize);
        format!("{}.{}", whole, frac.trim_end_matches('0'))
    }
}

fn unit(decimals: u8) -> Result<u128> {
    if decimals > TokenAmount::MAX_DECIMALS {
        return Err(ArcadeError::InvalidAmount(format!(
            "decimals must be at most {}, got {}",
            TokenAmount::MAX_DECIMALS,
            decimals
        )));
    }
    Ok(10u128.pow(decimals as u32))
}

impl TryFrom<String> for TokenAmount {
    type Error = ArcadeError;

    fn try_from(value: String) -> Result<Self> {
        value
            .parse::<u128>()
            .map(Self)
            .map_err(|e| ArcadeError::InvalidAmount(format!("{}: {}", value, e)))
    }
}

impl From<TokenAmount> for String {
    fn from(amount: TokenAmount) -> Self {
        amount.0.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBalance {
    pub amount: TokenAmount,
    pub decimals: u8,
    pub symbol: String,
}

impl TokenBalance {
    pub fn new(amount: TokenAmount, decimals: u8, symbol: impl Into<String>) -> Self {
        Self {
            amount,
            decimals,
            symbol: symbol.into(),
        }
    }

    pub fn display_value(&self) -> String {
        self.amount.display(self.decimals)
    }
}

impl fmt::Display for TokenBalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.display_value(), self.symbol)
    }
}

/// Result of a successful prize claim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimReceipt {
    pub tx_hash: String,
    pub account: Address,
    pub contract: Address,
    pub amount: TokenAmount,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTRACT: &str = "0x4ad1AD500e76bEAb7e332cD8692E8BFF0862CdC9";

    #[test]
    fn test_address_parse_normalizes_case() {
        let address: Address = CONTRACT.parse().unwrap();
        assert_eq!(address.as_str(), "0x4ad1ad500e76beab7e332cd8692e8bff0862cdc9");
        assert_eq!(address, CONTRACT.to_lowercase().parse().unwrap());
    }

    #[test]
    fn test_address_rejects_malformed() {
        assert!("4ad1AD500e76bEAb7e332cD8692E8BFF0862CdC9".parse::<Address>().is_err());
        assert!("0x1234".parse::<Address>().is_err());
        assert!("0xzzd1AD500e76bEAb7e332cD8692E8BFF0862CdC9".parse::<Address>().is_err());
    }

    #[test]
    fn test_address_shorten() {
        let address: Address = CONTRACT.parse().unwrap();
        assert_eq!(address.shorten(), "0x4ad1...cdc9");
    }

    #[test]
    fn test_address_serde_roundtrip_validates() {
        let address: Address = CONTRACT.parse().unwrap();
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, "\"0x4ad1ad500e76beab7e332cd8692e8bff0862cdc9\"");
        assert!(serde_json::from_str::<Address>("\"0xnothex\"").is_err());
    }

    #[test]
    fn test_token_amount_display() {
        let ten = TokenAmount::from_tokens(10, 18).unwrap();
        assert_eq!(ten.raw(), 10_000_000_000_000_000_000);
        assert_eq!(ten.display(18), "10");

        let one_and_half = TokenAmount::from_raw(1_500_000_000_000_000_000);
        assert_eq!(one_and_half.display(18), "1.5");

        assert_eq!(TokenAmount::from_raw(1).display(18), "0.000000000000000001");
        assert_eq!(TokenAmount::ZERO.display(18), "0");
        assert_eq!(TokenAmount::from_raw(42).display(0), "42");
    }

    #[test]
    fn test_token_amount_rejects_excess_decimals() {
        assert!(TokenAmount::from_tokens(1, 39).is_err());
        assert!(TokenAmount::from_tokens(u64::MAX, 38).is_err());
    }

    #[test]
    fn test_token_amount_serializes_as_string() {
        let amount = TokenAmount::from_raw(u128::MAX);
        let json = serde_json::to_string(&amount).unwrap();
        assert_eq!(json, format!("\"{}\"", u128::MAX));
        assert_eq!(serde_json::from_str::<TokenAmount>(&json).unwrap(), amount);
    }

    #[test]
    fn test_balance_display() {
        let balance = TokenBalance::new(TokenAmount::from_tokens(20, 18).unwrap(), 18, "BGZ");
        assert_eq!(balance.to_string(), "20 BGZ");
    }
}
