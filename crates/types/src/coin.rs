// Path: crates/types/src/coin.rs
//! Native coin amounts and the gas-price string format.
//!
//! Integer coin amounts travel as `"<digits><denom>"` and event attributes
//! may carry several, comma-separated. Gas prices use the same layout with a
//! decimal amount (`"0.025ulat"`) and must be strictly positive wherever the
//! construction workflow consumes them.

use crate::{GatewayError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An integer amount of a single denomination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    /// Base-10 unsigned integer string.
    pub amount: String,
}

impl Coin {
    pub fn new(amount: impl fmt::Display, denom: impl Into<String>) -> Self {
        Self { denom: denom.into(), amount: amount.to_string() }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

impl FromStr for Coin {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self> {
        let (amount, denom) = split_amount_denom(s)?;
        if amount.is_empty() || !amount.bytes().all(|b| b.is_ascii_digit()) {
            return Err(GatewayError::BadArgument(format!(
                "invalid coin amount in {s:?}"
            )));
        }
        validate_denom(denom)?;
        Ok(Coin { denom: denom.to_string(), amount: amount.to_string() })
    }
}

/// A decimal amount of a single denomination, as used by gas prices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecCoin {
    pub denom: String,
    pub amount: Decimal,
}

impl DecCoin {
    /// Whether the amount is strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }
}

impl fmt::Display for DecCoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

impl FromStr for DecCoin {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self> {
        let (amount, denom) = split_amount_denom(s)?;
        let amount = Decimal::from_str(amount).map_err(|e| {
            GatewayError::BadArgument(format!("invalid decimal amount in {s:?}: {e}"))
        })?;
        if amount.is_sign_negative() {
            return Err(GatewayError::BadArgument(format!(
                "negative amount in {s:?}"
            )));
        }
        validate_denom(denom)?;
        Ok(DecCoin { denom: denom.to_string(), amount })
    }
}

/// Parses a comma-separated coin list, as found in balance-event attributes
/// (`"100ulat,3stake"`).
pub fn parse_coin_list(s: &str) -> Result<Vec<Coin>> {
    if s.is_empty() {
        return Ok(Vec::new());
    }
    s.split(',').map(str::trim).map(Coin::from_str).collect()
}

/// Parses a comma-separated decimal-coin list (`"0.025ulat,1stake"`), the
/// shape of the configured fee-suggestion price table.
pub fn parse_dec_coin_list(s: &str) -> Result<Vec<DecCoin>> {
    if s.is_empty() {
        return Ok(Vec::new());
    }
    s.split(',').map(str::trim).map(DecCoin::from_str).collect()
}

/// Splits `"<amount><denom>"` at the first character that can no longer be
/// part of a number.
fn split_amount_denom(s: &str) -> Result<(&str, &str)> {
    let split = s
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .ok_or_else(|| GatewayError::BadArgument(format!("missing denom in {s:?}")))?;
    Ok(s.split_at(split))
}

/// Denominations are lowercase, start with a letter, and may contain digits
/// and path separators (`ibc/...`-style routed denoms).
fn validate_denom(denom: &str) -> Result<()> {
    let mut chars = denom.chars();
    let valid = matches!(chars.next(), Some(c) if c.is_ascii_lowercase())
        && denom.len() >= 3
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '/');
    if !valid {
        return Err(GatewayError::BadArgument(format!("invalid denom {denom:?}")));
    }
    Ok(())
}
