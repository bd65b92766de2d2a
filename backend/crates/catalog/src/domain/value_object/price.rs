//! Price Value Object
//!
//! Non-negative amount with two decimals, bounded by the NUMERIC(10,2)
//! column it is stored in.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

/// 99,999,999.99
pub const PRICE_MAX: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PriceError {
    #[error("must be a number")]
    NotNumeric,
    #[error("must be at least 0")]
    Negative,
    #[error("must not be greater than 99999999.99")]
    TooLarge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Price(Decimal);

impl Price {
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        let amount = amount.round_dp(2);
        if amount > PRICE_MAX {
            return Err(PriceError::TooLarge);
        }
        Ok(Self(amount))
    }

    /// Parse a form value such as `"12"`, `"12.5"` or `"1e3"`
    pub fn parse(raw: &str) -> Result<Self, PriceError> {
        let raw = raw.trim();
        let amount = Decimal::from_str(raw)
            .or_else(|_| Decimal::from_scientific(raw))
            .map_err(|_| PriceError::NotNumeric)?;
        Self::new(amount)
    }

    pub fn from_db(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    /// Always two decimals: `12.50`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
