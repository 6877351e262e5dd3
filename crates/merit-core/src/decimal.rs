//! Precision-safe decimal types.
//!
//! Uses `rust_decimal` for exact decimal arithmetic, avoiding
//! floating-point rounding errors in price and volume calculations.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, Sub};
use std::str::FromStr;

/// Unit price with exact decimal precision.
///
/// Wraps `Decimal` to provide type safety and prevent mixing
/// prices with amounts in calculations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(pub Decimal);

impl Price {
    pub const ZERO: Self = Self(Decimal::ZERO);
    pub const ONE: Self = Self(Decimal::ONE);

    #[inline]
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    #[inline]
    pub fn inner(&self) -> Decimal {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// Fractional change from a reference price: `(self - other) / other`.
    ///
    /// Returns None when the reference is zero or negative, since a
    /// fractional change off a non-positive base is meaningless.
    #[inline]
    pub fn change_from(&self, other: Price) -> Option<Decimal> {
        if !other.is_positive() {
            return None;
        }
        Some((self.0 - other.0) / other.0)
    }

    /// Percentage change from a reference price.
    #[inline]
    pub fn pct_from(&self, other: Price) -> Option<Decimal> {
        self.change_from(other).map(|c| c * Decimal::from(100))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Price {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl From<Decimal> for Price {
    fn from(d: Decimal) -> Self {
        Self(d)
    }
}

impl Sub for Price {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Mul<Decimal> for Price {
    type Output = Self;

    fn mul(self, rhs: Decimal) -> Self::Output {
        Self(self.0 * rhs)
    }
}

/// Token or settlement quantity with exact decimal precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(pub Decimal);

impl Amount {
    pub const ZERO: Self = Self(Decimal::ZERO);

    #[inline]
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    #[inline]
    pub fn inner(&self) -> Decimal {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// Round to a fixed number of decimal places.
    #[inline]
    pub fn round_dp(&self, dp: u32) -> Self {
        Self(self.0.round_dp(dp))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl From<Decimal> for Amount {
    fn from(d: Decimal) -> Self {
        Self(d)
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Mul<Decimal> for Amount {
    type Output = Self;

    fn mul(self, rhs: Decimal) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl Div<Price> for Amount {
    type Output = Self;

    /// Settlement amount divided by unit price yields a token amount.
    fn div(self, rhs: Price) -> Self::Output {
        Self(self.0 / rhs.0)
    }
}

impl Mul<Price> for Amount {
    type Output = Self;

    /// Token amount times unit price yields a settlement amount.
    fn mul(self, rhs: Price) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.map(|a| a.0).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_change_from() {
        let first = Price::new(dec!(0.01));
        let last = Price::new(dec!(0.02));
        assert_eq!(last.change_from(first), Some(dec!(1)));

        let dropped = Price::new(dec!(0.005));
        assert_eq!(dropped.change_from(first), Some(dec!(-0.5)));
    }

    #[test]
    fn test_change_from_non_positive_base() {
        let p = Price::new(dec!(1));
        assert_eq!(p.change_from(Price::ZERO), None);
        assert_eq!(p.change_from(Price::new(dec!(-1))), None);
    }

    #[test]
    fn test_pct_from() {
        let first = Price::new(dec!(100));
        let last = Price::new(dec!(150));
        assert_eq!(last.pct_from(first), Some(dec!(50)));
    }

    #[test]
    fn test_amount_sum() {
        let total: Amount = [dec!(1.5), dec!(2.5), dec!(3)]
            .into_iter()
            .map(Amount::new)
            .sum();
        assert_eq!(total, Amount::new(dec!(7)));
    }

    #[test]
    fn test_amount_price_arithmetic() {
        let settlement = Amount::new(dec!(99));
        let price = Price::new(dec!(0.5));
        assert_eq!(settlement / price, Amount::new(dec!(198)));

        let tokens = Amount::new(dec!(10));
        assert_eq!(tokens * price, Amount::new(dec!(5.0)));
    }
}
