//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are currency-agnostic amounts in the store's standard unit
//! (dollars, not cents). They are never negative: the constructor rejects
//! negative amounts and deserialization goes through the same check.
//!
//! Arithmetic saturates at [`Price::MAX`] instead of overflowing.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Errors that can occur when building a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative: {0}")]
    Negative(Decimal),
    /// The input is not a decimal number.
    #[error("invalid price: {0}")]
    Invalid(String),
}

/// A non-negative monetary amount.
///
/// Serialized as a decimal string (`"24.50"`) so that no precision is lost
/// when state is persisted.
///
/// ## Examples
///
/// ```
/// use handcraft_core::Price;
///
/// let mug = Price::from_cents(2450);
/// let glaze = Price::from_cents(500);
///
/// assert_eq!((mug + glaze).to_string(), "$29.50");
/// assert_eq!(mug.times(3).to_string(), "$73.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// A zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// The largest representable amount.
    pub const MAX: Self = Self(Decimal::MAX);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Create a price from a whole number of cents.
    #[must_use]
    pub fn from_cents(cents: u32) -> Self {
        Self(Decimal::new(i64::from(cents), 2))
    }

    /// Parse a price from a decimal string such as `"19.99"`.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a decimal or is negative.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let amount = s
            .trim()
            .parse::<Decimal>()
            .map_err(|_| PriceError::Invalid(s.to_owned()))?;
        Self::new(amount)
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether the amount is exactly zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Multiply by a quantity, saturating at [`Price::MAX`].
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        self.0
            .checked_mul(Decimal::from(quantity))
            .map_or(Self::MAX, Self)
    }

    /// Add two prices, saturating at [`Price::MAX`].
    #[must_use]
    pub fn saturating_add(self, rhs: Self) -> Self {
        self.0.checked_add(rhs.0).map_or(Self::MAX, Self)
    }

    /// Apply a non-negative rate (e.g. a tax rate of `0.08`), rounding half
    /// away from zero to whole cents.
    ///
    /// Negative rates yield zero.
    #[must_use]
    pub fn apply_rate(self, rate: Decimal) -> Self {
        if rate.is_sign_negative() {
            return Self::ZERO;
        }
        self.0.checked_mul(rate).map_or(Self::MAX, |amount| {
            Self(amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        })
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        write!(f, "${rounded:.2}")
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.saturating_add(rhs)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Self> for Price {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl std::str::FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        assert_eq!(Price::from_cents(1999).amount(), Decimal::new(1999, 2));
        assert!(Price::from_cents(0).is_zero());
    }

    #[test]
    fn test_rejects_negative() {
        assert!(matches!(
            Price::new(Decimal::new(-1, 0)),
            Err(PriceError::Negative(_))
        ));
        assert!(Price::parse("-3.00").is_err());
        assert!(Price::parse("abc").is_err());
    }

    #[test]
    fn test_display_pads_to_cents() {
        assert_eq!(Price::parse("10").unwrap().to_string(), "$10.00");
        assert_eq!(Price::parse("4.5").unwrap().to_string(), "$4.50");
    }

    #[test]
    fn test_sum_and_times() {
        let prices = [Price::from_cents(1000), Price::from_cents(250)];
        assert_eq!(prices.iter().sum::<Price>(), Price::from_cents(1250));
        assert_eq!(Price::from_cents(1000).times(2), Price::from_cents(2000));
        assert_eq!(Price::from_cents(1000).times(0), Price::ZERO);
    }

    #[test]
    fn test_arithmetic_saturates_at_max() {
        assert_eq!(Price::MAX.times(2), Price::MAX);
        assert_eq!(Price::MAX + Price::from_cents(1), Price::MAX);
        assert_eq!([Price::MAX, Price::MAX].iter().sum::<Price>(), Price::MAX);
        assert_eq!(Price::MAX.apply_rate(Decimal::new(2, 0)), Price::MAX);
        assert_eq!(Price::MAX.times(1), Price::MAX);
    }

    #[test]
    fn test_apply_rate_rounds_to_cents() {
        // 8% of $12.99 = 1.0392
        let tax = Price::from_cents(1299).apply_rate(Decimal::new(8, 2));
        assert_eq!(tax, Price::from_cents(104));
        assert_eq!(
            Price::from_cents(1000).apply_rate(Decimal::new(-1, 1)),
            Price::ZERO
        );
    }

    #[test]
    fn test_serde_uses_decimal_string() {
        let price = Price::from_cents(2450);
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "\"24.50\"");

        let back: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(back, price);

        assert!(serde_json::from_str::<Price>("\"-1.00\"").is_err());
    }
}
