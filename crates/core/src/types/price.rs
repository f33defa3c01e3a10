//! Type-safe price representation using decimal arithmetic.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// A monetary amount in the store's display currency.
///
/// Malisek quotes everything in a single currency, so the wrapper carries
/// the decimal amount only. [`fmt::Display`] renders two fraction digits
/// with a leading `$` (e.g. `$19.99`).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Largest representable amount.
    pub const MAX: Self = Self(Decimal::MAX);

    /// Create a new price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from whole currency units (e.g. dollars).
    #[must_use]
    pub fn from_major(units: i64) -> Self {
        Self(Decimal::from(units))
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether the amount is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Percentage saved when this price is discounted down to `sale`,
    /// rounded to the nearest whole percent.
    ///
    /// Returns `None` when this price is zero, negative, or not greater
    /// than `sale`.
    #[must_use]
    pub fn percent_off(&self, sale: Self) -> Option<u32> {
        if self.0 <= Decimal::ZERO || self.0 <= sale.0 {
            return None;
        }
        let fraction = (self.0 - sale.0) / self.0 * Decimal::from(100);
        fraction.round().to_u32()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_two_fraction_digits() {
        assert_eq!(Price::from_major(1199).to_string(), "$1199.00");
        assert_eq!(
            Price::new(Decimal::new(1050, 2)).to_string(),
            "$10.50"
        );
        assert_eq!(Price::ZERO.to_string(), "$0.00");
    }

    #[test]
    fn test_percent_off_rounds_to_nearest() {
        // 1299 -> 1199 saves 7.698%, rounded to 8
        let original = Price::from_major(1299);
        let sale = Price::from_major(1199);
        assert_eq!(original.percent_off(sale), Some(8));

        // 249 -> 199 saves 20.08%, rounded to 20
        assert_eq!(
            Price::from_major(249).percent_off(Price::from_major(199)),
            Some(20)
        );
    }

    #[test]
    fn test_percent_off_requires_real_discount() {
        let price = Price::from_major(100);
        assert_eq!(price.percent_off(price), None);
        assert_eq!(price.percent_off(Price::from_major(150)), None);
        assert_eq!(Price::ZERO.percent_off(Price::ZERO), None);
    }

    #[test]
    fn test_arithmetic() {
        let subtotal: Price = [Price::from_major(10) * 2, Price::from_major(5) * 3]
            .into_iter()
            .sum();
        assert_eq!(subtotal, Price::from_major(35));

        let mut running = Price::from_major(1);
        running += Price::from_major(2);
        assert_eq!(running, Price::from_major(3));
    }

    #[test]
    fn test_ordering() {
        assert!(Price::from_major(100) < Price::from_major(500));
        assert!(Price::new(Decimal::from(-1)).is_negative());
        assert!(!Price::ZERO.is_negative());
    }
}
