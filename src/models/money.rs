//! Money type for representing currency amounts
//!
//! Amounts are stored as signed integers in minor currency units (tiyn,
//! cents, ...). There is no floating point anywhere in the arithmetic.
//! Arithmetic saturates at the `i64` bounds, so `abs` of the most negative
//! amount is `i64::MAX` rather than an overflow.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A monetary amount in minor currency units
///
/// Positive amounts are income, negative amounts are expenses.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from minor units
    ///
    /// # Examples
    /// ```
    /// use finance_manager::models::Money;
    /// let amount = Money::from_minor(-1500);
    /// assert!(amount.is_negative());
    /// ```
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in minor units
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive (income)
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative (expense)
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value, saturating at `i64::MAX`
    pub const fn abs(&self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Format with a trailing currency code, e.g. "-1500 KZT"
    pub fn format_with_code(&self, code: &str) -> String {
        format!("{} {}", self.0, code)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for Money {
    fn from(minor: i64) -> Self {
        Self(minor)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic() {
        let a = Money::from_minor(1000);
        let b = Money::from_minor(300);

        assert_eq!((a + b).minor(), 1300);
        assert_eq!((a - b).minor(), 700);
        assert_eq!((-a).minor(), -1000);
        assert_eq!(Money::from_minor(-250).abs().minor(), 250);
    }

    #[test]
    fn test_extreme_amounts_saturate() {
        let min = Money::from_minor(i64::MIN);
        assert_eq!(min.abs().minor(), i64::MAX);
        assert_eq!((-min).minor(), i64::MAX);
        assert_eq!((min + Money::from_minor(-1)).minor(), i64::MIN);

        let total: Money = [i64::MIN, i64::MIN].into_iter().map(Money::from_minor).sum();
        assert_eq!(total.minor(), i64::MIN);
    }

    #[test]
    fn test_sign_checks() {
        assert!(Money::zero().is_zero());
        assert!(Money::from_minor(5000).is_positive());
        assert!(Money::from_minor(-1).is_negative());
    }

    #[test]
    fn test_sum() {
        let total: Money = [-300, -700, -200]
            .into_iter()
            .map(Money::from_minor)
            .sum();
        assert_eq!(total.minor(), -1200);
    }

    #[test]
    fn test_format_with_code() {
        assert_eq!(Money::from_minor(-1500).format_with_code("KZT"), "-1500 KZT");
        assert_eq!(Money::from_minor(42).to_string(), "42");
    }

    #[test]
    fn test_serialization_is_a_bare_integer() {
        let json = serde_json::to_string(&Money::from_minor(-300)).unwrap();
        assert_eq!(json, "-300");
    }
}
