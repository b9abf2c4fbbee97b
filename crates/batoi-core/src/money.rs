//! # Money Module
//!
//! Provides the `Money` type for book prices and cart totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing prices as floats:                                              │
//! │    19.99 + 5.01 = 25.000000000000004                                    │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    1999 + 501 = 2500 cents → "25.00"                                    │
//! │                                                                         │
//! │  The remote service speaks decimal numbers; conversion happens once,   │
//! │  at the serde boundary.                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use batoi_core::money::Money;
//!
//! let price: Money = "19.99".parse().unwrap();
//! assert_eq!(price.cents(), 1999);
//!
//! let total: Money = [price, Money::from_cents(501)].into_iter().sum();
//! assert_eq!(total.to_string(), "25.00");
//! ```

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::CoreError;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents.
///
/// ## Wire Format
/// Serialized as a decimal JSON number (`19.99`), the shape the books
/// service stores. Deserializes from a number or a numeric string, since
/// form-sourced records sometimes carry the price as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, TS)]
#[ts(export)]
pub struct Money(#[ts(type = "number")] i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a decimal amount to cents.
    ///
    /// Amounts finer than a cent are rejected rather than rounded. NaN,
    /// infinities and values outside the i64 range are invalid.
    ///
    /// ```rust
    /// use batoi_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(19.99).unwrap().cents(), 1999);
    /// assert!(Money::from_decimal(10.555).is_err());
    /// assert!(Money::from_decimal(f64::NAN).is_err());
    /// ```
    pub fn from_decimal(amount: f64) -> Result<Self, CoreError> {
        if !amount.is_finite() {
            return Err(CoreError::InvalidPrice(amount.to_string()));
        }
        let scaled = amount * 100.0;
        let cents = scaled.round();
        if cents < i64::MIN as f64 || cents > i64::MAX as f64 {
            return Err(CoreError::InvalidPrice(amount.to_string()));
        }
        // Binary floats put 19.99 at 1998.9999999999998 cents; anything
        // further off than a few ulps carries a real fraction of a cent.
        let tolerance = scaled.abs().max(1.0) * 8.0 * f64::EPSILON;
        if (scaled - cents).abs() > tolerance {
            return Err(CoreError::SubCentPrice(amount.to_string()));
        }
        Ok(Money(cents as i64))
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the value as a decimal amount (for the wire only).
    #[inline]
    pub fn as_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Formats with a trailing euro sign, as the catalog views show prices.
    ///
    /// ```rust
    /// use batoi_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1250).format_eur(), "12.50 €");
    /// ```
    pub fn format_eur(&self) -> String {
        format!("{} €", self)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Two-decimal rendering without a currency symbol (`"25.00"`).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl FromStr for Money {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let amount: f64 = trimmed
            .parse()
            .map_err(|_| CoreError::InvalidPrice(s.to_string()))?;
        Money::from_decimal(amount).map_err(|err| match err {
            CoreError::SubCentPrice(_) => CoreError::SubCentPrice(trimmed.to_string()),
            _ => CoreError::InvalidPrice(s.to_string()),
        })
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Serde
// =============================================================================

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_decimal())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal amount as a number or numeric string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        v.checked_mul(100)
            .map(Money)
            .ok_or_else(|| E::custom(format!("amount out of range: {}", v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        i64::try_from(v)
            .ok()
            .and_then(|v| v.checked_mul(100))
            .map(Money)
            .ok_or_else(|| E::custom(format!("amount out of range: {}", v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        Money::from_decimal(v).map_err(E::custom)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
        v.parse().map_err(E::custom)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(2500).to_string(), "25.00");
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_parse() {
        assert_eq!("19.99".parse::<Money>().unwrap().cents(), 1999);
        assert_eq!(" 5 ".parse::<Money>().unwrap().cents(), 500);
        assert_eq!("0.1".parse::<Money>().unwrap().cents(), 10);
        assert!("abc".parse::<Money>().is_err());
        assert!("".parse::<Money>().is_err());
    }

    #[test]
    fn test_sum_is_exact() {
        let total: Money = [Money::from_cents(1999), Money::from_cents(501)]
            .iter()
            .sum();
        assert_eq!(total.cents(), 2500);
        assert_eq!(total.to_string(), "25.00");
    }

    #[test]
    fn test_deserialize_number_and_string() {
        let from_float: Money = serde_json::from_str("19.99").unwrap();
        let from_int: Money = serde_json::from_str("20").unwrap();
        let from_text: Money = serde_json::from_str("\"5.01\"").unwrap();

        assert_eq!(from_float.cents(), 1999);
        assert_eq!(from_int.cents(), 2000);
        assert_eq!(from_text.cents(), 501);
        assert!(serde_json::from_str::<Money>("\"free\"").is_err());
    }

    #[test]
    fn test_sub_cent_amounts_are_rejected() {
        assert!(matches!(
            "10.555".parse::<Money>(),
            Err(CoreError::SubCentPrice(_))
        ));
        assert_eq!("10.550".parse::<Money>().unwrap().cents(), 1055);
        assert!(serde_json::from_str::<Money>("10.555").is_err());
        assert!(serde_json::from_str::<Money>("0.004").is_err());
        assert!(serde_json::from_str::<Money>("\"0.004\"").is_err());
    }

    #[test]
    fn test_float_noise_is_not_sub_cent() {
        let cases = [
            ("19.99", 1999),
            ("0.29", 29),
            ("0.1", 10),
            ("1234567.89", 123456789),
        ];
        for (text, cents) in cases {
            let from_wire: Money = serde_json::from_str(text).unwrap();
            assert_eq!(from_wire.cents(), cents, "{}", text);
        }
    }

    #[test]
    fn test_sum_saturates_instead_of_overflowing() {
        let total: Money = [Money::from_cents(i64::MAX), Money::from_cents(1)]
            .into_iter()
            .sum();
        assert_eq!(total.cents(), i64::MAX);

        let mut acc = Money::from_cents(i64::MAX - 1);
        acc += Money::from_cents(5);
        assert_eq!(acc.cents(), i64::MAX);
    }

    #[test]
    fn test_serializes_as_decimal_number() {
        let json = serde_json::to_string(&Money::from_cents(1999)).unwrap();
        assert_eq!(json, "19.99");
    }

    #[test]
    fn test_format_eur() {
        assert_eq!(Money::from_cents(2500).format_eur(), "25.00 €");
    }
}
