//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    100 × 0.29 = 28.999999999999996  → floor = 28  ❌ WRONG!             │
//! │                                                                         │
//! │  Prices arrive as arbitrary JSON numbers (9.99, 100, 0.5), so integer   │
//! │  cents cannot hold every input either.                                  │
//! │                                                                         │
//! │  OUR SOLUTION: Base-10 Decimal                                          │
//! │    100 × 0.29 = 29.00 exactly → floor = 29                              │
//! │    Truncation happens only where pricing rules ask for it              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use checkout_core::money::Money;
//! use checkout_core::types::Rate;
//!
//! let subtotal = Money::from_major(199);
//! let discount = subtotal.apply_rate_floor(Rate::from_bps(500)); // 5%
//! assert_eq!(discount, Money::from_major(9));
//! ```

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::ser::Error as _;
use serde::{Serialize, Serializer};

use crate::types::Rate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in major currency units (dollars for USD).
///
/// ## Design Decisions
/// - **Decimal (signed)**: exact base-10 arithmetic, fractions allowed
/// - **Single field tuple struct**: zero-cost wrapper over `Decimal`
/// - **Serialized as a JSON number**: integers when whole, floats otherwise
///
/// ## Where Money is Used
/// ```text
/// LineItem.price ──► line total ──► subtotal ──► discount
///                                      │             │
///                                      ▼             ▼
///                             max(0, subtotal − discount) ──► tax ──► total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(Decimal);

impl Money {
    /// Zero money value.
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Creates a Money value from a whole number of major units.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// let price = Money::from_major(100);
    /// assert_eq!(price.to_string(), "100");
    /// ```
    #[inline]
    pub fn from_major(units: i64) -> Self {
        Money(Decimal::from(units))
    }

    /// Wraps an exact decimal amount.
    #[inline]
    pub const fn from_decimal(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Converts a JSON number into Money.
    ///
    /// Integers convert exactly. Floats go through their shortest decimal
    /// representation, so `9.99` becomes exactly `9.99`.
    ///
    /// ## Returns
    /// `None` when the number does not fit the decimal range.
    pub fn from_json_number(number: &serde_json::Number) -> Option<Self> {
        if let Some(i) = number.as_i64() {
            return Some(Money(Decimal::from(i)));
        }
        if let Some(u) = number.as_u64() {
            return Some(Money(Decimal::from(u)));
        }
        // serde_json prints floats in shortest form, e.g. "9.99" or "1e-7"
        let text = number.to_string();
        Decimal::from_str(&text)
            .or_else(|_| Decimal::from_scientific(&text))
            .ok()
            .map(Money)
    }

    /// Returns the underlying decimal amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money::ZERO
    }

    /// Checks if the value is strictly greater than zero.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is strictly less than zero.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Checks if the value has no fractional part.
    #[inline]
    pub fn is_whole(&self) -> bool {
        self.0.fract().is_zero()
    }

    /// Returns the value as a count when it is a whole, non-negative number.
    pub fn to_whole_count(&self) -> Option<u64> {
        if self.is_whole() {
            self.0.to_u64()
        } else {
            None
        }
    }

    /// Multiplies by a quantity, returning `None` on decimal overflow.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// let line = Money::from_major(100).checked_mul_quantity(2).unwrap();
    /// assert_eq!(line, Money::from_major(200));
    /// ```
    #[inline]
    pub fn checked_mul_quantity(&self, qty: u64) -> Option<Money> {
        self.0.checked_mul(Decimal::from(qty)).map(Money)
    }

    /// Adds two amounts, returning `None` on decimal overflow.
    #[inline]
    pub fn checked_add(&self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Applies a rate and truncates the result to whole units.
    ///
    /// ## Floor, Not Rounding
    /// ```text
    /// 199 × 5%  =  9.95  →  9
    /// 180 × 21% = 37.80  → 37
    /// ```
    /// The pricing rules truncate discounts and taxes; nothing here rounds.
    /// Callers only pass non-negative amounts, where floor and truncation
    /// agree.
    pub fn apply_rate_floor(&self, rate: Rate) -> Money {
        Money((self.0 * rate.as_fraction()).floor())
    }

    /// Clamps negative amounts to zero.
    #[inline]
    pub fn clamp_non_negative(self) -> Money {
        if self.is_negative() {
            Money::ZERO
        } else {
            self
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the normalized decimal: `200`, `9.99`, `0.5`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

/// Whole amounts serialize as JSON integers, fractional ones as floats.
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let normalized = self.0.normalize();
        if normalized.scale() == 0 {
            if let Some(whole) = normalized.to_i64() {
                return serializer.serialize_i64(whole);
            }
        }
        match normalized.to_f64() {
            Some(value) => serializer.serialize_f64(value),
            None => Err(S::Error::custom(format!("amount {normalized} is not representable"))),
        }
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_display_is_normalized() {
        assert_eq!(Money::from_major(200).to_string(), "200");
        assert_eq!(Money::from_decimal(dec!(9.990)).to_string(), "9.99");
        assert_eq!(Money::from_decimal(dec!(37.00)).to_string(), "37");
        assert_eq!(Money::zero().to_string(), "0");
    }

    #[test]
    fn test_from_json_number() {
        let n = |v: serde_json::Value| match v {
            serde_json::Value::Number(number) => number,
            other => panic!("not a number: {other}"),
        };

        assert_eq!(Money::from_json_number(&n(json!(100))), Some(Money::from_major(100)));
        assert_eq!(
            Money::from_json_number(&n(json!(9.99))),
            Some(Money::from_decimal(dec!(9.99)))
        );
        assert_eq!(
            Money::from_json_number(&n(json!(u64::MAX))),
            Some(Money::from_decimal(Decimal::from(u64::MAX)))
        );
        assert_eq!(Money::from_json_number(&n(json!(1e300))), None);
    }

    #[test]
    fn test_apply_rate_floor_truncates() {
        let rate = Rate::from_bps(500); // 5%
        assert_eq!(Money::from_major(199).apply_rate_floor(rate), Money::from_major(9));

        let tax = Rate::from_bps(2100); // 21%
        assert_eq!(Money::from_major(180).apply_rate_floor(tax), Money::from_major(37));
    }

    #[test]
    fn test_apply_rate_floor_is_exact() {
        // Float math gives 28.999999999999996 here.
        let rate = Rate::from_bps(2900);
        assert_eq!(Money::from_major(100).apply_rate_floor(rate), Money::from_major(29));
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_major(10);
        let b = Money::from_major(4);

        assert_eq!(a + b, Money::from_major(14));
        assert_eq!(a - b, Money::from_major(6));
        assert_eq!(b - a, Money::from_major(-6));
        assert_eq!(vec![a, b, b].into_iter().sum::<Money>(), Money::from_major(18));
    }

    #[test]
    fn test_clamp_non_negative() {
        assert_eq!(Money::from_major(-6).clamp_non_negative(), Money::ZERO);
        assert_eq!(Money::from_major(6).clamp_non_negative(), Money::from_major(6));
    }

    #[test]
    fn test_checked_overflow() {
        let max = Money::from_decimal(Decimal::MAX);
        assert!(max.checked_mul_quantity(2).is_none());
        assert!(max.checked_add(Money::from_major(1)).is_none());
        assert_eq!(
            Money::from_major(3).checked_mul_quantity(4),
            Some(Money::from_major(12))
        );
    }

    #[test]
    fn test_whole_count() {
        assert_eq!(Money::from_major(3).to_whole_count(), Some(3));
        assert_eq!(Money::from_decimal(dec!(3.0)).to_whole_count(), Some(3));
        assert_eq!(Money::from_decimal(dec!(2.5)).to_whole_count(), None);
    }

    #[test]
    fn test_serializes_as_number() {
        assert_eq!(serde_json::to_value(Money::from_major(217)).unwrap(), json!(217));
        assert_eq!(
            serde_json::to_value(Money::from_decimal(dec!(19.980))).unwrap(),
            json!(19.98)
        );
    }
}
