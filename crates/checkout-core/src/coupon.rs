//! # Coupon Registry
//!
//! The fixed set of coupon codes and the rule each one applies.
//!
//! ## Registry
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Code     Rule            Parameters                                    │
//! │  ───────  ──────────────  ────────────────────────────────────────────  │
//! │  SAVE10   FlatPercent     rate 10%                                      │
//! │  SAVE20   TieredPercent   5% below 200, 20% from 200                    │
//! │  VIP      TieredFlat      10 below 100, 50 from 100                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The table is built once on first use and never mutated, so any number of
//! threads may read it without locking.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::Serialize;

use crate::money::Money;
use crate::types::Rate;

// =============================================================================
// Coupon Rule
// =============================================================================

/// How a coupon turns a subtotal into a discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CouponRule {
    /// `floor(subtotal × rate)`.
    FlatPercent { rate: Rate },

    /// `floor(subtotal × bonus_rate)` once `subtotal ≥ threshold`,
    /// `floor(subtotal × base_rate)` below it.
    TieredPercent {
        base_rate: Rate,
        threshold: Money,
        bonus_rate: Rate,
    },

    /// A fixed amount: `bonus_amount` once `subtotal ≥ threshold`,
    /// `base_amount` below it. Not scaled by the subtotal.
    TieredFlat {
        base_amount: Money,
        threshold: Money,
        bonus_amount: Money,
    },
}

impl CouponRule {
    /// Discount this rule grants on `subtotal`.
    ///
    /// The result may exceed the subtotal for flat rules; the checkout
    /// clamps the discounted amount, not the discount.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::coupon;
    /// use checkout_core::money::Money;
    ///
    /// let vip = coupon::lookup("VIP").unwrap();
    /// assert_eq!(vip.discount_for(Money::from_major(99)), Money::from_major(10));
    /// assert_eq!(vip.discount_for(Money::from_major(100)), Money::from_major(50));
    /// ```
    pub fn discount_for(&self, subtotal: Money) -> Money {
        match *self {
            CouponRule::FlatPercent { rate } => subtotal.apply_rate_floor(rate),
            CouponRule::TieredPercent {
                base_rate,
                threshold,
                bonus_rate,
            } => {
                if subtotal >= threshold {
                    subtotal.apply_rate_floor(bonus_rate)
                } else {
                    subtotal.apply_rate_floor(base_rate)
                }
            }
            CouponRule::TieredFlat {
                base_amount,
                threshold,
                bonus_amount,
            } => {
                if subtotal >= threshold {
                    bonus_amount
                } else {
                    base_amount
                }
            }
        }
    }
}

// =============================================================================
// Static Registry
// =============================================================================

static COUPONS: LazyLock<BTreeMap<&'static str, CouponRule>> = LazyLock::new(|| {
    BTreeMap::from([
        (
            "SAVE10",
            CouponRule::FlatPercent {
                rate: Rate::from_bps(1000),
            },
        ),
        (
            "SAVE20",
            CouponRule::TieredPercent {
                base_rate: Rate::from_bps(500),
                threshold: Money::from_major(200),
                bonus_rate: Rate::from_bps(2000),
            },
        ),
        (
            "VIP",
            CouponRule::TieredFlat {
                base_amount: Money::from_major(10),
                threshold: Money::from_major(100),
                bonus_amount: Money::from_major(50),
            },
        ),
    ])
});

/// Looks up a coupon code. Matching is exact and case-sensitive.
pub fn lookup(code: &str) -> Option<&'static CouponRule> {
    COUPONS.get(code)
}

/// All registered coupon codes, in sorted order.
pub fn codes() -> impl Iterator<Item = &'static str> {
    COUPONS.keys().copied()
}

// =============================================================================
// Unit Tests
// =============================================================================
