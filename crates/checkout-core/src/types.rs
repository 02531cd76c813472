//! # Domain Types
//!
//! Core domain types of the checkout pipeline.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐        │
//! │  │ CheckoutRequest │   │    LineItem     │   │ CheckoutResult  │        │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │        │
//! │  │  user_id        │──►│  price (Money)  │   │  order_id       │        │
//! │  │  items          │   │  quantity (u64) │   │  subtotal       │        │
//! │  │  coupon         │   └─────────────────┘   │  discount, tax  │        │
//! │  │  currency       │                         │  total          │        │
//! │  └─────────────────┘   ┌─────────────────┐   └─────────────────┘        │
//! │                        │      Rate       │                              │
//! │                        │  bps (u32)      │                              │
//! │                        │  2100 = 21%     │                              │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All of these are value objects: built per call, dropped once the caller
//! has consumed the result.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Rate
// =============================================================================

/// A percentage represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 2100 bps = 21% (the checkout tax rate), 1000 bps = 10% (SAVE10)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Rate(u32);

impl Rate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as an exact fraction (2100 bps → 0.2100).
    #[inline]
    pub fn as_fraction(&self) -> Decimal {
        Decimal::new(i64::from(self.0), 4)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", (self.as_fraction() * Decimal::ONE_HUNDRED).normalize())
    }
}

// =============================================================================
// User Id
// =============================================================================

/// Opaque user identifier: any non-null JSON value.
///
/// Strings render verbatim (`"u1"` → `u1`); every other value renders as
/// its JSON text (`42` → `42`). Serializes back to the original value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct UserId(Value);

impl UserId {
    /// Wraps a raw value. Callers are expected to reject `null` first.
    pub fn new(value: Value) -> Self {
        UserId(value)
    }

    /// Returns the original value.
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{other}"),
        }
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        UserId(Value::String(id.to_string()))
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// A validated line in the checkout request.
///
/// ## Invariants
/// - `price > 0`
/// - `quantity > 0`
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// Unit price in major currency units.
    #[ts(as = "f64")]
    pub price: Money,

    /// Number of units.
    #[serde(rename = "qty")]
    #[ts(type = "number")]
    pub quantity: u64,
}

impl LineItem {
    /// Creates a line item. Validation is responsible for the invariants.
    pub fn new(price: Money, quantity: u64) -> Self {
        LineItem { price, quantity }
    }

    /// Line total (price × quantity), `None` on decimal overflow.
    #[inline]
    pub fn line_total(&self) -> Option<Money> {
        self.price.checked_mul_quantity(self.quantity)
    }
}

// =============================================================================
// Checkout Request
// =============================================================================

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutRequest {
    /// Who is checking out.
    pub user_id: UserId,

    /// Non-empty, ordered line items.
    pub items: Vec<LineItem>,

    /// Coupon code as supplied. Empty means "no coupon".
    pub coupon: Option<String>,

    /// Currency code as supplied. `None` when absent or falsy.
    pub currency: Option<String>,
}

impl CheckoutRequest {
    /// Currency to report, falling back to [`crate::DEFAULT_CURRENCY`].
    pub fn currency_or_default(&self) -> &str {
        match self.currency.as_deref() {
            Some(code) if !code.is_empty() => code,
            _ => crate::DEFAULT_CURRENCY,
        }
    }
}

// =============================================================================
// Checkout Result
// =============================================================================

/// The priced order summary.
///
/// `discount` is the resolved coupon discount before clamping; `total` is
/// `max(0, subtotal − discount) + tax`.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct CheckoutResult {
    /// `{user_id}-{items_count}-X`
    pub order_id: String,
    #[ts(type = "unknown")]
    pub user_id: UserId,
    pub currency: String,
    #[ts(as = "f64")]
    pub subtotal: Money,
    #[ts(as = "f64")]
    pub discount: Money,
    #[ts(as = "f64")]
    pub tax: Money,
    #[ts(as = "f64")]
    pub total: Money,
    /// Number of line items (not the quantity sum).
    pub items_count: usize,
}

impl CheckoutResult {
    /// Renders the generic result record.
    ///
    /// ## Record Shape
    /// ```text
    /// { order_id, user_id, currency, subtotal, discount, tax, total, items_count }
    /// ```
    pub fn to_record(&self) -> Value {
        serde_json::json!({
            "order_id": self.order_id,
            "user_id": self.user_id.as_value(),
            "currency": self.currency,
            "subtotal": self.subtotal,
            "discount": self.discount,
            "tax": self.tax,
            "total": self.total,
            "items_count": self.items_count,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
