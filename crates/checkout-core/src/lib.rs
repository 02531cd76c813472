//! # checkout-core: Pure Checkout Pricing
//!
//! This crate turns a checkout request record into a priced order summary.
//! It contains the whole pricing pipeline as pure functions with zero I/O.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Checkout Pipeline                                │
//! │                                                                         │
//! │  JSON record                                                            │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  extract_request ──► validate_request ──► calculate_subtotal            │
//! │                                                 │                       │
//! │                                                 ▼                       │
//! │  CheckoutResult ◄── generate_order_id ◄── calculate_tax ◄── discount    │
//! │                                                                         │
//! │  Any stage may stop the pipeline with a CheckoutError:                  │
//! │    InvalidRequest (validation)  |  UnknownCoupon (discount)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Exact decimal money with floor-based rate application
//! - [`types`] - Domain types (LineItem, CheckoutRequest, CheckoutResult, Rate)
//! - [`coupon`] - Static coupon registry and discount rules
//! - [`request`] - Field extraction from an untyped request record
//! - [`validation`] - Ordered request validation
//! - [`pricing`] - Subtotal, discount, tax and order id stages
//! - [`checkout`] - Top-level orchestration
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use checkout_core::process_checkout;
//! use serde_json::json;
//!
//! let request = json!({
//!     "user_id": "u1",
//!     "items": [{ "price": 100, "qty": 2 }],
//!     "coupon": "SAVE10",
//! });
//!
//! let result = process_checkout(&request).unwrap();
//! assert_eq!(result.order_id, "u1-1-X");
//! assert_eq!(result.total.to_string(), "217");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod coupon;
pub mod error;
pub mod money;
pub mod pricing;
pub mod request;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use checkout::{checkout, process_checkout};
pub use coupon::CouponRule;
pub use error::{CheckoutError, CoreResult, ValidationError};
pub use money::Money;
pub use request::{extract_request, RawCheckoutRequest};
pub use types::*;
pub use validation::validate_request;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Currency reported when the request does not name one.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Sales tax applied to the discounted amount (2100 bps = 21%).
pub const TAX_RATE: Rate = Rate::from_bps(2100);
