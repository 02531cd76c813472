//! # Checkout Orchestration
//!
//! Runs the full pipeline over a request record.
//!
//! ## User Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  { user_id: "u1", items: [{ price: 100, qty: 2 }], coupon: "SAVE10" }   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  extract + validate                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  subtotal        = 100 × 2              = 200                           │
//! │  discount        = floor(200 × 10%)     =  20                           │
//! │  after discount  = max(0, 200 − 20)     = 180                           │
//! │  tax             = floor(180 × 21%)     =  37                           │
//! │  total           = 180 + 37             = 217                           │
//! │  order_id        = "u1-1-X"                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{CheckoutError, CoreResult, ValidationError};
use crate::pricing::{calculate_discount, calculate_subtotal, calculate_tax, generate_order_id};
use crate::request::extract_request;
use crate::types::{CheckoutRequest, CheckoutResult};
use crate::validation::validate_request;

/// Prices a request record.
///
/// ## Errors
/// - `InvalidRequest` for the first validation rule the record breaks
/// - `UnknownCoupon` for a non-empty coupon code missing from the registry
///
/// Nothing is assembled unless every stage succeeds.
pub fn process_checkout(record: &Value) -> CoreResult<CheckoutResult> {
    let raw = extract_request(record);
    let request = validate_request(raw).map_err(|err| {
        warn!(reason = %err, "Rejected checkout request");
        CheckoutError::from(err)
    })?;

    checkout(&request)
}

/// Prices an already validated request.
pub fn checkout(request: &CheckoutRequest) -> CoreResult<CheckoutResult> {
    debug!(user_id = %request.user_id, items = request.items.len(), "Pricing checkout");

    let subtotal = calculate_subtotal(&request.items)?;
    let discount = calculate_discount(subtotal, request.coupon.as_deref()).map_err(|err| {
        warn!(error = %err, "Coupon rejected");
        err
    })?;

    let total_after_discount = (subtotal - discount).clamp_non_negative();
    let tax = calculate_tax(total_after_discount);
    let total = total_after_discount
        .checked_add(tax)
        .ok_or(ValidationError::OutOfRange {
            field: "order amount",
        })?;

    let result = CheckoutResult {
        order_id: generate_order_id(&request.user_id, &request.items),
        user_id: request.user_id.clone(),
        currency: request.currency_or_default().to_string(),
        subtotal,
        discount,
        tax,
        total,
        items_count: request.items.len(),
    };

    debug!(
        order_id = %result.order_id,
        %subtotal,
        %discount,
        %tax,
        %total,
        "Checkout priced"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use serde_json::json;

    #[test]
    fn test_reference_example() {
        let result = process_checkout(&json!({
            "user_id": "u1",
            "items": [{ "price": 100, "qty": 2 }],
            "coupon": "SAVE10",
        }))
        .unwrap();

        assert_eq!(result.order_id, "u1-1-X");
        assert_eq!(result.subtotal, Money::from_major(200));
        assert_eq!(result.discount, Money::from_major(20));
        assert_eq!(result.tax, Money::from_major(37));
        assert_eq!(result.total, Money::from_major(217));
        assert_eq!(result.currency, "USD");
        assert_eq!(result.items_count, 1);
    }

    #[test]
    fn test_discount_larger_than_subtotal_is_clamped() {
        // VIP grants 10 below the threshold, more than this subtotal.
        let result = process_checkout(&json!({
            "user_id": "u1",
            "items": [{ "price": 4, "qty": 1 }],
            "coupon": "VIP",
        }))
        .unwrap();

        assert_eq!(result.subtotal, Money::from_major(4));
        assert_eq!(result.discount, Money::from_major(10));
        assert_eq!(result.tax, Money::zero());
        assert_eq!(result.total, Money::zero());
    }

    #[test]
    fn test_validation_runs_before_coupon_lookup() {
        let err = process_checkout(&json!({ "user_id": "u1", "items": [], "coupon": "FOO" }))
            .unwrap_err();
        assert_eq!(err.kind(), "invalid_request");
    }

    #[test]
    fn test_unknown_coupon() {
        let err = process_checkout(&json!({
            "user_id": "u1",
            "items": [{ "price": 1, "qty": 1 }],
            "coupon": "FOO",
        }))
        .unwrap_err();
        assert!(matches!(err, CheckoutError::UnknownCoupon { ref code } if code == "FOO"));
    }

    #[test]
    fn test_currency_passthrough_and_default() {
        let priced = |currency: Value| {
            process_checkout(&json!({
                "user_id": "u1",
                "items": [{ "price": 1, "qty": 1 }],
                "currency": currency,
            }))
            .unwrap()
            .currency
        };

        assert_eq!(priced(json!("EUR")), "EUR");
        assert_eq!(priced(json!("")), "USD");
        assert_eq!(priced(json!(null)), "USD");
        assert_eq!(priced(json!(false)), "USD");
    }

    #[test]
    fn test_typed_entry_point() {
        let request = CheckoutRequest {
            user_id: "u9".into(),
            items: vec![crate::LineItem::new(Money::from_major(50), 3)],
            coupon: Some("SAVE20".to_string()),
            currency: None,
        };
        let result = checkout(&request).unwrap();

        // 150 < 200, so the 5% base rate applies: floor(7.5) = 7.
        assert_eq!(result.discount, Money::from_major(7));
        // floor(143 × 21%) = floor(30.03)
        assert_eq!(result.tax, Money::from_major(30));
        assert_eq!(result.total, Money::from_major(173));
        assert_eq!(result.order_id, "u9-1-X");
    }
}
