//! # Pricing Stages
//!
//! The arithmetic stages of the checkout: subtotal, discount, tax and the
//! order id. Each stage is a plain function over validated inputs.
//!
//! ## Truncation
//! Discounts and taxes are truncated to whole units (`floor`), never
//! rounded. The subtotal is exact.

use tracing::debug;

use crate::coupon;
use crate::error::{CheckoutError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{LineItem, UserId};
use crate::TAX_RATE;

/// Sums `price × quantity` over the items, exactly.
///
/// ## Errors
/// `InvalidRequest` when the amount leaves the decimal range
/// (about 7.9 × 10^28); the sum is otherwise infallible.
///
/// ## Example
/// ```rust
/// use checkout_core::pricing::calculate_subtotal;
/// use checkout_core::{LineItem, Money};
///
/// let items = [LineItem::new(Money::from_major(100), 2), LineItem::new(Money::from_major(5), 1)];
/// assert_eq!(calculate_subtotal(&items).unwrap(), Money::from_major(205));
/// ```
pub fn calculate_subtotal(items: &[LineItem]) -> CoreResult<Money> {
    items
        .iter()
        .try_fold(Money::zero(), |subtotal, item| {
            item.line_total()
                .and_then(|line_total| subtotal.checked_add(line_total))
        })
        .ok_or(CheckoutError::InvalidRequest(ValidationError::OutOfRange {
            field: "order amount",
        }))
}

/// Resolves the coupon discount for `subtotal`.
///
/// - no coupon or an empty code → zero
/// - a code missing from the registry → `UnknownCoupon`
/// - otherwise the code's [`coupon::CouponRule`] decides
///
/// The discount may exceed the subtotal; clamping happens at assembly.
pub fn calculate_discount(subtotal: Money, coupon_code: Option<&str>) -> CoreResult<Money> {
    let code = match coupon_code {
        None | Some("") => return Ok(Money::zero()),
        Some(code) => code,
    };

    let rule = coupon::lookup(code).ok_or_else(|| CheckoutError::UnknownCoupon {
        code: code.to_string(),
    })?;
    let discount = rule.discount_for(subtotal);

    debug!(coupon = %code, ?rule, %subtotal, %discount, "Coupon applied");
    Ok(discount)
}

/// Tax on a non-negative amount: `floor(amount × 21%)`.
///
/// ## Example
/// ```rust
/// use checkout_core::pricing::calculate_tax;
/// use checkout_core::Money;
///
/// assert_eq!(calculate_tax(Money::from_major(180)), Money::from_major(37));
/// ```
#[inline]
pub fn calculate_tax(amount: Money) -> Money {
    amount.apply_rate_floor(TAX_RATE)
}

/// Builds the order id `{user_id}-{item_count}-X`.
///
/// The id only depends on the user and the number of lines, so two orders
/// from one user with the same line count share an id.
pub fn generate_order_id(user_id: &UserId, items: &[LineItem]) -> String {
    format!("{}-{}-X", user_id, items.len())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn item(price: i64, qty: u64) -> LineItem {
        LineItem::new(Money::from_major(price), qty)
    }

    #[test]
    fn test_subtotal_sums_lines() {
        let items = [item(100, 2), item(3, 3)];
        assert_eq!(calculate_subtotal(&items).unwrap(), Money::from_major(209));
    }

    #[test]
    fn test_subtotal_is_exact_for_fractions() {
        let items = [
            LineItem::new(Money::from_decimal(dec!(0.1)), 1),
            LineItem::new(Money::from_decimal(dec!(0.2)), 1),
        ];
        assert_eq!(
            calculate_subtotal(&items).unwrap(),
            Money::from_decimal(dec!(0.3))
        );
    }

    #[test]
    fn test_subtotal_overflow_is_invalid_request() {
        let items = [LineItem::new(Money::from_decimal(Decimal::MAX), 2)];
        let err = calculate_subtotal(&items).unwrap_err();
        assert_eq!(err.reason(), "order amount is out of range");
    }

    #[test]
    fn test_discount_without_coupon() {
        let subtotal = Money::from_major(500);
        assert_eq!(calculate_discount(subtotal, None).unwrap(), Money::zero());
        assert_eq!(calculate_discount(subtotal, Some("")).unwrap(), Money::zero());
    }

    #[test]
    fn test_discount_unknown_coupon() {
        let err = calculate_discount(Money::from_major(500), Some("FOO")).unwrap_err();
        assert_eq!(
            err,
            CheckoutError::UnknownCoupon {
                code: "FOO".to_string()
            }
        );
    }

    #[test]
    fn test_discount_known_coupons() {
        let d = |subtotal, code| calculate_discount(Money::from_major(subtotal), Some(code)).unwrap();

        assert_eq!(d(1000, "SAVE10"), Money::from_major(100));
        assert_eq!(d(199, "SAVE20"), Money::from_major(9));
        assert_eq!(d(200, "SAVE20"), Money::from_major(40));
        assert_eq!(d(99, "VIP"), Money::from_major(10));
        assert_eq!(d(100, "VIP"), Money::from_major(50));
    }

    #[test]
    fn test_tax_truncates() {
        assert_eq!(calculate_tax(Money::from_major(180)), Money::from_major(37));
        assert_eq!(calculate_tax(Money::from_major(4)), Money::zero());
        assert_eq!(calculate_tax(Money::zero()), Money::zero());
        assert_eq!(
            calculate_tax(Money::from_decimal(dec!(100.50))),
            Money::from_major(21)
        );
    }

    #[test]
    fn test_order_id() {
        let items = [item(1, 1), item(2, 1), item(3, 1)];
        assert_eq!(generate_order_id(&UserId::from("u1"), &items), "u1-3-X");
        assert_eq!(generate_order_id(&UserId::new(json!(42)), &items[..1]), "42-1-X");
    }
}
