//! Property tests for the pricing invariants.

use checkout_core::pricing::calculate_tax;
use checkout_core::{coupon, process_checkout, Money};
use proptest::prelude::*;
use serde_json::{json, Value};

/// Up to eight lines of `(price in cents, qty)`.
fn lines() -> impl Strategy<Value = Vec<(u32, u32)>> {
    prop::collection::vec((1u32..=1_000_000, 1u32..=50), 1..8)
}

fn coupon_code() -> impl Strategy<Value = Option<&'static str>> {
    prop_oneof![
        Just(None),
        Just(Some("")),
        Just(Some("SAVE10")),
        Just(Some("SAVE20")),
        Just(Some("VIP")),
    ]
}

fn record(lines: &[(u32, u32)], coupon: Option<&str>) -> Value {
    let items: Vec<Value> = lines
        .iter()
        .map(|&(cents, qty)| json!({ "price": f64::from(cents) / 100.0, "qty": qty }))
        .collect();
    json!({ "user_id": "prop", "items": items, "coupon": coupon })
}

proptest! {
    #[test]
    fn total_is_clamped_amount_plus_tax(lines in lines(), code in coupon_code()) {
        let result = process_checkout(&record(&lines, code)).unwrap();

        let after_discount = (result.subtotal - result.discount).clamp_non_negative();
        prop_assert_eq!(result.tax, calculate_tax(after_discount));
        prop_assert_eq!(result.total, after_discount + result.tax);
        prop_assert!(!result.total.is_negative());
        prop_assert!(result.tax.is_whole());
        prop_assert!(result.discount.is_whole());
    }

    #[test]
    fn subtotal_ignores_item_order(lines in lines()) {
        let forward = process_checkout(&record(&lines, None)).unwrap();

        let mut reversed_lines = lines.clone();
        reversed_lines.reverse();
        let reversed = process_checkout(&record(&reversed_lines, None)).unwrap();

        prop_assert_eq!(forward.subtotal, reversed.subtotal);
        prop_assert_eq!(forward.total, reversed.total);
    }

    #[test]
    fn subtotal_is_the_exact_line_sum(lines in lines()) {
        let result = process_checkout(&record(&lines, None)).unwrap();

        let cents: u64 = lines.iter().map(|&(c, q)| u64::from(c) * u64::from(q)).sum();
        let expected = Money::from_decimal(rust_decimal::Decimal::new(cents as i64, 2));
        prop_assert_eq!(result.subtotal, expected);
    }

    #[test]
    fn percent_coupons_never_exceed_the_subtotal(subtotal in 0i64..10_000_000) {
        let subtotal = Money::from_major(subtotal);
        for code in ["SAVE10", "SAVE20"] {
            let discount = coupon::lookup(code).unwrap().discount_for(subtotal);
            prop_assert!(discount <= subtotal);
            prop_assert!(!discount.is_negative());
        }
    }
}
