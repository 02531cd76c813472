//! # Validation Module
//!
//! Turns a [`RawCheckoutRequest`] into a typed [`CheckoutRequest`], or
//! reports the first rule it breaks.
//!
//! ## Check Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Order                                   │
//! │                                                                         │
//! │  1. user_id present                                                     │
//! │  2. items present                                                       │
//! │  3. items is a list                                                     │
//! │  4. items not empty                                                     │
//! │  5. every item has price and qty        (in list order)                 │
//! │  6. every item: price > 0, then qty > 0 (in list order)                 │
//! │                                                                         │
//! │  The first failure stops validation. Errors are never aggregated,       │
//! │  so the same request always reports the same reason.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `currency` is not checked here; any value is accepted and only falsy
//! values are normalized away.
//!
//! ## Usage
//! ```rust
//! use checkout_core::validation::{validate_price, validate_quantity};
//! use serde_json::json;
//!
//! assert!(validate_price(&json!(9.99), 0).is_ok());
//! assert!(validate_quantity(&json!(0), 0).is_err());
//! ```

use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::money::Money;
use crate::request::{code_text, is_truthy, RawCheckoutRequest};
use crate::types::{CheckoutRequest, LineItem, UserId};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Request Validator
// =============================================================================

/// Validates an extracted request in the documented order.
///
/// ## Example
/// ```rust
/// use checkout_core::{extract_request, validate_request, ValidationError};
/// use serde_json::json;
///
/// let raw = extract_request(&json!({ "user_id": "u1", "items": [] }));
/// assert_eq!(
///     validate_request(raw),
///     Err(ValidationError::Empty { field: "items" })
/// );
/// ```
pub fn validate_request(raw: RawCheckoutRequest) -> ValidationResult<CheckoutRequest> {
    let user_id = raw
        .user_id
        .ok_or(ValidationError::Required { field: "user_id" })?;

    let items = raw
        .items
        .ok_or(ValidationError::Required { field: "items" })?;
    let Value::Array(items) = items else {
        return Err(ValidationError::NotAList { field: "items" });
    };
    if items.is_empty() {
        return Err(ValidationError::Empty { field: "items" });
    }

    // Structure of every item first, numbers second.
    let records = validate_item_fields(&items)?;
    let items = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| validate_line_item(record, index))
        .collect::<ValidationResult<Vec<_>>>()?;

    Ok(CheckoutRequest {
        user_id: UserId::new(user_id),
        items,
        coupon: raw.coupon.as_ref().map(code_text),
        currency: raw.currency.as_ref().filter(|c| is_truthy(c)).map(code_text),
    })
}

// =============================================================================
// Item Validators
// =============================================================================

/// Checks that every item is a record with both `price` and `qty`.
///
/// ## Returns
/// The item records, in order, for the numeric checks.
pub fn validate_item_fields(items: &[Value]) -> ValidationResult<Vec<&Map<String, Value>>> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item.as_object() {
            Some(record) if record.contains_key("price") && record.contains_key("qty") => {
                Ok(record)
            }
            _ => Err(ValidationError::MissingItemFields { index }),
        })
        .collect()
}

/// Validates the numbers of one item: price before quantity.
pub fn validate_line_item(record: &Map<String, Value>, index: usize) -> ValidationResult<LineItem> {
    let price = validate_price(&record["price"], index)?;
    let quantity = validate_quantity(&record["qty"], index)?;
    Ok(LineItem::new(price, quantity))
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price.
///
/// ## Rules
/// - Must be a JSON number
/// - Must be strictly positive (zero is rejected)
///
/// ## Example
/// ```rust
/// use checkout_core::validation::validate_price;
/// use serde_json::json;
///
/// assert!(validate_price(&json!(100), 0).is_ok());
/// assert!(validate_price(&json!(0), 0).is_err());
/// assert!(validate_price(&json!("100"), 0).is_err());
/// ```
pub fn validate_price(value: &Value, index: usize) -> ValidationResult<Money> {
    let price = parse_number(value, "price", index)?;
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price",
            index,
        });
    }
    Ok(price)
}

/// Validates a quantity.
///
/// ## Rules
/// - Must be a JSON number
/// - Must be strictly positive
/// - Must be whole (`2` and `2.0` pass, `2.5` does not)
pub fn validate_quantity(value: &Value, index: usize) -> ValidationResult<u64> {
    let qty = parse_number(value, "qty", index)?;
    if !qty.is_positive() {
        return Err(ValidationError::MustBePositive { field: "qty", index });
    }
    match qty.to_whole_count() {
        Some(count) => Ok(count),
        None if qty.is_whole() => Err(ValidationError::OutOfRange { field: "qty" }),
        None => Err(ValidationError::NotAnInteger { field: "qty", index }),
    }
}

fn parse_number(value: &Value, field: &'static str, index: usize) -> ValidationResult<Money> {
    let Value::Number(number) = value else {
        return Err(ValidationError::NotANumber { field, index });
    };
    Money::from_json_number(number).ok_or(ValidationError::OutOfRange { field })
}

// =============================================================================
// Unit Tests
// =============================================================================
