//! # Request Extraction
//!
//! Pulls the recognized fields out of an untyped request record.
//!
//! Extraction never fails and never coerces: each field is copied as-is, and
//! missing fields (or JSON `null`) become `None`. Deciding what is acceptable
//! is left to [`crate::validation`].

use serde_json::{Map, Value};

/// Fields of a request record, not yet validated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawCheckoutRequest {
    pub user_id: Option<Value>,
    pub items: Option<Value>,
    pub coupon: Option<Value>,
    pub currency: Option<Value>,
}

/// Extracts `user_id`, `items`, `coupon` and `currency` from a record.
///
/// A record that is not a JSON object has none of the fields.
///
/// ## Example
/// ```rust
/// use checkout_core::extract_request;
/// use serde_json::json;
///
/// let raw = extract_request(&json!({ "user_id": "u1", "coupon": null }));
/// assert_eq!(raw.user_id, Some(json!("u1")));
/// assert_eq!(raw.coupon, None);
/// assert_eq!(raw.items, None);
/// ```
pub fn extract_request(record: &Value) -> RawCheckoutRequest {
    let Some(fields) = record.as_object() else {
        return RawCheckoutRequest::default();
    };

    RawCheckoutRequest {
        user_id: field(fields, "user_id"),
        items: field(fields, "items"),
        coupon: field(fields, "coupon"),
        currency: field(fields, "currency"),
    }
}

fn field(fields: &Map<String, Value>, name: &str) -> Option<Value> {
    fields.get(name).filter(|value| !value.is_null()).cloned()
}

/// Truthiness of a JSON value: `null`, `false`, `0`, `""`, `[]` and `{}` are
/// falsy, everything else is truthy.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Renders a value as a code string: strings verbatim, anything else as JSON.
pub(crate) fn code_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
