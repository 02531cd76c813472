//! # Error Types
//!
//! Domain-specific error types for checkout-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  CheckoutError        - What the caller of process_checkout sees        │
//! │  ├── InvalidRequest   - wraps the first ValidationError found           │
//! │  └── UnknownCoupon    - coupon code missing from the registry           │
//! │                                                                         │
//! │  ValidationError      - One variant per validation check                │
//! │                                                                         │
//! │  Flow: ValidationError → CheckoutError::InvalidRequest → caller         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both checkout errors are terminal for the call: no partial result is
//! ever assembled.

use thiserror::Error;

// =============================================================================
// Checkout Error
// =============================================================================

/// Errors returned by the checkout pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// The request record is structurally invalid or out of range.
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] ValidationError),

    /// A non-empty coupon code is not present in the coupon registry.
    ///
    /// ## User Workflow
    /// ```text
    /// Request { coupon: "FOO" }
    ///      │
    ///      ▼
    /// coupon::lookup("FOO") → None
    ///      │
    ///      ▼
    /// UnknownCoupon { code: "FOO" }
    ///      │
    ///      ▼
    /// Caller rejects the order
    /// ```
    #[error("unknown coupon: {code}")]
    UnknownCoupon { code: String },
}

impl CheckoutError {
    /// Stable machine-readable tag for this error.
    pub fn kind(&self) -> &'static str {
        match self {
            CheckoutError::InvalidRequest(_) => "invalid_request",
            CheckoutError::UnknownCoupon { .. } => "unknown_coupon",
        }
    }

    /// Human-readable reason, without the kind prefix.
    pub fn reason(&self) -> String {
        match self {
            CheckoutError::InvalidRequest(err) => err.to_string(),
            CheckoutError::UnknownCoupon { code } => format!("unknown coupon: {code}"),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Request validation failures, one per check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is absent or null.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Field must be a JSON array.
    #[error("{field} must be a list")]
    NotAList { field: &'static str },

    /// Field must contain at least one element.
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    /// A line item is not a record carrying both `price` and `qty`.
    #[error("item must have price and qty")]
    MissingItemFields { index: usize },

    /// Field must be a JSON number.
    #[error("{field} must be a number")]
    NotANumber { field: &'static str, index: usize },

    /// Field must be a whole number.
    #[error("{field} must be an integer")]
    NotAnInteger { field: &'static str, index: usize },

    /// Value must be strictly greater than zero.
    #[error("{field} must be positive")]
    MustBePositive { field: &'static str, index: usize },

    /// Value does not fit the supported numeric range.
    #[error("{field} is out of range")]
    OutOfRange { field: &'static str },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CheckoutError.
pub type CoreResult<T> = Result<T, CheckoutError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required { field: "user_id" };
        assert_eq!(err.to_string(), "user_id is required");

        let err = ValidationError::MissingItemFields { index: 3 };
        assert_eq!(err.to_string(), "item must have price and qty");

        let err = ValidationError::MustBePositive {
            field: "price",
            index: 0,
        };
        assert_eq!(err.to_string(), "price must be positive");
    }

    #[test]
    fn test_validation_converts_to_checkout_error() {
        let err: CheckoutError = ValidationError::Empty { field: "items" }.into();
        assert!(matches!(err, CheckoutError::InvalidRequest(_)));
        assert_eq!(err.kind(), "invalid_request");
        assert_eq!(err.reason(), "items must not be empty");
        assert_eq!(err.to_string(), "invalid request: items must not be empty");
    }

    #[test]
    fn test_unknown_coupon_message() {
        let err = CheckoutError::UnknownCoupon {
            code: "FOO".to_string(),
        };
        assert_eq!(err.kind(), "unknown_coupon");
        assert_eq!(err.to_string(), "unknown coupon: FOO");
        assert_eq!(err.reason(), "unknown coupon: FOO");
    }
}
