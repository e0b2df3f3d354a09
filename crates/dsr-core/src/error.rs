//! # Error Types
//!
//! Domain-specific error types for dsr-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  dsr-core errors (this file)                                           │
//! │  ├── CoreError        - General domain errors                          │
//! │  ├── ValidationError  - Input / record validation failures             │
//! │  └── FetchFailure     - The sales source could not supply records      │
//! │                                                                         │
//! │  dsr-db errors (separate crate)                                        │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  API errors (in app)                                                   │
//! │  └── ApiError         - What the frontend sees (serialized)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A checkout was attempted with no lines.
    #[error("Cart is empty")]
    EmptyCart,

    /// The sales source failed; reports cannot be built.
    #[error(transparent)]
    Fetch(#[from] FetchFailure),

    /// Rendering a delimited export failed.
    ///
    /// Writing into an in-memory buffer, so in practice only reachable if
    /// the writer rejects its own configuration.
    #[error("Export failed: {0}")]
    Export(String),

    /// A running quantity or revenue sum left the `i64` range.
    ///
    /// Only reachable through stored rows that bypassed entry validation.
    #[error("Totals for {item_name} are out of range")]
    Overflow { item_name: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Fetch Failure
// =============================================================================

/// The external sales source could not supply records.
///
/// Surfaced to the caller as a failure state. The core never retries.
#[derive(Debug, Clone, Error)]
#[error("Failed to fetch sales: {reason}")]
pub struct FetchFailure {
    pub reason: String,
}

impl FetchFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        FetchFailure {
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised for user input at entry time, and for stored rows that cannot be
/// turned into a [`SaleRecord`](crate::types::SaleRecord) at report time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID, invalid date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    pub(crate) fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }

    pub(crate) fn invalid_format(field: &str, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::required("itemName");
        assert_eq!(err.to_string(), "itemName is required");

        let err = ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: 999,
        };
        assert_eq!(err.to_string(), "quantity must be between 1 and 999");
    }

    #[test]
    fn test_fetch_failure_message_is_transparent() {
        let err: CoreError = FetchFailure::new("pool closed").into();
        assert_eq!(err.to_string(), "Failed to fetch sales: pool closed");
    }

    #[test]
    fn test_overflow_message_names_item() {
        let err = CoreError::Overflow {
            item_name: "Tea".to_string(),
        };
        assert_eq!(err.to_string(), "Totals for Tea are out of range");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("name").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
