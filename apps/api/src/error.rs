//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the API                                │
//! │                                                                         │
//! │  Handler: Result<T, ApiError>                                          │
//! │         │                                                               │
//! │         ├── DbError ───────────┐                                        │
//! │         ├── ValidationError ───┤                                        │
//! │         ├── CoreError ─────────┼──► ApiError { code, message }          │
//! │         └── FetchFailure ──────┘         │                              │
//! │                                          ▼                              │
//! │                         HTTP status + JSON body                         │
//! │                                                                         │
//! │  {                                                                      │
//! │    "code": "FETCH_FAILED",                                              │
//! │    "message": "Sales records are unavailable"                           │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Storage details are logged, never sent to the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use dsr_core::{CoreError, FetchFailure, ValidationError};
use dsr_db::DbError;
use serde::Serialize;

/// API error returned from handlers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Report passcode missing or wrong (401)
    Unauthorized,

    /// The sales source could not supply records (503)
    FetchFailed,

    /// Database operation failed (500)
    DatabaseError,

    /// CSV rendering failed (500)
    ExportError,

    /// Stored sales could not be summed (500)
    ReportError,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    /// HTTP status for this code.
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::FetchFailed => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::DatabaseError
            | ErrorCode::ExportError
            | ErrorCode::ReportError
            | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Unauthorized, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::TransactionFailed(e) => {
                tracing::error!("Transaction failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database transaction failed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::EmptyCart => ApiError::validation("Cart is empty"),
            CoreError::Fetch(failure) => failure.into(),
            CoreError::Export(e) => {
                tracing::error!("CSV export failed: {}", e);
                ApiError::new(ErrorCode::ExportError, "Could not render export")
            }
            CoreError::Overflow { item_name } => {
                tracing::error!(item = %item_name, "Report totals overflowed");
                ApiError::new(ErrorCode::ReportError, "Report totals are out of range")
            }
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<FetchFailure> for ApiError {
    fn from(failure: FetchFailure) -> Self {
        tracing::error!(reason = %failure.reason, "Sales fetch failed");
        ApiError::new(ErrorCode::FetchFailed, "Sales records are unavailable")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_code_and_message() {
        let err = ApiError::not_found("Item", "abc");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Item not found: abc");
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::validation("x").into_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::unauthorized("x").into_response().status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::from(FetchFailure::new("down")).into_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_db_details_are_not_leaked() {
        let err = ApiError::from(DbError::QueryFailed("no such table: sales".to_string()));
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("sales"));
    }

    #[test]
    fn test_core_errors() {
        assert_eq!(ApiError::from(CoreError::EmptyCart).code, ErrorCode::ValidationError);
        let fetch: CoreError = FetchFailure::new("timeout").into();
        assert_eq!(ApiError::from(fetch).code, ErrorCode::FetchFailed);

        let overflow = ApiError::from(CoreError::Overflow {
            item_name: "Thali".to_string(),
        });
        assert_eq!(overflow.code, ErrorCode::ReportError);
        assert_eq!(
            overflow.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
