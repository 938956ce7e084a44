//! # API Error Type
//!
//! Unified error type for service operations.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Error Flow in Kasir                                │
//! │                                                                         │
//! │  Front end                     Service Layer                            │
//! │  ─────────                     ─────────────                            │
//! │                                                                         │
//! │  pos.checkout(...)                                                      │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Service Operation                                               │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Database Error? ─── DbError::QueryFailed("...") ──┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Domain Error? ─── CoreError::InsufficientPayment ─ ApiError ──►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  The front end switches on `code` and shows `message`. Nothing here    │
//! │  is fatal; the worst case is a notification and a stale view.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use kasir_core::CoreError;
use kasir_db::DbError;

/// API error returned from service operations.
///
/// ## Serialization
/// This is what the front end receives when an operation fails:
/// ```json
/// {
///   "code": "PAYMENT_ERROR",
///   "message": "Payment Rp50.000 does not cover total Rp85.000"
/// }
/// ```
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
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Database operation failed
    DatabaseError,

    /// Business logic error
    BusinessLogic,

    /// Internal error
    Internal,

    /// Draft-cart operation failed
    CartError,

    /// Payment does not cover the total
    PaymentError,
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
    pub fn not_found(resource: &str, id: impl ToString) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id.to_string()),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// Creates a cart error.
    pub fn cart(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::CartError, message)
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, id),
            DbError::UniqueViolation { field, value } => ApiError::new(
                ErrorCode::ValidationError,
                format!("{} '{}' already exists", field, value),
            ),
            DbError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
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
            DbError::Corrupt(e) => {
                tracing::error!("Corrupt stored record: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Stored record could not be read")
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
            CoreError::DraftNotFound(id) => {
                ApiError::new(ErrorCode::CartError, format!("Draft not found: {}", id))
            }
            CoreError::LineNotFound {
                draft_id,
                product_id,
            } => ApiError::new(
                ErrorCode::CartError,
                format!("Product {} is not in draft {}", product_id, draft_id),
            ),
            CoreError::EmptyCart => ApiError::cart("Cart has no items"),
            CoreError::InsufficientPayment { total, payment } => ApiError::new(
                ErrorCode::PaymentError,
                format!("Payment {} does not cover total {}", payment, total),
            ),
            CoreError::TransactionNotFound(id) => ApiError::not_found("Transaction", id),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use kasir_core::Money;

    #[test]
    fn test_insufficient_payment_maps_to_payment_error() {
        let err: ApiError = CoreError::InsufficientPayment {
            total: Money::from_rupiah(85_000),
            payment: Money::from_rupiah(50_000),
        }
        .into();
        assert_eq!(err.code, ErrorCode::PaymentError);
    }

    #[test]
    fn test_db_not_found_keeps_entity_context() {
        let err: ApiError = DbError::not_found("Product", 404).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product not found: 404");
    }

    #[test]
    fn test_serializes_with_screaming_code() {
        let err = ApiError::validation("name is required");
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("\"VALIDATION_ERROR\""));
    }
}
