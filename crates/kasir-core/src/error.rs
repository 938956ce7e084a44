//! # Error Types
//!
//! Domain-specific error types for kasir-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kasir-core errors (this file)                                         │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  kasir-db errors (separate crate)                                      │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  kasir-app errors (separate crate)                                     │
//! │  └── ApiError         - What a front end sees (serialized)             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → Front end    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (draft id, product id, amounts)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No draft cart exists with the given id.
    ///
    /// ## When This Occurs
    /// - Draft was deleted in another part of the UI
    /// - Caller holds a stale draft id
    ///
    /// The expected reaction is a warning notification, not a crash.
    #[error("Draft cart not found: {0}")]
    DraftNotFound(String),

    /// The product is not a line of the given draft.
    #[error("Product {product_id} is not in draft {draft_id}")]
    LineNotFound { draft_id: String, product_id: i64 },

    /// Checkout or edit attempted against an empty item list.
    #[error("Cart has no items")]
    EmptyCart,

    /// Tendered payment does not cover the total.
    ///
    /// ## When This Occurs
    /// - Confirm pressed while payment < total (the UI keeps the button
    ///   disabled, so this is a guard of last resort)
    /// - Transaction edit raised the total above the stored payment
    ///
    /// ## User Workflow
    /// ```text
    /// Total: Rp85.000, tendered: Rp50.000
    ///      │
    ///      ▼
    /// InsufficientPayment { total: 85000, payment: 50000 }
    ///      │
    ///      ▼
    /// UI shows: "Pembayaran kurang" and keeps the dialog open
    /// ```
    #[error("Payment {payment} does not cover total {total}")]
    InsufficientPayment { total: Money, payment: Money },

    /// Transaction cannot be found in the ledger.
    #[error("Transaction not found: {0}")]
    TransactionNotFound(i64),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
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

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Duplicate value (e.g., the same barcode listed twice).
    #[error("{field} '{value}' is duplicated")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
