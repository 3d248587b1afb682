//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - Unknown codes, bad rate tables                 │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  storefront-storage errors (separate crate)                            │
//! │  └── StorageError     - Local storage failures                         │
//! │                                                                         │
//! │  App errors                                                             │
//! │  └── AppError         - Startup, config, page template                 │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → log / page message     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Where Errors Do NOT Appear
//! Cart and carousel operations are total: an absent product id or an
//! out-of-range dot index is a no-op, never an error. Errors only exist at the
//! boundaries where text comes in (markup attributes, user input, config).

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A currency code outside the rate table.
    ///
    /// ## When This Occurs
    /// - Currency selector sends a value the table doesn't know
    /// - A stale `preferredCurrency` value from an older page version
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// A sort direction other than `asc` / `desc`.
    #[error("Unknown sort direction: {0}")]
    UnknownSortDirection(String),

    /// A rate table entry that would break the table's invariants.
    #[error("Invalid rate for {currency}: {reason}")]
    InvalidRate { currency: String, reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when page markup or user input doesn't meet
/// requirements. Used for early validation before any state changes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value outside the allowed range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., price text).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// An order form field the page rejects as a whole.
    #[error("Invalid {field}")]
    Invalid { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
