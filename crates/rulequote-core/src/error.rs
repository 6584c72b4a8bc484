//! # Error Types
//!
//! Domain-specific error types for rulequote-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  rulequote-core errors (this file)                                     │
//! │  ├── CoreError        - Pricing / domain failures                      │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  rulequote-service errors (separate crate)                             │
//! │  └── ServiceError     - Lookup, config and file output failures        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ServiceError → CLI (anyhow)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, job id, etc.)
//! 3. Errors are enum variants, never String

use thiserror::Error;

use crate::types::JobStatus;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A line item, tier or quote field failed validation.
    ///
    /// ## When This Occurs
    /// - Quantity of zero or below
    /// - Negative unit price
    /// - Unknown customer tier string
    /// - Missing customer name / malformed email on a quote
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    /// An amount left the representable range.
    #[error("Amount is too large to represent")]
    AmountOverflow,

    /// A rate outside `[0, 1)`.
    #[error("Rate {value} must be at least 0 and below 1")]
    InvalidRate { value: String },

    /// A document job was asked to move to a status its lifecycle forbids.
    ///
    /// ## Allowed Transitions
    /// ```text
    /// Pending ──► Processing ──┬──► Completed
    ///                          └──► Failed
    /// ```
    #[error("Document job {job_id} cannot move from {from} to {to}")]
    InvalidJobTransition {
        job_id: String,
        from: JobStatus,
        to: JobStatus,
    },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any computation runs; the first failing check wins.
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

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} must be non-negative")]
    MustBeNonNegative { field: String },

    /// Invalid format (e.g., malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
