//! # Validation Error Types
//!
//! Input validation errors for benta-core.
//!
//! ## Error Hierarchy
//! ```text
//! ValidationError (this file)  - input fails a business rule check
//!        │
//!        ▼
//! EngineError (benta-engine)   - wraps validation + store failures into
//!                                the taxonomy the API layer surfaces
//! DbError (benta-db)           - database operation failures
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impls)
//! 2. Include context in error messages (field name, limits)
//! 3. Errors are enum variants, never bare strings

use thiserror::Error;

/// Input validation errors.
///
/// These occur when a request doesn't meet business requirements, and
/// are raised before any database work starts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

/// Convenience type alias for validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;
