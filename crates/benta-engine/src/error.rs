//! # Engine Error Types
//!
//! The error taxonomy every mutating operation surfaces to the API
//! layer. Each variant carries a machine-readable kind (stable
//! snake_case discriminant) and a human-readable message.
//!
//! ## Propagation
//! Any error raised inside a sale or payment transaction aborts the
//! whole transaction; callers never observe partial state. Audit-log
//! write failures are NOT part of this taxonomy - they are swallowed
//! after commit and only warned about.

use serde::Serialize;
use thiserror::Error;

use benta_core::{Role, ValidationError};
use benta_db::DbError;

/// Business errors of the transactional engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The principal's role does not permit this operation.
    #[error("role {role:?} is not permitted to perform this operation")]
    Unauthorized { role: Role },

    /// A sale line references a product that does not exist.
    #[error("product not found: {0}")]
    ProductNotFound(String),

    /// Decrement would take stock negative under the strict policy.
    #[error("insufficient stock for product {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: String,
        available: i64,
        requested: i64,
    },

    /// A supplied customer id does not exist.
    #[error("customer not found: {0}")]
    CustomerNotFound(String),

    /// No credit ledger entry exists for the given sale.
    #[error("no credit found for sale: {0}")]
    CreditNotFound(String),

    /// Payment amount fails the ledger's bounds.
    #[error("invalid payment amount: {reason}")]
    InvalidPaymentAmount { reason: String },

    /// Request input failed a business rule check.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Generic store failure; the transaction rolled back.
    #[error("transaction aborted: {0}")]
    TransactionAborted(#[from] DbError),
}

impl EngineError {
    /// Stable machine-readable discriminant for API payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::Unauthorized { .. } => "unauthorized",
            EngineError::ProductNotFound(_) => "product_not_found",
            EngineError::InsufficientStock { .. } => "insufficient_stock",
            EngineError::CustomerNotFound(_) => "customer_not_found",
            EngineError::CreditNotFound(_) => "credit_not_found",
            EngineError::InvalidPaymentAmount { .. } => "invalid_payment_amount",
            EngineError::Validation(_) => "validation",
            EngineError::TransactionAborted(_) => "transaction_aborted",
        }
    }

    /// Serializable failure payload for the API layer.
    pub fn to_payload(&self) -> ErrorPayload {
        ErrorPayload {
            kind: self.kind(),
            message: self.to_string(),
        }
    }
}

/// Machine-readable error kind plus human-readable message.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub kind: &'static str,
    pub message: String,
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_are_stable() {
        let err = EngineError::InsufficientStock {
            product_id: "p-1".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(err.kind(), "insufficient_stock");
        assert_eq!(
            err.to_string(),
            "insufficient stock for product p-1: available 3, requested 5"
        );
    }

    #[test]
    fn test_payload_serializes() {
        let err = EngineError::CreditNotFound("s-9".to_string());
        let json = serde_json::to_value(err.to_payload()).unwrap();
        assert_eq!(json["kind"], "credit_not_found");
        assert_eq!(json["message"], "no credit found for sale: s-9");
    }

    #[test]
    fn test_validation_errors_convert() {
        let err: EngineError = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        }
        .into();
        assert_eq!(err.kind(), "validation");
    }
}
