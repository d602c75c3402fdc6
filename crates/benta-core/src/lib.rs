//! # benta-core: Pure Business Logic for Benta POS
//!
//! This crate is the heart of the Benta point-of-sale backend. It contains
//! the business rules of the till as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  API layer (excluded from this workspace)                       │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  benta-engine   SaleRecorder, CreditLedger, StockManager,       │
//! │                 ReportAggregator (owns transactions)            │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  ★ benta-core (THIS CRATE) ★                                    │
//! │                                                                 │
//! │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐             │
//! │   │  types  │ │  money  │ │  auth   │ │validation│             │
//! │   │ Product │ │  Money  │ │Principal│ │  rules   │             │
//! │   │  Sale   │ │ centavos│ │  Role   │ │  checks  │             │
//! │   └─────────┘ └─────────┘ └─────────┘ └──────────┘             │
//! │                                                                 │
//! │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  benta-db   SQLite queries, migrations, repositories            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Sale, Credit, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`auth`] - Authenticated principal and role checks
//! - [`error`] - Validation error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are centavos (i64), never floats
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

pub mod auth;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

pub use auth::{Principal, Role};
pub use error::{ValidationError, ValidationResult};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Stock level below which a product is reported as running low.
///
/// The storefront warns the owner when on-hand quantity drops under this
/// threshold so they can restock before selling out.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// Maximum quantity of a single product on one sale line.
///
/// Prevents accidental over-ordering (e.g. typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;
