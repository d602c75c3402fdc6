//! # benta-db: Database Layer for Benta POS
//!
//! SQLite storage for the Benta point-of-sale backend, using sqlx for
//! async access.
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (product, customer,
//!   sale, credit, log)
//!
//! ## Transaction Convention
//!
//! Read-path repository methods take `&self` and run on the pool.
//! Write-path helpers that participate in a business transaction are
//! associated functions taking `&mut SqliteConnection`, so the engine
//! can thread one transaction through every statement and own the
//! commit/rollback decision. Nothing in this crate commits a business
//! transaction on its own.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use benta_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("benta.db")).await?;
//! let products = db.products().list().await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::credit::{CreditRepository, CreditSummary};
pub use repository::customer::CustomerRepository;
pub use repository::log::LogRepository;
pub use repository::product::ProductRepository;
pub use repository::sale::SaleRepository;
