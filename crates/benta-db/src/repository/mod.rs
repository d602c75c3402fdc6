//! # Repository Module
//!
//! Database repository implementations for Benta POS.
//!
//! ## Repository Pattern
//! Repositories keep all SQL in one place behind a clean API. Two kinds
//! of methods exist, by design:
//!
//! - **Pool methods** (`&self`): plain reads and standalone writes.
//!   Each runs on its own pooled connection.
//! - **Transaction helpers** (associated functions taking
//!   `&mut SqliteConnection`): statements that participate in a
//!   business transaction the engine owns. They never commit.
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - product CRUD, stock updates
//! - [`customer::CustomerRepository`] - customer CRUD, purchase totals
//! - [`sale::SaleRepository`] - sale + sale item rows, report feed
//! - [`credit::CreditRepository`] - credit ledger rows
//! - [`log::LogRepository`] - append-only audit trail

pub mod credit;
pub mod customer;
pub mod log;
pub mod product;
pub mod sale;
