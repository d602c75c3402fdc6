//! # Sale Repository
//!
//! Database operations for sales and sale items.
//!
//! ## Sale Lifecycle
//! ```text
//! 1. ENGINE OPENS TRANSACTION
//!    └── insert_sale()            sale row (immutable once committed)
//!    └── insert_item() × N        snapshot rows, price frozen
//!    └── (stock decrements, optional credit row)
//! 2. ENGINE COMMITS - or the whole set vanishes on rollback
//! ```
//!
//! There is no draft state and no mutation of committed sales; the
//! engine writes a complete sale or nothing.

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use benta_core::{Sale, SaleItem};

const SALE_COLUMNS: &str = "id, customer_id, total_cents, payment_type, created_at";
const ITEM_COLUMNS: &str = "id, sale_id, product_id, quantity, price_at_sale_cents, created_at";

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Gets a sale by id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(&format!(
            "SELECT {SALE_COLUMNS} FROM sales WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Lists all sales, newest first.
    pub async fn list(&self) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(&format!(
            "SELECT {SALE_COLUMNS} FROM sales ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Gets all items for a sale, in insertion order.
    pub async fn get_items(&self, sale_id: &str) -> DbResult<Vec<SaleItem>> {
        let items = sqlx::query_as::<_, SaleItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM sale_items WHERE sale_id = ?1 ORDER BY created_at"
        ))
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Streams the (created_at, total_cents) pairs the report
    /// aggregator buckets. Chronological order.
    pub async fn totals_by_date(&self) -> DbResult<Vec<(DateTime<Utc>, i64)>> {
        let rows = sqlx::query_as::<_, (DateTime<Utc>, i64)>(
            "SELECT created_at, total_cents FROM sales ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    // =========================================================================
    // Transaction helpers (caller owns the transaction)
    // =========================================================================

    /// Inserts a sale row on the caller's transaction connection.
    pub async fn insert_sale(conn: &mut SqliteConnection, sale: &Sale) -> DbResult<()> {
        debug!(id = %sale.id, payment_type = sale.payment_type.as_str(), "Inserting sale");

        sqlx::query(
            r#"
            INSERT INTO sales (id, customer_id, total_cents, payment_type, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&sale.id)
        .bind(&sale.customer_id)
        .bind(sale.total_cents)
        .bind(sale.payment_type)
        .bind(sale.created_at)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    /// Inserts a sale item row on the caller's transaction connection.
    ///
    /// ## Snapshot Pattern
    /// `price_at_sale_cents` is written here and never rewritten; later
    /// product price edits cannot touch it.
    pub async fn insert_item(conn: &mut SqliteConnection, item: &SaleItem) -> DbResult<()> {
        debug!(sale_id = %item.sale_id, product_id = %item.product_id, "Inserting sale item");

        sqlx::query(
            r#"
            INSERT INTO sale_items (id, sale_id, product_id, quantity, price_at_sale_cents, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&item.id)
        .bind(&item.sale_id)
        .bind(&item.product_id)
        .bind(item.quantity)
        .bind(item.price_at_sale_cents)
        .bind(item.created_at)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }
}

/// Generates a new sale id.
pub fn generate_sale_id() -> String {
    Uuid::new_v4().to_string()
}

/// Generates a new sale item id.
pub fn generate_sale_item_id() -> String {
    Uuid::new_v4().to_string()
}
