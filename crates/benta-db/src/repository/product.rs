//! # Product Repository
//!
//! Database operations for products: CRUD, low-stock listing, and the
//! transaction-scoped stock decrements the sale engine drives.
//!
//! ## Stock Update Strategy
//! ```text
//! Absolute update (racy):   UPDATE products SET stock = 7 WHERE id = ?
//! Delta update (safe):      UPDATE products SET stock = stock - 3 ...
//! ```
//! Decrements are always deltas, computed inside the database, so two
//! concurrent sales of the same product can never read-modify-write
//! each other's stock away. The guarded variant additionally refuses to
//! take stock below zero in the same statement.

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use benta_core::Product;

const PRODUCT_COLUMNS: &str = "id, name, description, category, price_cents, stock, created_at";

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists all products, ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Gets a product by its id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Lists products whose stock has fallen below `threshold`.
    ///
    /// Feeds the low-stock warning the storefront shows alongside the
    /// product listing.
    pub async fn low_stock(&self, threshold: i64) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE stock < ?1 ORDER BY stock, name"
        ))
        .bind(threshold)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Inserts a new product.
    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, name = %product.name, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (id, name, description, category, price_cents, stock, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.category)
        .bind(product.price_cents)
        .bind(product.stock)
        .bind(product.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates an existing product's editable fields.
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                description = ?3,
                category = ?4,
                price_cents = ?5,
                stock = ?6
            WHERE id = ?1
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.category)
        .bind(product.price_cents)
        .bind(product.stock)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", &product.id));
        }

        Ok(())
    }

    /// Adjusts stock by a delta outside any sale (restocks, corrections).
    pub async fn update_stock(&self, id: &str, delta: i64) -> DbResult<()> {
        debug!(id = %id, delta = %delta, "Adjusting stock");

        let result = sqlx::query("UPDATE products SET stock = stock + ?2 WHERE id = ?1")
            .bind(id)
            .bind(delta)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Deletes a product.
    ///
    /// Fails with a foreign key violation if any sale item references
    /// it; sales history wins over deletion.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts products (for diagnostics and the seed tool).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    // =========================================================================
    // Transaction helpers (caller owns the transaction)
    // =========================================================================

    /// Reads a product's stock on the caller's transaction connection.
    ///
    /// Used to distinguish "no such product" from "not enough stock"
    /// after a guarded decrement touches zero rows.
    pub async fn stock_of(conn: &mut SqliteConnection, id: &str) -> DbResult<Option<i64>> {
        let stock: Option<i64> = sqlx::query_scalar("SELECT stock FROM products WHERE id = ?1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(stock)
    }

    /// Decrements stock only if enough is on hand.
    ///
    /// Returns the number of rows affected: 1 when the decrement
    /// applied, 0 when the product is missing OR stock would go
    /// negative. The guard and the write are one statement, so
    /// concurrent transactions cannot both pass the check.
    pub async fn decrement_stock_guarded(
        conn: &mut SqliteConnection,
        id: &str,
        quantity: i64,
    ) -> DbResult<u64> {
        let result = sqlx::query(
            "UPDATE products SET stock = stock - ?2 WHERE id = ?1 AND stock >= ?2",
        )
        .bind(id)
        .bind(quantity)
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected())
    }

    /// Decrements stock unconditionally; stock may go negative.
    ///
    /// Returns rows affected (0 means the product is missing).
    pub async fn decrement_stock(
        conn: &mut SqliteConnection,
        id: &str,
        quantity: i64,
    ) -> DbResult<u64> {
        let result = sqlx::query("UPDATE products SET stock = stock - ?2 WHERE id = ?1")
            .bind(id)
            .bind(quantity)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected())
    }
}

/// Helper to generate a new product id.
pub fn generate_product_id() -> String {
    Uuid::new_v4().to_string()
}
