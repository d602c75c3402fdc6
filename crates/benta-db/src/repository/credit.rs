//! # Credit Repository
//!
//! Database operations for the credit ledger.
//!
//! Lookups are keyed by `sale_id`, the credit's actual sale reference.
//! The row's own primary key is never treated as an alias for the sale:
//! the two ids are independent UUIDs and will not coincide.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use benta_core::{Credit, CreditStatus, Money};
use chrono::{DateTime, Utc};

const CREDIT_COLUMNS: &str =
    "id, customer_id, sale_id, amount_owed_cents, amount_paid_cents, status, created_at";

/// A credit joined with its customer and sale context, for the
/// outstanding-balances view.
#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditSummary {
    pub id: String,
    pub sale_id: String,
    /// None for anonymous credit sales.
    pub customer_name: Option<String>,
    pub amount_owed_cents: i64,
    pub amount_paid_cents: i64,
    pub status: CreditStatus,
    pub sale_total_cents: i64,
    pub sale_created_at: DateTime<Utc>,
}

impl CreditSummary {
    /// Outstanding balance. Negative when overpaid.
    pub fn remaining(&self) -> Money {
        Money::from_cents(self.amount_owed_cents - self.amount_paid_cents)
    }
}

/// Repository for credit ledger operations.
#[derive(Debug, Clone)]
pub struct CreditRepository {
    pool: SqlitePool,
}

impl CreditRepository {
    pub fn new(pool: SqlitePool) -> Self {
        CreditRepository { pool }
    }

    /// Gets the credit for a sale, if the sale was taken on credit.
    pub async fn get_by_sale_id(&self, sale_id: &str) -> DbResult<Option<Credit>> {
        let credit = sqlx::query_as::<_, Credit>(&format!(
            "SELECT {CREDIT_COLUMNS} FROM credits WHERE sale_id = ?1"
        ))
        .bind(sale_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(credit)
    }

    /// Lists every credit with its customer and sale context, newest
    /// sale first.
    pub async fn list_summaries(&self) -> DbResult<Vec<CreditSummary>> {
        let summaries = sqlx::query_as::<_, CreditSummary>(
            r#"
            SELECT
                c.id,
                c.sale_id,
                cu.name AS customer_name,
                c.amount_owed_cents,
                c.amount_paid_cents,
                c.status,
                s.total_cents AS sale_total_cents,
                s.created_at AS sale_created_at
            FROM credits c
            INNER JOIN sales s ON s.id = c.sale_id
            LEFT JOIN customers cu ON cu.id = c.customer_id
            ORDER BY s.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(summaries)
    }

    // =========================================================================
    // Transaction helpers (caller owns the transaction)
    // =========================================================================

    /// Inserts a credit row on the caller's transaction connection.
    pub async fn insert(conn: &mut SqliteConnection, credit: &Credit) -> DbResult<()> {
        debug!(id = %credit.id, sale_id = %credit.sale_id, "Inserting credit");

        sqlx::query(&format!(
            "INSERT INTO credits ({CREDIT_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"
        ))
        .bind(&credit.id)
        .bind(&credit.customer_id)
        .bind(&credit.sale_id)
        .bind(credit.amount_owed_cents)
        .bind(credit.amount_paid_cents)
        .bind(credit.status)
        .bind(credit.created_at)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    /// Reads the credit for a sale inside the caller's transaction.
    ///
    /// SQLite's transaction write lock makes the read-then-update in
    /// the ledger safe; there is no separate row lock to take.
    pub async fn get_by_sale_id_tx(
        conn: &mut SqliteConnection,
        sale_id: &str,
    ) -> DbResult<Option<Credit>> {
        let credit = sqlx::query_as::<_, Credit>(&format!(
            "SELECT {CREDIT_COLUMNS} FROM credits WHERE sale_id = ?1"
        ))
        .bind(sale_id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(credit)
    }

    /// Accumulates a payment into a credit and stores the recomputed
    /// status, as one atomic statement on the transaction connection.
    ///
    /// `amount_paid_cents` only ever grows; `amount_owed_cents` is never
    /// written after insert.
    pub async fn apply_payment(
        conn: &mut SqliteConnection,
        credit_id: &str,
        amount_cents: i64,
        new_status: CreditStatus,
    ) -> DbResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE credits
            SET amount_paid_cents = amount_paid_cents + ?2,
                status = ?3
            WHERE id = ?1
            "#,
        )
        .bind(credit_id)
        .bind(amount_cents)
        .bind(new_status)
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected())
    }
}

/// Generates a new credit id.
pub fn generate_credit_id() -> String {
    Uuid::new_v4().to_string()
}
