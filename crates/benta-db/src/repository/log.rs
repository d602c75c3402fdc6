//! # Audit Log Repository
//!
//! Append-only audit trail.
//!
//! The engine writes entries best-effort AFTER a business transaction
//! commits; a failed append is logged and swallowed, never rolled back
//! into the business outcome. The engine never reads this table.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use benta_core::LogEntry;

/// Repository for the append-only audit log.
#[derive(Debug, Clone)]
pub struct LogRepository {
    pool: SqlitePool,
}

impl LogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        LogRepository { pool }
    }

    /// Appends an audit event with the current timestamp.
    pub async fn append(&self, event: &str) -> DbResult<()> {
        debug!(event = %event, "Appending audit log entry");

        sqlx::query("INSERT INTO logs (event, timestamp) VALUES (?1, ?2)")
            .bind(event)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Lists audit entries, newest first. Admin surface only.
    pub async fn list(&self) -> DbResult<Vec<LogEntry>> {
        let entries = sqlx::query_as::<_, LogEntry>(
            "SELECT id, event, timestamp FROM logs ORDER BY timestamp DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Counts audit entries.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM logs")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
