//! # Stock Manager
//!
//! Validates and applies stock decrements as part of an enclosing sale
//! transaction. Internal to the engine: the only caller is the sale
//! recorder, and the decrement never commits on its own.

use sqlx::SqliteConnection;
use tracing::debug;

use crate::config::StockPolicy;
use crate::error::{EngineError, EngineResult};
use benta_db::ProductRepository;

/// Applies quantity decrements to product inventory under a configured
/// policy.
#[derive(Debug, Clone, Copy)]
pub struct StockManager {
    policy: StockPolicy,
}

impl StockManager {
    pub fn new(policy: StockPolicy) -> Self {
        StockManager { policy }
    }

    /// Decrements a product's stock on the caller's transaction
    /// connection.
    ///
    /// - `ProductNotFound` if no such product exists.
    /// - Under [`StockPolicy::Strict`], `InsufficientStock` if the
    ///   decrement would take stock negative. The guard and the write
    ///   are a single UPDATE, so two concurrent sales cannot both pass
    ///   the check and oversell.
    /// - Under [`StockPolicy::Permissive`], the decrement always
    ///   applies and stock may go negative.
    ///
    /// Quantity is validated positive by the recorder before this runs.
    pub async fn decrement(
        &self,
        conn: &mut SqliteConnection,
        product_id: &str,
        quantity: i64,
    ) -> EngineResult<()> {
        debug!(product_id = %product_id, quantity, policy = ?self.policy, "Decrementing stock");

        match self.policy {
            StockPolicy::Strict => {
                let rows =
                    ProductRepository::decrement_stock_guarded(conn, product_id, quantity).await?;
                if rows == 0 {
                    // Zero rows means missing product or not enough
                    // stock; one more read inside the same transaction
                    // tells them apart.
                    return match ProductRepository::stock_of(conn, product_id).await? {
                        None => Err(EngineError::ProductNotFound(product_id.to_string())),
                        Some(available) => Err(EngineError::InsufficientStock {
                            product_id: product_id.to_string(),
                            available,
                            requested: quantity,
                        }),
                    };
                }
                Ok(())
            }
            StockPolicy::Permissive => {
                let rows = ProductRepository::decrement_stock(conn, product_id, quantity).await?;
                if rows == 0 {
                    return Err(EngineError::ProductNotFound(product_id.to_string()));
                }
                Ok(())
            }
        }
    }
}
