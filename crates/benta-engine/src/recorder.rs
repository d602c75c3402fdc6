//! # Sale Recorder
//!
//! Converts a cart into a sale record, line item snapshots, stock
//! decrements and (for credit sales) a credit ledger entry - all as one
//! atomic database transaction.
//!
//! ## Transaction Shape
//! ```text
//! BEGIN
//!   ├── customer existence check (when a customer is attached)
//!   ├── INSERT sales row
//!   ├── per line: INSERT sale_items snapshot, stock decrement
//!   ├── credit sales: INSERT credits row,
//!   │                 customers.total_purchases += total
//! COMMIT            ── any failure above rolls back everything
//!   └── audit log append (best-effort, AFTER commit; a failure here
//!       never undoes the sale)
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::stock::StockManager;
use benta_core::validation::{validate_quantity, validate_sale_total, validate_unit_price};
use benta_core::{Credit, CreditStatus, Money, PaymentType, Principal, Sale, SaleItem};
use benta_db::repository::credit::generate_credit_id;
use benta_db::repository::sale::{generate_sale_id, generate_sale_item_id};
use benta_db::{CreditRepository, CustomerRepository, Database, DbError, SaleRepository};

// =============================================================================
// Request / Response DTOs
// =============================================================================

/// One cart line: which product, how many, and the unit price the
/// cashier charged (snapshotted onto the sale item).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleLine {
    pub product_id: String,
    pub quantity: i64,
    pub price_at_sale_cents: i64,
}

/// A cart to record.
///
/// `total_cents` is caller-supplied and trusted: it may fold in
/// discounts or taxes, so it need not equal the sum of line totals.
/// An empty item list is allowed and produces a sale with no lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRequest {
    pub customer_id: Option<String>,
    pub items: Vec<SaleLine>,
    pub total_cents: i64,
    pub payment_type: PaymentType,
}

/// Result of a successful recording.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedSale {
    pub sale_id: String,
    pub total_cents: i64,
    pub item_count: usize,
}

// =============================================================================
// Sale Recorder
// =============================================================================

/// Orchestrates atomic sale recording.
///
/// Stateless between calls; clone freely.
#[derive(Debug, Clone)]
pub struct SaleRecorder {
    db: Database,
    stock: StockManager,
}

impl SaleRecorder {
    pub fn new(db: Database, config: &EngineConfig) -> Self {
        SaleRecorder {
            db,
            stock: StockManager::new(config.stock),
        }
    }

    /// Records a sale as one atomic transaction.
    ///
    /// On any failure - unknown customer, unknown product, insufficient
    /// stock, store error - the transaction rolls back fully: no sale
    /// row, no items, no stock changes, no credit entry, no audit log.
    pub async fn record(
        &self,
        principal: &Principal,
        request: &SaleRequest,
    ) -> EngineResult<RecordedSale> {
        if !principal.can_operate() {
            return Err(EngineError::Unauthorized {
                role: principal.role,
            });
        }

        // Validate the whole cart before touching the database.
        validate_sale_total(Money::from_cents(request.total_cents))?;
        for line in &request.items {
            validate_quantity(line.quantity)?;
            validate_unit_price(Money::from_cents(line.price_at_sale_cents))?;
        }

        let mut tx = self.db.pool().begin().await.map_err(DbError::from)?;

        if let Some(customer_id) = &request.customer_id {
            if !CustomerRepository::exists(&mut *tx, customer_id).await? {
                return Err(EngineError::CustomerNotFound(customer_id.clone()));
            }
        }

        let now = Utc::now();
        let sale = Sale {
            id: generate_sale_id(),
            customer_id: request.customer_id.clone(),
            total_cents: request.total_cents,
            payment_type: request.payment_type,
            created_at: now,
        };
        SaleRepository::insert_sale(&mut *tx, &sale).await?;

        for line in &request.items {
            let item = SaleItem {
                id: generate_sale_item_id(),
                sale_id: sale.id.clone(),
                product_id: line.product_id.clone(),
                quantity: line.quantity,
                price_at_sale_cents: line.price_at_sale_cents,
                created_at: now,
            };
            SaleRepository::insert_item(&mut *tx, &item).await?;
            self.stock
                .decrement(&mut *tx, &line.product_id, line.quantity)
                .await?;
        }

        if request.payment_type == PaymentType::Credit {
            let credit = Credit {
                id: generate_credit_id(),
                customer_id: request.customer_id.clone(),
                sale_id: sale.id.clone(),
                amount_owed_cents: request.total_cents,
                amount_paid_cents: 0,
                status: CreditStatus::Unpaid,
                created_at: now,
            };
            CreditRepository::insert(&mut *tx, &credit).await?;

            // Only credit sales grow the customer's purchase
            // accumulator; it tracks what was historically taken on
            // credit, not lifetime spend.
            if let Some(customer_id) = &request.customer_id {
                CustomerRepository::add_total_purchases(&mut *tx, customer_id, request.total_cents)
                    .await?;
            }
        }

        tx.commit().await.map_err(DbError::from)?;

        info!(
            sale_id = %sale.id,
            total = %sale.total(),
            items = request.items.len(),
            payment_type = request.payment_type.as_str(),
            user = %principal.username,
            "Sale recorded"
        );

        // Best-effort audit trail; the sale stands even if this fails.
        let event = format!("Sale {} recorded ({})", sale.id, request.payment_type.as_str());
        if let Err(err) = self.db.logs().append(&event).await {
            warn!(sale_id = %sale.id, error = %err, "Audit log write failed after commit");
        }

        Ok(RecordedSale {
            sale_id: sale.id,
            total_cents: request.total_cents,
            item_count: request.items.len(),
        })
    }
}
