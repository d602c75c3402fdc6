//! # Credit Ledger
//!
//! Settles outstanding store credit. Payments accumulate monotonically
//! into `amount_paid`; status is always recomputed from the owed/paid
//! pair, never set independently.
//!
//! Lookup is keyed by the credit's sale reference (`credits.sale_id`),
//! not the credit row's own id - the two are independent UUIDs.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::{EngineConfig, OverpaymentPolicy};
use crate::error::{EngineError, EngineResult};
use benta_core::{CreditStatus, Money, Principal};
use benta_db::{CreditRepository, Database, DbError};

/// Result of a successfully applied payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOutcome {
    pub sale_id: String,
    /// Outstanding balance after this payment. Negative on overpayment
    /// under [`OverpaymentPolicy::Allow`].
    pub remaining_cents: i64,
    pub status: CreditStatus,
}

impl PaymentOutcome {
    pub fn remaining(&self) -> Money {
        Money::from_cents(self.remaining_cents)
    }
}

/// Applies payments against credit sales.
///
/// Stateless between calls; clone freely.
#[derive(Debug, Clone)]
pub struct CreditLedger {
    db: Database,
    overpayment: OverpaymentPolicy,
}

impl CreditLedger {
    pub fn new(db: Database, config: &EngineConfig) -> Self {
        CreditLedger {
            db,
            overpayment: config.overpayment,
        }
    }

    /// Applies a payment to the credit of `sale_id`, atomically.
    ///
    /// - Non-positive amounts are rejected with `InvalidPaymentAmount`.
    /// - `CreditNotFound` when the sale has no credit ledger entry
    ///   (cash sale or unknown sale).
    /// - Under [`OverpaymentPolicy::Reject`], a payment larger than the
    ///   outstanding balance is `InvalidPaymentAmount`; under `Allow`
    ///   the balance may go negative.
    ///
    /// Returns the remaining balance and the recomputed status.
    pub async fn apply_payment(
        &self,
        principal: &Principal,
        sale_id: &str,
        amount: Money,
    ) -> EngineResult<PaymentOutcome> {
        if !principal.can_operate() {
            return Err(EngineError::Unauthorized {
                role: principal.role,
            });
        }

        if !amount.is_positive() {
            return Err(EngineError::InvalidPaymentAmount {
                reason: format!("payment must be positive, got {}", amount),
            });
        }

        let mut tx = self.db.pool().begin().await.map_err(DbError::from)?;

        let credit = CreditRepository::get_by_sale_id_tx(&mut *tx, sale_id)
            .await?
            .ok_or_else(|| EngineError::CreditNotFound(sale_id.to_string()))?;

        if self.overpayment == OverpaymentPolicy::Reject && amount > credit.remaining() {
            return Err(EngineError::InvalidPaymentAmount {
                reason: format!(
                    "payment {} exceeds outstanding balance {}",
                    amount,
                    credit.remaining()
                ),
            });
        }

        let new_paid = credit.amount_paid() + amount;
        let new_status = CreditStatus::for_balance(credit.amount_owed(), new_paid);

        let rows =
            CreditRepository::apply_payment(&mut *tx, &credit.id, amount.cents(), new_status)
                .await?;
        if rows == 0 {
            // Row vanished between read and update; cannot happen under
            // the transaction's write lock, but fail loudly if it does.
            return Err(EngineError::CreditNotFound(sale_id.to_string()));
        }

        tx.commit().await.map_err(DbError::from)?;

        let remaining = credit.amount_owed() - new_paid;

        info!(
            sale_id = %sale_id,
            credit_id = %credit.id,
            amount = %amount,
            remaining = %remaining,
            status = ?new_status,
            user = %principal.username,
            "Credit payment applied"
        );

        // Best-effort audit trail; the payment stands even if this fails.
        let event = format!("Payment {} applied to credit {}", amount, credit.id);
        if let Err(err) = self.db.logs().append(&event).await {
            warn!(credit_id = %credit.id, error = %err, "Audit log write failed after commit");
        }

        Ok(PaymentOutcome {
            sale_id: sale_id.to_string(),
            remaining_cents: remaining.cents(),
            status: new_status,
        })
    }
}
