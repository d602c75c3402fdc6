//! # Domain Types
//!
//! Core domain types used throughout Benta POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  Product ──────┐                                                │
//! │                │  snapshot at sale time                         │
//! │  Customer ──┐  ▼                                                │
//! │   (opt.)    │  SaleItem ◄──many── Sale ──1:1 (credit sales)──┐  │
//! │             └──────────────────────┘                         ▼  │
//! │                                                           Credit │
//! │                                                                 │
//! │  LogEntry: append-only audit trail, never read by the engine    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Entities carry UUID v4 string ids. Monetary columns are integer
//! centavos; helper methods lift them into [`Money`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Payment Type
// =============================================================================

/// How a sale was settled at the counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    /// Paid in full at the counter.
    Cash,
    /// Taken on store credit ("utang"); settled later through the
    /// credit ledger.
    Credit,
}

impl PaymentType {
    /// Stable lowercase name, matching the persisted representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentType::Cash => "cash",
            PaymentType::Credit => "credit",
        }
    }
}

// =============================================================================
// Credit Status
// =============================================================================

/// Settlement state of a credit ledger entry.
///
/// Status is never stored authoritative on its own: it is always the
/// pure function [`CreditStatus::for_balance`] of the owed/paid pair,
/// recomputed whenever a payment lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum CreditStatus {
    /// Nothing paid yet.
    Unpaid,
    /// Some payments accepted, balance still outstanding.
    PartiallyPaid,
    /// Fully settled (or overpaid).
    Paid,
}

impl CreditStatus {
    /// Derives the status from an owed/paid pair.
    ///
    /// ```rust
    /// use benta_core::money::Money;
    /// use benta_core::types::CreditStatus;
    ///
    /// let owed = Money::from_cents(10000);
    /// assert_eq!(CreditStatus::for_balance(owed, Money::zero()), CreditStatus::Unpaid);
    /// assert_eq!(
    ///     CreditStatus::for_balance(owed, Money::from_cents(4000)),
    ///     CreditStatus::PartiallyPaid
    /// );
    /// assert_eq!(
    ///     CreditStatus::for_balance(owed, Money::from_cents(10000)),
    ///     CreditStatus::Paid
    /// );
    /// ```
    pub fn for_balance(owed: Money, paid: Money) -> Self {
        if paid >= owed {
            CreditStatus::Paid
        } else if paid.is_positive() {
            CreditStatus::PartiallyPaid
        } else {
            CreditStatus::Unpaid
        }
    }
}

impl Default for CreditStatus {
    fn default() -> Self {
        CreditStatus::Unpaid
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product on the store's shelf.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown to the cashier.
    pub name: String,

    /// Optional free-text description.
    pub description: Option<String>,

    /// Optional category for grouping in listings.
    pub category: Option<String>,

    /// Unit price in centavos.
    pub price_cents: i64,

    /// On-hand stock quantity. The engine's stock policy decides
    /// whether this may go negative.
    pub stock: i64,

    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Returns the current unit price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Whether on-hand stock is below the low-stock warning threshold.
    pub fn is_low_stock(&self) -> bool {
        self.stock < crate::LOW_STOCK_THRESHOLD
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A known customer of the store.
///
/// `total_purchases_cents` accumulates only the totals of credit sales
/// attributed to this customer - it is the historical "total taken on
/// credit" figure, not lifetime spend. Cash sales never touch it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub contact_info: Option<String>,
    pub total_purchases_cents: i64,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    #[inline]
    pub fn total_purchases(&self) -> Money {
        Money::from_cents(self.total_purchases_cents)
    }
}

// =============================================================================
// Sale
// =============================================================================

/// One completed transaction converting cart items into revenue or credit.
///
/// Immutable once recorded; there are no compensating transactions.
/// `customer_id` is nullable - cash sales may be anonymous.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    pub id: String,
    pub customer_id: Option<String>,
    /// Caller-supplied total in centavos. May include discounts or
    /// taxes, so it need not equal the sum of line totals.
    pub total_cents: i64,
    pub payment_type: PaymentType,
    pub created_at: DateTime<Utc>,
}

impl Sale {
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Sale Item
// =============================================================================

/// A line item in a sale.
///
/// Uses the snapshot pattern: `price_at_sale_cents` freezes the unit
/// price at transaction time and is never re-read from the product, so
/// later price edits cannot rewrite sales history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleItem {
    pub id: String,
    pub sale_id: String,
    pub product_id: String,
    pub quantity: i64,
    /// Unit price in centavos at the moment of sale (frozen).
    pub price_at_sale_cents: i64,
    pub created_at: DateTime<Utc>,
}

impl SaleItem {
    /// Returns the frozen unit price as Money.
    #[inline]
    pub fn price_at_sale(&self) -> Money {
        Money::from_cents(self.price_at_sale_cents)
    }

    /// Line total: frozen unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price_at_sale().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Credit
// =============================================================================

/// A store-ledger liability: money a customer still owes for a credit sale.
///
/// 1:1 with a credit-type [`Sale`]. `amount_owed_cents` is fixed at the
/// sale's total when the row is created and never changes;
/// `amount_paid_cents` only ever increases.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Credit {
    pub id: String,
    pub customer_id: Option<String>,
    pub sale_id: String,
    pub amount_owed_cents: i64,
    pub amount_paid_cents: i64,
    pub status: CreditStatus,
    pub created_at: DateTime<Utc>,
}

impl Credit {
    #[inline]
    pub fn amount_owed(&self) -> Money {
        Money::from_cents(self.amount_owed_cents)
    }

    #[inline]
    pub fn amount_paid(&self) -> Money {
        Money::from_cents(self.amount_paid_cents)
    }

    /// Outstanding balance. Negative when overpaid.
    #[inline]
    pub fn remaining(&self) -> Money {
        self.amount_owed() - self.amount_paid()
    }

    /// Status as derived from the current owed/paid pair.
    #[inline]
    pub fn derived_status(&self) -> CreditStatus {
        CreditStatus::for_balance(self.amount_owed(), self.amount_paid())
    }
}

// =============================================================================
// Log Entry
// =============================================================================

/// An append-only audit trail entry.
///
/// Write-only from the engine's perspective: recorded best-effort after
/// a business transaction commits, listed only by the admin surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct LogEntry {
    pub id: i64,
    pub event: String,
    pub timestamp: DateTime<Utc>,
}
