//! # benta-engine: Transactional Sale & Credit Engine
//!
//! The service layer of Benta POS. Every mutating business operation
//! runs inside one database transaction that this crate owns:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  recordSale(principal, cart)                                    │
//! │    └── BEGIN ── sale row + item snapshots + stock decrements    │
//! │                 (+ credit row, customer accumulator) ── COMMIT  │
//! │                                                                 │
//! │  applyCreditPayment(principal, saleId, amount)                  │
//! │    └── BEGIN ── paid += amount, status recomputed ── COMMIT     │
//! │                                                                 │
//! │  aggregateReport(principal, period)                             │
//! │    └── plain read, bucketed in Rust                             │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine holds no state between calls; multiple instances may run
//! against the same store, relying only on the store's transaction
//! isolation.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use benta_core::{Principal, Role};
//! use benta_db::{Database, DbConfig};
//! use benta_engine::{Engine, EngineConfig, SaleRequest};
//!
//! let db = Database::new(DbConfig::new("benta.db")).await?;
//! let engine = Engine::new(db, EngineConfig::default());
//!
//! let cashier = Principal::new("u-1", "aling-nena", Role::Owner);
//! let recorded = engine.sales().record(&cashier, &request).await?;
//! ```

pub mod audit;
pub mod config;
pub mod error;
pub mod ledger;
pub mod recorder;
pub mod reports;
pub mod stock;

pub use audit::AuditTrail;
pub use config::{EngineConfig, OverpaymentPolicy, StockPolicy};
pub use error::{EngineError, EngineResult, ErrorPayload};
pub use ledger::{CreditLedger, PaymentOutcome};
pub use recorder::{RecordedSale, SaleLine, SaleRecorder, SaleRequest};
pub use reports::{ReportAggregator, ReportBucket, ReportPeriod};
pub use stock::StockManager;

use benta_db::Database;

/// Facade bundling the engine's services over one database handle.
#[derive(Debug, Clone)]
pub struct Engine {
    db: Database,
    config: EngineConfig,
}

impl Engine {
    pub fn new(db: Database, config: EngineConfig) -> Self {
        Engine { db, config }
    }

    /// The underlying database handle, for the read-only surfaces
    /// (product/customer/sale/credit listings, audit trail).
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// The active policy configuration.
    pub fn config(&self) -> EngineConfig {
        self.config
    }

    /// Sale recording service.
    pub fn sales(&self) -> SaleRecorder {
        SaleRecorder::new(self.db.clone(), &self.config)
    }

    /// Credit settlement service.
    pub fn credits(&self) -> CreditLedger {
        CreditLedger::new(self.db.clone(), &self.config)
    }

    /// Report rollup service.
    pub fn reports(&self) -> ReportAggregator {
        ReportAggregator::new(self.db.clone())
    }

    /// Audit trail reader (admin only).
    pub fn audit(&self) -> AuditTrail {
        AuditTrail::new(self.db.clone())
    }
}
