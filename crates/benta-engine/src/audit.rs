//! # Audit Trail
//!
//! Admin-only read surface over the append-only event log the recorder
//! and ledger write to after their transactions commit. The engine
//! never edits or deletes entries; this is the one place they are read.

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use benta_core::{LogEntry, Principal};
use benta_db::Database;

/// Reads the append-only audit log.
///
/// Stateless between calls; clone freely.
#[derive(Debug, Clone)]
pub struct AuditTrail {
    db: Database,
}

impl AuditTrail {
    pub fn new(db: Database) -> Self {
        AuditTrail { db }
    }

    /// Lists audit entries, newest first.
    ///
    /// `Unauthorized` unless the principal's role carries the audit
    /// capability.
    pub async fn list(&self, principal: &Principal) -> EngineResult<Vec<LogEntry>> {
        if !principal.can_audit() {
            return Err(EngineError::Unauthorized {
                role: principal.role,
            });
        }

        debug!(user = %principal.username, "Listing audit trail");
        Ok(self.db.logs().list().await?)
    }
}
