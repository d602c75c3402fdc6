//! # Engine Configuration
//!
//! Business policies the deployment chooses explicitly instead of the
//! engine picking silently.

use serde::{Deserialize, Serialize};

/// What happens when a sale would take stock below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockPolicy {
    /// Refuse the sale with `InsufficientStock`. Stock never goes
    /// negative. Recommended and the default.
    Strict,
    /// Allow the decrement regardless; stock may go negative. Matches
    /// stores that record shelf sales after the fact and reconcile
    /// inventory later.
    Permissive,
}

impl Default for StockPolicy {
    fn default() -> Self {
        StockPolicy::Strict
    }
}

/// What happens when a credit payment exceeds the outstanding balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverpaymentPolicy {
    /// Accept the payment; the remaining balance goes negative and the
    /// credit reads as paid. The default.
    Allow,
    /// Reject with `InvalidPaymentAmount` when the payment is larger
    /// than what is owed.
    Reject,
}

impl Default for OverpaymentPolicy {
    fn default() -> Self {
        OverpaymentPolicy::Allow
    }
}

/// Engine-wide policy configuration.
///
/// ```rust
/// use benta_engine::config::{EngineConfig, StockPolicy, OverpaymentPolicy};
///
/// let config = EngineConfig::default()
///     .stock_policy(StockPolicy::Permissive)
///     .overpayment_policy(OverpaymentPolicy::Reject);
/// assert_eq!(config.stock, StockPolicy::Permissive);
/// ```
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    pub stock: StockPolicy,
    pub overpayment: OverpaymentPolicy,
}

impl EngineConfig {
    pub fn stock_policy(mut self, policy: StockPolicy) -> Self {
        self.stock = policy;
        self
    }

    pub fn overpayment_policy(mut self, policy: OverpaymentPolicy) -> Self {
        self.overpayment = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_strict_stock_allow_overpayment() {
        let config = EngineConfig::default();
        assert_eq!(config.stock, StockPolicy::Strict);
        assert_eq!(config.overpayment, OverpaymentPolicy::Allow);
    }
}
