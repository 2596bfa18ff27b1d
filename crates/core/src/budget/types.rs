//! Budget data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Dashboard figures derived from the budget total and expense records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    /// Configured budget total.
    pub total: Decimal,
    /// Sum of cleared payments.
    pub spent: Decimal,
    /// `total - spent`; negative when overspent.
    pub remaining: Decimal,
    /// `spent / total`, or zero for a zero budget. Not clamped.
    pub progress_fraction: Decimal,
    /// Claims still awaiting a decision.
    pub pending_count: usize,
}

impl BudgetSummary {
    /// Progress clamped into `[0, 1]` for display.
    #[must_use]
    pub fn clamped_progress(&self) -> Decimal {
        self.progress_fraction.clamp(Decimal::ZERO, Decimal::ONE)
    }

    /// True when cleared payments exceed the total.
    #[must_use]
    pub fn is_overspent(&self) -> bool {
        self.remaining < Decimal::ZERO
    }
}
