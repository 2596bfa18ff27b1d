//! Spend aggregation.

use rust_decimal::Decimal;

use super::types::BudgetSummary;
use crate::expense::{ExpenseRecord, ExpenseStatus};

/// Computes dashboard figures for `total` over `records`.
///
/// Only `PaymentCleared` amounts count as spent; pending and approved claims
/// are not yet committed. The result does not depend on record order, and
/// sums saturate at `Decimal::MAX` instead of overflowing.
pub fn summarize<'a>(
    total: Decimal,
    records: impl IntoIterator<Item = &'a ExpenseRecord>,
) -> BudgetSummary {
    let mut spent = Decimal::ZERO;
    let mut pending_count = 0;

    for record in records {
        match record.status {
            ExpenseStatus::PaymentCleared => spent = spent.saturating_add(record.amount),
            ExpenseStatus::Pending => pending_count += 1,
            ExpenseStatus::Approved | ExpenseStatus::Rejected => {}
        }
    }

    let progress_fraction = if total > Decimal::ZERO {
        spent.checked_div(total).unwrap_or(Decimal::MAX)
    } else {
        Decimal::ZERO
    };

    BudgetSummary {
        total,
        spent,
        remaining: total.saturating_sub(spent),
        progress_fraction,
        pending_count,
    }
}
