//! Budget service for the treasurer-owned total.

use std::sync::Arc;

use rust_decimal::Decimal;
use trackfest_shared::types::parse_positive_amount;

use super::aggregate::summarize;
use super::error::BudgetError;
use super::types::BudgetSummary;
use crate::expense::ExpenseRecord;
use crate::session::{KeyValueStore, Role, SessionContext};
use crate::store::BudgetStore;

/// Budget service for business logic.
pub struct BudgetService<B: BudgetStore, K: KeyValueStore> {
    store: Arc<B>,
    session: Arc<SessionContext<K>>,
}

impl<B: BudgetStore, K: KeyValueStore> BudgetService<B, K> {
    /// Create a new budget service.
    #[must_use]
    pub fn new(store: Arc<B>, session: Arc<SessionContext<K>>) -> Self {
        Self { store, session }
    }

    /// Current total; zero when no budget has been set.
    pub async fn total(&self) -> Result<Decimal, BudgetError> {
        Ok(self.store.load_total().await?.unwrap_or(Decimal::ZERO))
    }

    /// Replaces the budget total with the parsed `input`.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::PermissionDenied` unless the session is a
    /// treasurer, `BudgetError::Validation` if `input` is not a positive
    /// number, and `BudgetError::Persistence` if the write fails. On any
    /// error the stored total is unchanged.
    pub async fn set_budget(&self, input: &str) -> Result<Decimal, BudgetError> {
        self.session.require(Role::Treasurer).await?;
        let total = parse_positive_amount(input)?;
        self.store.save_total(total).await?;
        Ok(total)
    }

    /// Loads the total and aggregates `records` against it.
    pub async fn summary<'a>(
        &self,
        records: impl IntoIterator<Item = &'a ExpenseRecord>,
    ) -> Result<BudgetSummary, BudgetError> {
        let total = self.total().await?;
        Ok(summarize(total, records))
    }
}
