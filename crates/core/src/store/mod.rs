//! Record store contracts.
//!
//! The store exclusively owns persisted expenses and the budget setting. These
//! traits are implemented by the db crate against Postgres and by
//! [`memory`] for tests and local runs. Writes are last-writer-wins.

pub mod memory;

use std::future::Future;

use rust_decimal::Decimal;
use trackfest_shared::types::ExpenseId;

use crate::budget::BudgetError;
use crate::expense::{ExpenseError, ExpenseRecord, ExpenseUpdate, NewExpense};

pub use memory::{InMemoryBudgetStore, InMemoryExpenseStore};

/// Persistence for expense records.
pub trait ExpenseStore: Send + Sync {
    /// Persists a new record as `Pending`, stamped with the store's time.
    fn create(
        &self,
        expense: NewExpense,
    ) -> impl Future<Output = Result<ExpenseId, ExpenseError>> + Send;

    /// Full snapshot ordered by creation time, newest first.
    fn list_all(&self) -> impl Future<Output = Result<Vec<ExpenseRecord>, ExpenseError>> + Send;

    /// Finds a record by id.
    fn find(
        &self,
        id: ExpenseId,
    ) -> impl Future<Output = Result<Option<ExpenseRecord>, ExpenseError>> + Send;

    /// Merges `update` into the stored record.
    ///
    /// Fails with `ExpenseError::NotFound` if `id` is absent.
    fn update(
        &self,
        id: ExpenseId,
        update: ExpenseUpdate,
    ) -> impl Future<Output = Result<(), ExpenseError>> + Send;
}

/// Persistence for the process-wide budget setting.
pub trait BudgetStore: Send + Sync {
    /// Reads the configured total, `None` if never set.
    fn load_total(&self) -> impl Future<Output = Result<Option<Decimal>, BudgetError>> + Send;

    /// Replaces the configured total.
    fn save_total(&self, total: Decimal) -> impl Future<Output = Result<(), BudgetError>> + Send;
}
