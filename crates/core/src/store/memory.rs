//! In-memory record stores.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use trackfest_shared::types::ExpenseId;

use super::{BudgetStore, ExpenseStore};
use crate::budget::BudgetError;
use crate::expense::{ExpenseError, ExpenseRecord, ExpenseStatus, ExpenseUpdate, NewExpense};

#[derive(Debug, Default)]
struct ExpenseTable {
    records: HashMap<ExpenseId, ExpenseRecord>,
    last_created_at: Option<DateTime<Utc>>,
}

impl ExpenseTable {
    /// Wall-clock time, nudged forward so creation times strictly increase.
    fn next_timestamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let stamp = match self.last_created_at {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_created_at = Some(stamp);
        stamp
    }
}

/// Expense store held in process memory.
///
/// `set_offline(true)` makes every call fail with `Persistence`, standing in
/// for an unreachable backend.
#[derive(Debug, Default)]
pub struct InMemoryExpenseStore {
    table: RwLock<ExpenseTable>,
    offline: AtomicBool,
}

impl InMemoryExpenseStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggles simulated unavailability.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Inserts a complete record as-is, bypassing creation rules.
    pub async fn insert_snapshot(&self, record: ExpenseRecord) {
        let mut table = self.table.write().await;
        if table.last_created_at.is_none_or(|last| record.created_at > last) {
            table.last_created_at = Some(record.created_at);
        }
        table.records.insert(record.id, record);
    }

    fn ensure_online(&self) -> Result<(), ExpenseError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(ExpenseError::persistence("expense store is unreachable"));
        }
        Ok(())
    }
}

impl ExpenseStore for InMemoryExpenseStore {
    async fn create(&self, expense: NewExpense) -> Result<ExpenseId, ExpenseError> {
        self.ensure_online()?;
        let mut table = self.table.write().await;
        let id = ExpenseId::new();
        let created_at = table.next_timestamp();
        table.records.insert(
            id,
            ExpenseRecord {
                id,
                submitter_name: expense.submitter_name,
                title: expense.title,
                amount: expense.amount,
                description: expense.description,
                submitter_role: expense.submitter_role,
                status: ExpenseStatus::Pending,
                created_at,
                receipt_image: expense.receipt_image,
                payment_proof_image: None,
            },
        );
        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<ExpenseRecord>, ExpenseError> {
        self.ensure_online()?;
        let table = self.table.read().await;
        let mut records: Vec<ExpenseRecord> = table.records.values().cloned().collect();
        records.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(records)
    }

    async fn find(&self, id: ExpenseId) -> Result<Option<ExpenseRecord>, ExpenseError> {
        self.ensure_online()?;
        Ok(self.table.read().await.records.get(&id).cloned())
    }

    async fn update(&self, id: ExpenseId, update: ExpenseUpdate) -> Result<(), ExpenseError> {
        self.ensure_online()?;
        let mut table = self.table.write().await;
        let record = table
            .records
            .get_mut(&id)
            .ok_or(ExpenseError::NotFound(id))?;
        record.apply(&update);
        Ok(())
    }
}

/// Budget setting held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryBudgetStore {
    total: RwLock<Option<Decimal>>,
    offline: AtomicBool,
}

impl InMemoryBudgetStore {
    /// Creates a store with no budget set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggles simulated unavailability.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> Result<(), BudgetError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(BudgetError::persistence("budget store is unreachable"));
        }
        Ok(())
    }
}

impl BudgetStore for InMemoryBudgetStore {
    async fn load_total(&self) -> Result<Option<Decimal>, BudgetError> {
        self.ensure_online()?;
        Ok(*self.total.read().await)
    }

    async fn save_total(&self, total: Decimal) -> Result<(), BudgetError> {
        self.ensure_online()?;
        *self.total.write().await = Some(total);
        Ok(())
    }
}
