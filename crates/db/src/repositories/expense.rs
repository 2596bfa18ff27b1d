//! Expense repository for database operations.
//!
//! Implements [`ExpenseStore`] using SeaORM. The database assigns
//! `created_at`, so ordering follows server time.

use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryOrder, Set,
};
use tracing::{debug, info, warn};
use trackfest_core::expense::{
    ExpenseError, ExpenseRecord, ExpenseStatus, ExpenseUpdate, ImagePayload, NewExpense,
};
use trackfest_core::session::Role;
use trackfest_core::store::ExpenseStore;
use trackfest_shared::types::ExpenseId;

use crate::entities::expenses;
use crate::entities::sea_orm_active_enums::{
    ExpenseStatus as DbExpenseStatus, SubmitterRole as DbSubmitterRole,
};

/// Postgres-backed expense store.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    db: DatabaseConnection,
}

impl ExpenseRepository {
    /// Creates a new expense repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl ExpenseStore for ExpenseRepository {
    async fn create(&self, expense: NewExpense) -> Result<ExpenseId, ExpenseError> {
        let id = ExpenseId::new();
        let active_model = expenses::ActiveModel {
            id: Set(id.into_inner()),
            submitter_name: Set(expense.submitter_name),
            title: Set(expense.title),
            amount: Set(expense.amount),
            description: Set(expense.description),
            submitter_role: Set(to_db_role(expense.submitter_role)),
            status: Set(DbExpenseStatus::Pending),
            receipt_image: Set(expense.receipt_image.map(String::from)),
            payment_proof_image: Set(None),
            created_at: NotSet,
        };

        let model = active_model.insert(&self.db).await.map_err(db_error)?;
        info!(expense_id = %id, amount = %model.amount, "expense created");
        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<ExpenseRecord>, ExpenseError> {
        let models = expenses::Entity::find()
            .order_by_desc(expenses::Column::CreatedAt)
            .order_by_desc(expenses::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        debug!(count = models.len(), "expenses listed");
        models.into_iter().map(to_domain).collect()
    }

    async fn find(&self, id: ExpenseId) -> Result<Option<ExpenseRecord>, ExpenseError> {
        let model = expenses::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(db_error)?;

        debug!(expense_id = %id, found = model.is_some(), "expense lookup");
        model.map(to_domain).transpose()
    }

    async fn update(&self, id: ExpenseId, update: ExpenseUpdate) -> Result<(), ExpenseError> {
        let Some(model) = expenses::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(db_error)?
        else {
            warn!(expense_id = %id, "update for missing expense");
            return Err(ExpenseError::NotFound(id));
        };

        let keep_proof = model.payment_proof_image.is_some();
        let mut active_model = model.into_active_model();
        active_model.status = Set(to_db_status(update.status));
        if !keep_proof && let Some(proof) = update.payment_proof_image {
            active_model.payment_proof_image = Set(Some(proof.into()));
        }

        active_model.update(&self.db).await.map_err(db_error)?;
        info!(expense_id = %id, status = %update.status, "expense updated");
        Ok(())
    }
}

fn db_error(err: DbErr) -> ExpenseError {
    ExpenseError::persistence(err.to_string())
}

/// Convert domain status to database enum.
fn to_db_status(status: ExpenseStatus) -> DbExpenseStatus {
    match status {
        ExpenseStatus::Pending => DbExpenseStatus::Pending,
        ExpenseStatus::Approved => DbExpenseStatus::Approved,
        ExpenseStatus::Rejected => DbExpenseStatus::Rejected,
        ExpenseStatus::PaymentCleared => DbExpenseStatus::PaymentCleared,
    }
}

/// Convert database status to domain enum.
fn from_db_status(status: DbExpenseStatus) -> ExpenseStatus {
    match status {
        DbExpenseStatus::Pending => ExpenseStatus::Pending,
        DbExpenseStatus::Approved => ExpenseStatus::Approved,
        DbExpenseStatus::Rejected => ExpenseStatus::Rejected,
        DbExpenseStatus::PaymentCleared => ExpenseStatus::PaymentCleared,
    }
}

fn to_db_role(role: Role) -> DbSubmitterRole {
    match role {
        Role::Student => DbSubmitterRole::Student,
        Role::Treasurer => DbSubmitterRole::Treasurer,
    }
}

fn from_db_role(role: DbSubmitterRole) -> Role {
    match role {
        DbSubmitterRole::Student => Role::Student,
        DbSubmitterRole::Treasurer => Role::Treasurer,
    }
}

fn to_image(column: &str, value: Option<String>) -> Result<Option<ImagePayload>, ExpenseError> {
    value
        .map(ImagePayload::new)
        .transpose()
        .map_err(|err| ExpenseError::persistence(format!("stored {column} is unreadable: {err}")))
}

/// Convert database model to domain model.
///
/// `NUMERIC(19, 4)` pads scale, so amounts are normalized.
fn to_domain(model: expenses::Model) -> Result<ExpenseRecord, ExpenseError> {
    Ok(ExpenseRecord {
        id: ExpenseId::from_uuid(model.id),
        submitter_name: model.submitter_name,
        title: model.title,
        amount: model.amount.normalize(),
        description: model.description,
        submitter_role: from_db_role(model.submitter_role),
        status: from_db_status(model.status),
        created_at: model.created_at.with_timezone(&chrono::Utc),
        receipt_image: to_image("receipt_image", model.receipt_image)?,
        payment_proof_image: to_image("payment_proof_image", model.payment_proof_image)?,
    })
}
