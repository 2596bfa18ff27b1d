//! Expense service: submission and status transitions against a store.

use std::sync::Arc;

use trackfest_shared::types::ExpenseId;

use super::error::ExpenseError;
use super::image::ImagePayload;
use super::lifecycle::ExpenseLifecycle;
use super::types::{ExpenseDraft, ExpensePolicy, ExpenseRecord, ExpenseStatus, TransitionExtras};
use crate::session::{KeyValueStore, SessionContext};
use crate::store::ExpenseStore;

/// Expense operations gated by the session's role.
///
/// Every mutation is a single store write, so a failure leaves the stored
/// record untouched.
pub struct ExpenseService<S: ExpenseStore, K: KeyValueStore> {
    store: Arc<S>,
    session: Arc<SessionContext<K>>,
    policy: ExpensePolicy,
}

impl<S: ExpenseStore, K: KeyValueStore> ExpenseService<S, K> {
    /// Create a new expense service.
    #[must_use]
    pub fn new(store: Arc<S>, session: Arc<SessionContext<K>>, policy: ExpensePolicy) -> Self {
        Self {
            store,
            session,
            policy,
        }
    }

    /// Validates and persists a new claim under the current session's role.
    ///
    /// # Errors
    ///
    /// - `PermissionDenied` if nobody is logged in
    /// - `Validation` if the draft is malformed; nothing is persisted
    /// - `Persistence` if the store write fails
    pub async fn submit(&self, draft: ExpenseDraft) -> Result<ExpenseId, ExpenseError> {
        let role = self.session.require_login().await?;
        let expense = self.policy.validate(draft, role)?;
        self.store.create(expense).await
    }

    /// Snapshot of every record, newest first.
    pub async fn list(&self) -> Result<Vec<ExpenseRecord>, ExpenseError> {
        self.store.list_all().await
    }

    /// Loads a single record.
    ///
    /// # Errors
    ///
    /// Returns `ExpenseError::NotFound` if the id is absent.
    pub async fn get(&self, id: ExpenseId) -> Result<ExpenseRecord, ExpenseError> {
        self.store
            .find(id)
            .await?
            .ok_or(ExpenseError::NotFound(id))
    }

    /// Moves `record` to `target` and persists the change.
    ///
    /// Returns the updated snapshot.
    ///
    /// # Errors
    ///
    /// - `PermissionDenied` unless the session is a treasurer
    /// - `InvalidTransition` for edges outside the lifecycle
    /// - `Validation` for missing, duplicate, misplaced, or oversized proof
    /// - `NotFound` if the record no longer exists in the store
    /// - `Persistence` if the store write fails
    pub async fn apply_transition(
        &self,
        record: &ExpenseRecord,
        target: ExpenseStatus,
        extras: TransitionExtras,
    ) -> Result<ExpenseRecord, ExpenseError> {
        let role = self.session.current_role().await;
        let update = ExpenseLifecycle::plan(record, target, extras, role)?;
        if let Some(proof) = &update.payment_proof_image {
            self.policy.check_image("payment proof", proof)?;
        }

        self.store.update(record.id, update.clone()).await?;

        let mut updated = record.clone();
        updated.apply(&update);
        Ok(updated)
    }

    /// Approves a pending claim.
    pub async fn approve(&self, id: ExpenseId) -> Result<ExpenseRecord, ExpenseError> {
        let record = self.get(id).await?;
        self.apply_transition(&record, ExpenseStatus::Approved, TransitionExtras::default())
            .await
    }

    /// Rejects a pending claim.
    pub async fn reject(&self, id: ExpenseId) -> Result<ExpenseRecord, ExpenseError> {
        let record = self.get(id).await?;
        self.apply_transition(&record, ExpenseStatus::Rejected, TransitionExtras::default())
            .await
    }

    /// Settles an approved claim, attaching proof of payment.
    pub async fn clear_payment(
        &self,
        id: ExpenseId,
        proof: ImagePayload,
    ) -> Result<ExpenseRecord, ExpenseError> {
        let record = self.get(id).await?;
        self.apply_transition(
            &record,
            ExpenseStatus::PaymentCleared,
            TransitionExtras::with_payment_proof(proof),
        )
        .await
    }

    /// The session this service checks roles against.
    pub fn session(&self) -> &SessionContext<K> {
        &self.session
    }
}
