//! Status lifecycle rules.
//!
//! Validates a requested status change against the transition graph and the
//! session's role, and produces the partial update to persist.

use super::error::ExpenseError;
use super::types::{
    ExpenseAction, ExpenseRecord, ExpenseStatus, ExpenseUpdate, TransitionExtras,
};
use crate::session::{AccessDenied, Role};

/// Stateless transition engine.
pub struct ExpenseLifecycle;

impl ExpenseLifecycle {
    /// Returns true if `from → to` is an edge of the lifecycle.
    #[must_use]
    pub fn is_allowed(from: ExpenseStatus, to: ExpenseStatus) -> bool {
        matches!(
            (from, to),
            (
                ExpenseStatus::Pending,
                ExpenseStatus::Approved | ExpenseStatus::Rejected
            ) | (ExpenseStatus::Approved, ExpenseStatus::PaymentCleared)
        )
    }

    /// Role needed to move a record into `target`.
    ///
    /// `Pending` is only ever set at creation, so no role can request it.
    #[must_use]
    pub fn required_role(target: ExpenseStatus) -> Option<Role> {
        match target {
            ExpenseStatus::Pending => None,
            ExpenseStatus::Approved | ExpenseStatus::Rejected | ExpenseStatus::PaymentCleared => {
                Some(Role::Treasurer)
            }
        }
    }

    /// Validates a transition and returns the update to persist.
    ///
    /// Checks run in order: role, then edge, then supplied fields.
    ///
    /// # Errors
    ///
    /// - `PermissionDenied` if `role` lacks authority for `target`
    /// - `InvalidTransition` if `record.status → target` is not an edge
    /// - `Validation` if clearing payment without proof, if proof is already
    ///   attached, or if proof is supplied for any other transition
    pub fn plan(
        record: &ExpenseRecord,
        target: ExpenseStatus,
        extras: TransitionExtras,
        role: Option<Role>,
    ) -> Result<ExpenseUpdate, ExpenseError> {
        if let Some(required) = Self::required_role(target) {
            if role != Some(required) {
                return Err(AccessDenied {
                    required: Some(required),
                    actual: role,
                }
                .into());
            }
        }

        if !Self::is_allowed(record.status, target) {
            return Err(ExpenseError::InvalidTransition {
                from: record.status,
                to: target,
            });
        }

        let payment_proof_image = match (target, extras.payment_proof_image) {
            (ExpenseStatus::PaymentCleared, None) => {
                return Err(ExpenseError::validation(
                    "payment proof image is required to clear payment",
                ));
            }
            (ExpenseStatus::PaymentCleared, Some(_)) if record.payment_proof_image.is_some() => {
                return Err(ExpenseError::validation(
                    "payment proof is already attached",
                ));
            }
            (ExpenseStatus::PaymentCleared, Some(proof)) => Some(proof),
            (_, Some(_)) => {
                return Err(ExpenseError::validation(
                    "payment proof is only accepted when clearing payment",
                ));
            }
            (_, None) => None,
        };

        Ok(ExpenseUpdate {
            status: target,
            payment_proof_image,
        })
    }

    /// Actions offered to a session with `role` on a record in `status`.
    #[must_use]
    pub fn available_actions(status: ExpenseStatus, role: Option<Role>) -> &'static [ExpenseAction] {
        match (role, status) {
            (Some(Role::Treasurer), ExpenseStatus::Pending) => {
                &[ExpenseAction::Approve, ExpenseAction::Reject]
            }
            (Some(Role::Treasurer), ExpenseStatus::Approved) => &[ExpenseAction::MarkPaid],
            _ => &[],
        }
    }
}
