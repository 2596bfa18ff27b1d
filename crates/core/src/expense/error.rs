//! Expense error types.
//!
//! The variants mirror the failure taxonomy every caller sees: bad input,
//! missing authority, a forbidden status edge, an absent record, or a store
//! that could not be reached.

use thiserror::Error;
use trackfest_shared::types::{AmountError, ExpenseId};
use trackfest_shared::AppError;

use crate::expense::types::ExpenseStatus;
use crate::session::AccessDenied;

/// Errors that can occur while submitting or transitioning expenses.
#[derive(Debug, Error)]
pub enum ExpenseError {
    /// Malformed or missing required input.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The session's role cannot perform the operation.
    #[error("Permission denied: {0}")]
    PermissionDenied(#[from] AccessDenied),

    /// Attempted a status change that is not an edge of the lifecycle.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: ExpenseStatus,
        /// The attempted target status.
        to: ExpenseStatus,
    },

    /// Expense not found.
    #[error("Expense {0} not found")]
    NotFound(ExpenseId),

    /// The record store was unreachable or the write failed.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl ExpenseError {
    /// Create a validation error.
    #[must_use]
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a persistence error.
    #[must_use]
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    /// Returns the error code for machine-readable output.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::PermissionDenied(_) => "PERMISSION_DENIED",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::NotFound(_) => "EXPENSE_NOT_FOUND",
            Self::Persistence(_) => "PERSISTENCE_ERROR",
        }
    }
}

impl From<AmountError> for ExpenseError {
    fn from(err: AmountError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<ExpenseError> for AppError {
    fn from(err: ExpenseError) -> Self {
        match err {
            ExpenseError::Validation(msg) => Self::Validation(msg),
            ExpenseError::PermissionDenied(denied) => Self::PermissionDenied(denied.to_string()),
            ExpenseError::InvalidTransition { .. } => Self::InvalidTransition(err.to_string()),
            ExpenseError::NotFound(id) => Self::NotFound(format!("expense {id}")),
            ExpenseError::Persistence(msg) => Self::Persistence(msg),
        }
    }
}
