//! Budget error types.

use thiserror::Error;
use trackfest_shared::AppError;
use trackfest_shared::types::AmountError;

use crate::session::AccessDenied;

/// Budget-related errors.
#[derive(Debug, Error)]
pub enum BudgetError {
    /// The new total is not a positive number.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Only treasurers may change the budget.
    #[error("Permission denied: {0}")]
    PermissionDenied(#[from] AccessDenied),

    /// The budget setting could not be read or written.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl BudgetError {
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
            Self::Persistence(_) => "PERSISTENCE_ERROR",
        }
    }
}

impl From<AmountError> for BudgetError {
    fn from(err: AmountError) -> Self {
        Self::Validation(format!("budget {err}"))
    }
}

impl From<BudgetError> for AppError {
    fn from(err: BudgetError) -> Self {
        match err {
            BudgetError::Validation(msg) => Self::Validation(msg),
            BudgetError::PermissionDenied(denied) => Self::PermissionDenied(denied.to_string()),
            BudgetError::Persistence(msg) => Self::Persistence(msg),
        }
    }
}
