//! Application-wide error types.
//!
//! Every domain error folds into [`AppError`] before it reaches a caller, so a
//! screen or command only ever sees one failed outcome with a readable message.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or missing required input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The session's role lacks authority for the attempted mutation.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// The requested status change is not an edge of the lifecycle.
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// Referenced record is absent.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Store unreachable or write failed.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the process exit code for this error (sysexits.h values).
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) | Self::InvalidTransition(_) => 65,
            Self::NotFound(_) => 66,
            Self::Persistence(_) => 69,
            Self::Internal(_) => 70,
            Self::PermissionDenied(_) => 77,
            Self::Config(_) => 78,
        }
    }

    /// Returns the stable error code for machine-readable output.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::PermissionDenied(_) => "PERMISSION_DENIED",
            Self::InvalidTransition(_) => "INVALID_TRANSITION",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Persistence(_) => "PERSISTENCE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<crate::types::AmountError> for AppError {
    fn from(err: crate::types::AmountError) -> Self {
        Self::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_exit_codes() {
        assert_eq!(AppError::Validation(String::new()).exit_code(), 65);
        assert_eq!(AppError::InvalidTransition(String::new()).exit_code(), 65);
        assert_eq!(AppError::NotFound(String::new()).exit_code(), 66);
        assert_eq!(AppError::Persistence(String::new()).exit_code(), 69);
        assert_eq!(AppError::Internal(String::new()).exit_code(), 70);
        assert_eq!(AppError::PermissionDenied(String::new()).exit_code(), 77);
        assert_eq!(AppError::Config(String::new()).exit_code(), 78);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::Validation(String::new()).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(
            AppError::PermissionDenied(String::new()).error_code(),
            "PERMISSION_DENIED"
        );
        assert_eq!(
            AppError::InvalidTransition(String::new()).error_code(),
            "INVALID_TRANSITION"
        );
        assert_eq!(AppError::NotFound(String::new()).error_code(), "NOT_FOUND");
        assert_eq!(
            AppError::Persistence(String::new()).error_code(),
            "PERSISTENCE_ERROR"
        );
        assert_eq!(AppError::Config(String::new()).error_code(), "CONFIG_ERROR");
        assert_eq!(
            AppError::Internal(String::new()).error_code(),
            "INTERNAL_ERROR"
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::Validation("msg".into()).to_string(),
            "Validation error: msg"
        );
        assert_eq!(
            AppError::PermissionDenied("msg".into()).to_string(),
            "Permission denied: msg"
        );
        assert_eq!(
            AppError::InvalidTransition("msg".into()).to_string(),
            "Invalid transition: msg"
        );
        assert_eq!(
            AppError::NotFound("msg".into()).to_string(),
            "Not found: msg"
        );
        assert_eq!(
            AppError::Persistence("msg".into()).to_string(),
            "Persistence error: msg"
        );
    }

    #[test]
    fn test_amount_error_becomes_validation() {
        let err: AppError = crate::types::AmountError::Empty.into();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(err.to_string(), "Validation error: amount is required");
    }
}
