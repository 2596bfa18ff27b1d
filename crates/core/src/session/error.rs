//! Session store error types.

use thiserror::Error;
use trackfest_shared::AppError;

/// Errors raised by the local key-value store.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading or writing the backing file failed.
    #[error("local session store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file does not hold a JSON string map.
    #[error("local session store is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

impl SessionError {
    /// Returns the error code for machine-readable output.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => "SESSION_STORE_IO",
            Self::Corrupt(_) => "SESSION_STORE_CORRUPT",
        }
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        Self::Persistence(err.to_string())
    }
}
