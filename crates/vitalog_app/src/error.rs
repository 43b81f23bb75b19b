//! Application error taxonomy.

use crate::domains::record::ProfileError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Collaborator failure: configuration, network, or an explicit
    /// provider rejection. The message is shown to the user as-is.
    #[error("{0}")]
    Client(#[from] vitalog_client::ClientError),

    #[error("validation error: {0}")]
    Validation(#[from] ProfileError),

    #[error("not authenticated")]
    NotAuthenticated,

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<String> for AppError {
    fn from(err: String) -> Self {
        AppError::Internal(err)
    }
}

/// Result type alias for application operations.
pub type AppResult<T> = Result<T, AppError>;
