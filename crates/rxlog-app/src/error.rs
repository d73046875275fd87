use rxlog_auth::AuthError;
use rxlog_core::models::Role;
use rxlog_storage::StorageError;
use thiserror::Error;

/// Errors surfaced by screens and actions.
#[derive(Debug, Error)]
pub enum AppError {
    /// User input rejected before any network call.
    #[error("{0}")]
    Validation(String),

    #[error("{required} access required")]
    AccessDenied { required: Role },

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}
