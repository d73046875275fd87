use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    #[error("incorrect email or password")]
    InvalidCredentials,

    #[error("account not confirmed: {0}")]
    NotConfirmed(String),

    #[error("an account already exists for {0}")]
    AccountExists(String),

    #[error("password rejected: {0}")]
    PasswordRejected(String),

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("Cognito error: {0}")]
    Cognito(String),

    #[error(transparent)]
    Storage(#[from] rxlog_storage::StorageError),

    #[error("session file error: {0}")]
    SessionFile(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
