use std::fmt;

use serde::Serialize;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Error,
}

/// A short-lived message reporting the result of a user action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.into(),
            message: message.into(),
        }
    }

    /// Error notice for a failed action. Validation and access messages are
    /// shown as-is; anything else is logged and replaced with `fallback`.
    pub fn from_error(error: &AppError, fallback: &str) -> Self {
        match error {
            AppError::Validation(message) => Self::error("Error", message.clone()),
            AppError::AccessDenied { .. } => Self::error("Access denied", error.to_string()),
            AppError::Auth(auth) if is_user_facing(auth) => {
                Self::error("Authentication failed", auth.to_string())
            }
            _ => {
                tracing::error!(error = %error, "{fallback}");
                Self::error("Error", fallback)
            }
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

fn is_user_facing(error: &rxlog_auth::AuthError) -> bool {
    use rxlog_auth::AuthError;
    matches!(
        error,
        AuthError::InvalidCredentials
            | AuthError::NotConfirmed(_)
            | AuthError::AccountExists(_)
            | AuthError::PasswordRejected(_)
    )
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}
