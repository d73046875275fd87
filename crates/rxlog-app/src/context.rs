//! Everything a screen needs to talk to the outside world.

use rxlog_auth::{AuthProvider, Session, SessionStore, lifecycle};
use rxlog_storage::{Backend, DocumentStore};

use crate::error::AppError;
use crate::notice::Notice;

/// Backend repository, identity provider, and the on-disk session location.
///
/// There is no signed-in state here: callers hold the [`Session`] returned
/// by [`AppContext::sign_in`] / [`AppContext::restore`] and pass it to the
/// screens explicitly.
pub struct AppContext<A, S> {
    pub auth: A,
    pub backend: Backend<S>,
    pub sessions: SessionStore,
}

fn require(value: &str, message: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(message.to_string()));
    }
    Ok(())
}

impl<A: AuthProvider, S: DocumentStore> AppContext<A, S> {
    pub fn new(auth: A, store: S, sessions: SessionStore) -> Self {
        Self {
            auth,
            backend: Backend::new(store),
            sessions,
        }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, Notice> {
        self.try_sign_in(email, password)
            .await
            .map_err(|e| Notice::from_error(&e, "Failed to sign in"))
    }

    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<Session, Notice> {
        self.try_sign_up(email, password, full_name)
            .await
            .map_err(|e| Notice::from_error(&e, "Failed to create account"))
    }

    async fn try_sign_in(&self, email: &str, password: &str) -> Result<Session, AppError> {
        require(email, "Please enter your email")?;
        require(password, "Please enter your password")?;
        let session =
            lifecycle::sign_in(&self.auth, &self.backend, &self.sessions, email.trim(), password)
                .await?;
        Ok(session)
    }

    async fn try_sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<Session, AppError> {
        require(email, "Please enter your email")?;
        require(password, "Please enter a password")?;
        require(full_name, "Please enter your full name")?;
        let session = lifecycle::sign_up(
            &self.auth,
            &self.backend,
            &self.sessions,
            email.trim(),
            password,
            full_name.trim(),
        )
        .await?;
        Ok(session)
    }

    /// Rehydrate the persisted session. Any failure is logged and treated as
    /// signed out.
    pub async fn restore(&self) -> Option<Session> {
        match lifecycle::restore(&self.auth, &self.backend, &self.sessions).await {
            Ok(session) => session,
            Err(e) => {
                tracing::error!(error = %e, "could not restore session");
                None
            }
        }
    }

    pub async fn sign_out(&self, session: Session) -> Notice {
        match lifecycle::sign_out(&self.auth, &self.sessions, session).await {
            Ok(()) => Notice::success("Signed Out", "You have been logged out"),
            Err(e) => Notice::from_error(&AppError::from(e), "Failed to sign out"),
        }
    }
}
