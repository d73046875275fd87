//! Session lifecycle: sign-up, sign-in, restore at start-up, sign-out.

use jiff::Timestamp;
use rxlog_storage::{Backend, DocumentStore, StorageError};
use tracing::{info, warn};

use crate::error::AuthError;
use crate::provider::AuthProvider;
use crate::session::{Session, SessionStore};

/// Register a new account, write its user record, and sign it in.
pub async fn sign_up<A, S>(
    auth: &A,
    backend: &Backend<S>,
    sessions: &SessionStore,
    email: &str,
    password: &str,
    full_name: &str,
) -> Result<Session, AuthError>
where
    A: AuthProvider,
    S: DocumentStore,
{
    let user_id = match auth.sign_up(email, password).await {
        Ok(user_id) => user_id,
        Err(AuthError::AccountExists(existing)) => {
            return resume_sign_up(auth, backend, sessions, email, password, full_name)
                .await?
                .ok_or(AuthError::AccountExists(existing));
        }
        Err(e) => return Err(e),
    };
    backend.create_user(&user_id, email, full_name).await?;
    info!(user_id = %user_id, "account registered");

    sign_in(auth, backend, sessions, email, password).await
}

/// Finish a sign-up whose identity was registered but whose user record was
/// never written. Returns `None` when the account is complete or the
/// password does not match, so the caller reports the duplicate as usual.
async fn resume_sign_up<A, S>(
    auth: &A,
    backend: &Backend<S>,
    sessions: &SessionStore,
    email: &str,
    password: &str,
    full_name: &str,
) -> Result<Option<Session>, AuthError>
where
    A: AuthProvider,
    S: DocumentStore,
{
    let signed_in = match auth.sign_in(email, password).await {
        Ok(signed_in) => signed_in,
        Err(AuthError::InvalidCredentials) => return Ok(None),
        Err(e) => return Err(e),
    };

    match backend.get_user(&signed_in.user_id).await {
        Ok(_) => return Ok(None),
        Err(StorageError::NotFound { .. }) => {}
        Err(e) => return Err(e.into()),
    }

    warn!(user_id = %signed_in.user_id, "user record missing; completing sign-up");
    let user = backend.create_user(&signed_in.user_id, email, full_name).await?;

    let session = Session::new(user, signed_in.tokens);
    sessions.save(&session)?;
    info!(user_id = %session.user_id(), "account registered");
    Ok(Some(session))
}

/// Authenticate, load the user's record, and persist the new session.
pub async fn sign_in<A, S>(
    auth: &A,
    backend: &Backend<S>,
    sessions: &SessionStore,
    email: &str,
    password: &str,
) -> Result<Session, AuthError>
where
    A: AuthProvider,
    S: DocumentStore,
{
    let signed_in = auth.sign_in(email, password).await?;
    let user = backend.get_user(&signed_in.user_id).await?;

    let session = Session::new(user, signed_in.tokens);
    sessions.save(&session)?;
    info!(user_id = %session.user_id(), role = %session.role(), "signed in");
    Ok(session)
}

/// Rehydrate the persisted session at process start.
///
/// Expired tokens are refreshed once; a rejected refresh signs the user out.
/// The user record is re-read so role changes made since the last run take
/// effect. If the record cannot be fetched the cached copy is kept, unless
/// the record no longer exists.
pub async fn restore<A, S>(
    auth: &A,
    backend: &Backend<S>,
    sessions: &SessionStore,
) -> Result<Option<Session>, AuthError>
where
    A: AuthProvider,
    S: DocumentStore,
{
    let Some(mut session) = sessions.load()? else {
        return Ok(None);
    };

    if session.tokens.is_expired(Timestamp::now()) {
        match auth.refresh(&session.tokens.refresh_token).await {
            Ok(tokens) => session.tokens = tokens,
            Err(e @ (AuthError::InvalidToken(_) | AuthError::InvalidCredentials)) => {
                info!(user_id = %session.user_id(), error = %e, "stored session no longer valid");
                sessions.clear()?;
                return Ok(None);
            }
            Err(e) => return Err(e),
        }
    }

    match backend.get_user(session.user_id()).await {
        Ok(user) => session.user = user,
        Err(StorageError::NotFound { .. }) => {
            warn!(user_id = %session.user_id(), "user record removed; discarding session");
            sessions.clear()?;
            return Ok(None);
        }
        Err(e) => {
            warn!(user_id = %session.user_id(), error = %e, "using cached user record");
        }
    }

    sessions.save(&session)?;
    Ok(Some(session))
}

/// Tear the session down. The local copy is always removed; a failure to
/// revoke tokens with the provider is only logged.
pub async fn sign_out<A: AuthProvider>(
    auth: &A,
    sessions: &SessionStore,
    session: Session,
) -> Result<(), AuthError> {
    sessions.clear()?;

    if let Err(e) = auth.sign_out(&session.tokens.access_token).await {
        warn!(user_id = %session.user_id(), error = %e, "provider sign-out failed");
    }

    info!(user_id = %session.user_id(), "signed out");
    Ok(())
}
