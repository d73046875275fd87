use std::fmt;
use std::future::Future;

use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Tokens issued by the identity provider for one signed-in user.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Tokens {
    pub access_token: String,
    pub id_token: String,
    pub refresh_token: String,
    pub expires_at: Timestamp,
}

impl Tokens {
    /// Expiry `lifetime_secs` from `issued_at`, saturating at the far end of
    /// the timestamp range.
    pub fn expiry(issued_at: Timestamp, lifetime_secs: i64) -> Timestamp {
        issued_at
            .checked_add(SignedDuration::from_secs(lifetime_secs))
            .unwrap_or(Timestamp::MAX)
    }

    pub fn is_expired(&self, now: Timestamp) -> bool {
        now >= self.expires_at
    }
}

impl fmt::Debug for Tokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokens")
            .field("access_token", &"<redacted>")
            .field("id_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Result of a successful sign-in: the provider's stable user identifier
/// plus fresh tokens.
#[derive(Debug, Clone)]
pub struct SignedIn {
    pub user_id: String,
    pub tokens: Tokens,
}

/// Email/password identity provider.
pub trait AuthProvider: Send + Sync {
    /// Register a new identity. Returns the provider's user identifier, which
    /// is also the key of the user's document.
    fn sign_up(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<String, AuthError>> + Send;

    fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<SignedIn, AuthError>> + Send;

    /// Exchange a refresh token for new tokens.
    fn refresh(&self, refresh_token: &str)
    -> impl Future<Output = Result<Tokens, AuthError>> + Send;

    /// Revoke every token issued to the holder of `access_token`.
    fn sign_out(&self, access_token: &str) -> impl Future<Output = Result<(), AuthError>> + Send;
}
