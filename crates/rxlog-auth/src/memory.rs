use std::collections::HashMap;
use std::sync::Arc;

use jiff::Timestamp;
use rxlog_core::keys;
use tokio::sync::Mutex;

use crate::error::AuthError;
use crate::provider::{AuthProvider, SignedIn, Tokens};

const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 3600;

/// Process-local identity provider for tests and offline runs. Clones share
/// the same accounts.
#[derive(Clone)]
pub struct MemoryAuth {
    inner: Arc<Mutex<Inner>>,
}

struct Account {
    user_id: String,
    password: String,
}

struct Inner {
    accounts: HashMap<String, Account>,
    /// access token → user id
    access: HashMap<String, String>,
    /// refresh token → user id
    refresh: HashMap<String, String>,
    token_lifetime_secs: i64,
    issued: u64,
}

impl Default for MemoryAuth {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                accounts: HashMap::new(),
                access: HashMap::new(),
                refresh: HashMap::new(),
                token_lifetime_secs: DEFAULT_TOKEN_LIFETIME_SECS,
                issued: 0,
            })),
        }
    }
}

impl MemoryAuth {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lifetime of tokens issued from now on. Zero or negative issues tokens
    /// that are already expired.
    pub async fn set_token_lifetime(&self, secs: i64) {
        self.inner.lock().await.token_lifetime_secs = secs;
    }

    /// Register an account under a chosen user id.
    pub async fn register(&self, user_id: &str, email: &str, password: &str) {
        self.inner.lock().await.accounts.insert(
            email.to_string(),
            Account {
                user_id: user_id.to_string(),
                password: password.to_string(),
            },
        );
    }

    pub async fn active_tokens(&self) -> usize {
        self.inner.lock().await.access.len()
    }
}

impl Inner {
    fn issue(&mut self, user_id: &str, refresh_token: Option<&str>) -> Tokens {
        self.issued += 1;
        let access_token = format!("access-{}", self.issued);
        let refresh_token = match refresh_token {
            Some(token) => token.to_string(),
            None => format!("refresh-{}", self.issued),
        };
        self.access.insert(access_token.clone(), user_id.to_string());
        self.refresh.insert(refresh_token.clone(), user_id.to_string());

        Tokens {
            access_token,
            id_token: format!("id-{}", self.issued),
            refresh_token,
            expires_at: Tokens::expiry(Timestamp::now(), self.token_lifetime_secs),
        }
    }
}

impl AuthProvider for MemoryAuth {
    async fn sign_up(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let mut inner = self.inner.lock().await;
        if inner.accounts.contains_key(email) {
            return Err(AuthError::AccountExists(email.to_string()));
        }
        if password.len() < 6 {
            return Err(AuthError::PasswordRejected(
                "password must be at least 6 characters".to_string(),
            ));
        }

        let user_id = keys::new_id();
        inner.accounts.insert(
            email.to_string(),
            Account {
                user_id: user_id.clone(),
                password: password.to_string(),
            },
        );
        Ok(user_id)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<SignedIn, AuthError> {
        let mut inner = self.inner.lock().await;
        let user_id = match inner.accounts.get(email) {
            Some(account) if account.password == password => account.user_id.clone(),
            _ => return Err(AuthError::InvalidCredentials),
        };
        let tokens = inner.issue(&user_id, None);
        Ok(SignedIn { user_id, tokens })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Tokens, AuthError> {
        let mut inner = self.inner.lock().await;
        let user_id = inner
            .refresh
            .get(refresh_token)
            .cloned()
            .ok_or_else(|| AuthError::InvalidToken("refresh token rejected".to_string()))?;
        Ok(inner.issue(&user_id, Some(refresh_token)))
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let mut inner = self.inner.lock().await;
        let user_id = inner
            .access
            .get(access_token)
            .cloned()
            .ok_or_else(|| AuthError::InvalidToken("unknown access token".to_string()))?;
        inner.access.retain(|_, owner| *owner != user_id);
        inner.refresh.retain(|_, owner| *owner != user_id);
        Ok(())
    }
}
