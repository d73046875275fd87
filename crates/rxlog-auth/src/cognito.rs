use std::collections::HashMap;

use aws_sdk_cognitoidentityprovider::Client;
use aws_sdk_cognitoidentityprovider::types::{AttributeType, AuthFlowType, AuthenticationResultType};
use jiff::Timestamp;
use tracing::info;

use crate::error::AuthError;
use crate::provider::{AuthProvider, SignedIn, Tokens};

/// Cognito user pool accessed through a public app client
/// (`USER_PASSWORD_AUTH` flow enabled, no client secret).
#[derive(Clone)]
pub struct CognitoAuth {
    client: Client,
    user_pool_client_id: String,
}

impl CognitoAuth {
    pub fn new(client: Client, user_pool_client_id: impl Into<String>) -> Self {
        Self {
            client,
            user_pool_client_id: user_pool_client_id.into(),
        }
    }

    /// Resolve the pool's stable `sub` for the holder of an access token.
    async fn subject(&self, access_token: &str) -> Result<String, AuthError> {
        let resp = self
            .client
            .get_user()
            .access_token(access_token)
            .send()
            .await
            .map_err(|e| AuthError::Cognito(e.into_service_error().to_string()))?;

        resp.user_attributes()
            .iter()
            .find(|a| a.name() == "sub")
            .and_then(|a| a.value())
            .map(str::to_string)
            .ok_or_else(|| AuthError::AuthFailed("user has no sub attribute".to_string()))
    }
}

fn tokens_from(
    result: &AuthenticationResultType,
    fallback_refresh: Option<&str>,
) -> Result<Tokens, AuthError> {
    let access_token = result
        .access_token()
        .ok_or_else(|| AuthError::AuthFailed("no access token returned".to_string()))?;

    Ok(Tokens {
        access_token: access_token.to_string(),
        id_token: result.id_token().unwrap_or_default().to_string(),
        // Refresh token is not returned on refresh
        refresh_token: result
            .refresh_token()
            .or(fallback_refresh)
            .unwrap_or_default()
            .to_string(),
        expires_at: Tokens::expiry(Timestamp::now(), i64::from(result.expires_in())),
    })
}

impl AuthProvider for CognitoAuth {
    async fn sign_up(&self, email: &str, password: &str) -> Result<String, AuthError> {
        info!(email = email, "signing up");

        let email_attribute = AttributeType::builder()
            .name("email")
            .value(email)
            .build()
            .map_err(|e| AuthError::Cognito(e.to_string()))?;

        let resp = self
            .client
            .sign_up()
            .client_id(&self.user_pool_client_id)
            .username(email)
            .password(password)
            .user_attributes(email_attribute)
            .send()
            .await
            .map_err(|e| {
                let err = e.into_service_error();
                if err.is_username_exists_exception() {
                    AuthError::AccountExists(email.to_string())
                } else if err.is_invalid_password_exception() {
                    AuthError::PasswordRejected(err.to_string())
                } else {
                    AuthError::Cognito(err.to_string())
                }
            })?;

        Ok(resp.user_sub().to_string())
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<SignedIn, AuthError> {
        info!(email = email, "initiating auth");

        let mut auth_params = HashMap::new();
        auth_params.insert("USERNAME".to_string(), email.to_string());
        auth_params.insert("PASSWORD".to_string(), password.to_string());

        let resp = self
            .client
            .initiate_auth()
            .auth_flow(AuthFlowType::UserPasswordAuth)
            .client_id(&self.user_pool_client_id)
            .set_auth_parameters(Some(auth_params))
            .send()
            .await
            .map_err(|e| {
                let err = e.into_service_error();
                if err.is_not_authorized_exception() || err.is_user_not_found_exception() {
                    AuthError::InvalidCredentials
                } else if err.is_user_not_confirmed_exception() {
                    AuthError::NotConfirmed(email.to_string())
                } else {
                    AuthError::Cognito(err.to_string())
                }
            })?;

        let Some(result) = resp.authentication_result() else {
            // MFA and other challenges are not configured for this pool
            let challenge = resp
                .challenge_name()
                .map(|c| c.as_str().to_string())
                .unwrap_or_else(|| "unexpected response".to_string());
            return Err(AuthError::AuthFailed(challenge));
        };

        let tokens = tokens_from(result, None)?;
        let user_id = self.subject(&tokens.access_token).await?;
        Ok(SignedIn { user_id, tokens })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Tokens, AuthError> {
        let mut auth_params = HashMap::new();
        auth_params.insert("REFRESH_TOKEN".to_string(), refresh_token.to_string());

        let resp = self
            .client
            .initiate_auth()
            .auth_flow(AuthFlowType::RefreshTokenAuth)
            .client_id(&self.user_pool_client_id)
            .set_auth_parameters(Some(auth_params))
            .send()
            .await
            .map_err(|e| {
                let err = e.into_service_error();
                if err.is_not_authorized_exception() {
                    AuthError::InvalidToken("refresh token rejected".to_string())
                } else {
                    AuthError::Cognito(err.to_string())
                }
            })?;

        let result = resp
            .authentication_result()
            .ok_or_else(|| AuthError::AuthFailed("refresh failed".to_string()))?;
        tokens_from(result, Some(refresh_token))
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        self.client
            .global_sign_out()
            .access_token(access_token)
            .send()
            .await
            .map_err(|e| AuthError::Cognito(e.into_service_error().to_string()))?;
        Ok(())
    }
}
