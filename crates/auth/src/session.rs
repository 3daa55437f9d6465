//! Session issuance: credential verification and the access/refresh flow.
//!
//! State machine over a session:
//! `Anonymous → Authenticating → {Authenticated, Rejected}`;
//! `Authenticated → RefreshPending → {Authenticated, Rejected}`.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockroom_core::{Envelope, Status, StoreError};

use crate::password::PasswordHasher;
use crate::store::AccountStore;
use crate::token::{generate_refresh_token, TokenError, TokenSigner};

/// Days a refresh token stays valid from issuance.
pub const REFRESH_TOKEN_TTL_DAYS: i64 = 7;

/// Wire-visible login request.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Wire-visible refresh request.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Token material returned on success. Refresh responses carry the access
/// token only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenPair {
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Rejection kinds for session operations.
///
/// Rendered to envelope status + message only at the boundary; tests assert
/// on the kind.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email or password empty/whitespace. Checked before any store access.
    #[error("Email and Password are required.")]
    MissingCredentials,

    /// Account absent or inactive. One message for both cases so the
    /// response does not leak which one applied.
    #[error("Invalid credentials or inactive user.")]
    UnknownOrInactiveAccount,

    #[error("Invalid credentials.")]
    PasswordMismatch,

    #[error("Refresh token is required.")]
    MissingRefreshToken,

    /// No account holds the token, or its stored expiry is at or before now.
    #[error("Invalid or expired refresh token.")]
    InvalidOrExpiredRefreshToken,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl AuthError {
    pub fn status(&self) -> Status {
        match self {
            AuthError::MissingCredentials | AuthError::MissingRefreshToken => Status::BadRequest,
            AuthError::UnknownOrInactiveAccount
            | AuthError::PasswordMismatch
            | AuthError::InvalidOrExpiredRefreshToken => Status::Unauthenticated,
            AuthError::Store(_) | AuthError::Token(_) => Status::InternalError,
        }
    }

    fn is_internal(&self) -> bool {
        matches!(self, AuthError::Store(_) | AuthError::Token(_))
    }
}

/// Validates credentials, issues signed access tokens and opaque refresh
/// tokens, and re-issues access tokens from a valid refresh token.
pub struct SessionIssuer {
    store: Arc<dyn AccountStore>,
    signer: Arc<TokenSigner>,
    hasher: PasswordHasher,
}

impl SessionIssuer {
    pub fn new(store: Arc<dyn AccountStore>, signer: Arc<TokenSigner>) -> Self {
        Self {
            store,
            signer,
            hasher: PasswordHasher::new(),
        }
    }

    /// Authenticate credentials and issue a fresh token pair.
    pub async fn login(&self, request: &LoginRequest) -> Envelope<TokenPair> {
        match self
            .authenticate_at(&request.email, &request.password, Utc::now())
            .await
        {
            Ok(pair) => Envelope::success(pair, "Login successful."),
            Err(err) if err.is_internal() => {
                tracing::error!(error = %err, email = %request.email, "login failed");
                Envelope::failure(
                    Status::InternalError,
                    "An error occurred during login. Please try again later.",
                )
            }
            Err(err) => Envelope::failure(err.status(), err.to_string()),
        }
    }

    /// Credential check + token issuance at an explicit instant.
    ///
    /// Persists the new refresh token and its expiry (`now` + 7 days) on the
    /// account. Not transactional: concurrent logins for one account race on
    /// the refresh-token field with last-writer-wins semantics.
    pub async fn authenticate_at(
        &self,
        email: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<TokenPair, AuthError> {
        if email.trim().is_empty() || password.trim().is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let Some(mut account) = self.store.find_by_email(email).await? else {
            return Err(AuthError::UnknownOrInactiveAccount);
        };
        if !account.active {
            return Err(AuthError::UnknownOrInactiveAccount);
        }

        if !self.hasher.verify(password, &account.password_hash) {
            return Err(AuthError::PasswordMismatch);
        }

        let role = account.role_name().to_string();
        let token = self.signer.mint_at(&account.email, &role, now)?;
        // Fresh random identifier; collision probability is negligible, so
        // there is no uniqueness check against the store.
        let refresh_token = generate_refresh_token();

        account.refresh_token = Some(refresh_token.clone());
        account.refresh_token_expires_at = Some(now + Duration::days(REFRESH_TOKEN_TTL_DAYS));
        self.store.update(&account).await?;

        tracing::info!(user = %account.full_name, "logged in");

        Ok(TokenPair {
            token,
            refresh_token: Some(refresh_token),
            role: Some(role),
        })
    }

    /// Re-issue an access token from a valid refresh token.
    pub async fn refresh(&self, request: &RefreshRequest) -> Envelope<TokenPair> {
        match self.refresh_at(&request.refresh_token, Utc::now()).await {
            Ok(pair) => Envelope::success(pair, "Token refreshed successfully."),
            Err(err) if err.is_internal() => {
                tracing::error!(error = %err, refresh_token = %request.refresh_token, "token refresh failed");
                Envelope::failure(
                    Status::InternalError,
                    "An error occurred while refreshing token. Please try again later.",
                )
            }
            Err(err) => Envelope::failure(err.status(), err.to_string()),
        }
    }

    /// Refresh at an explicit instant.
    ///
    /// A token whose stored expiry equals `now` is already invalid. The
    /// refresh token itself is not rotated; the save is still issued even
    /// though nothing changed.
    pub async fn refresh_at(
        &self,
        refresh_token: &str,
        now: DateTime<Utc>,
    ) -> Result<TokenPair, AuthError> {
        if refresh_token.trim().is_empty() {
            return Err(AuthError::MissingRefreshToken);
        }

        let Some(account) = self.store.find_by_refresh_token(refresh_token).await? else {
            return Err(AuthError::InvalidOrExpiredRefreshToken);
        };
        match account.refresh_token_expires_at {
            Some(expires_at) if expires_at > now => {}
            _ => return Err(AuthError::InvalidOrExpiredRefreshToken),
        }

        let token = self
            .signer
            .mint_at(&account.email, account.role_name(), now)?;
        self.store.update(&account).await?;

        tracing::info!(user = %account.full_name, "refreshed access token");

        Ok(TokenPair {
            token,
            refresh_token: None,
            role: None,
        })
    }
}
