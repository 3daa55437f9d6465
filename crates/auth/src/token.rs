//! Access-token minting and verification (HMAC-SHA-256 JWT).

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Signing configuration, loaded once at startup and injected.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub secret_key: String,
    pub issuer: String,
    pub audience: String,
    pub expiry_minutes: i64,
}

impl AuthConfig {
    /// Read configuration from the environment.
    ///
    /// `STOCKROOM_JWT_EXPIRY_MINUTES` must be present and numeric; a missing
    /// or unparseable value is a startup fault and is never handled at call
    /// time.
    pub fn from_env() -> anyhow::Result<Self> {
        let secret_key = std::env::var("STOCKROOM_JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("STOCKROOM_JWT_SECRET not set; using insecure dev default");
            "dev-secret".to_string()
        });
        let issuer =
            std::env::var("STOCKROOM_JWT_ISSUER").unwrap_or_else(|_| "stockroom".to_string());
        let audience = std::env::var("STOCKROOM_JWT_AUDIENCE")
            .unwrap_or_else(|_| "stockroom-clients".to_string());

        let raw = std::env::var("STOCKROOM_JWT_EXPIRY_MINUTES")
            .map_err(|_| anyhow::anyhow!("STOCKROOM_JWT_EXPIRY_MINUTES is required"))?;
        let expiry_minutes: i64 = raw.parse().map_err(|_| {
            anyhow::anyhow!("STOCKROOM_JWT_EXPIRY_MINUTES must be an integer, got '{raw}'")
        })?;

        Ok(Self {
            secret_key,
            issuer,
            audience,
            expiry_minutes,
        })
    }
}

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject: the account email.
    pub sub: String,
    /// Role claim: the role name, or `"User"` when the account has no role.
    pub role: String,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to sign token: {0}")]
    Sign(#[source] jsonwebtoken::errors::Error),

    #[error("invalid token: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),
}

/// Mints and verifies signed, time-boxed access tokens.
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    issuer: String,
    audience: String,
    expiry: Duration,
}

impl TokenSigner {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);

        Self {
            encoding: EncodingKey::from_secret(config.secret_key.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret_key.as_bytes()),
            validation,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            expiry: Duration::minutes(config.expiry_minutes),
        }
    }

    /// Mint an access token for `subject` carrying `role`.
    pub fn mint(&self, subject: &str, role: &str) -> Result<String, TokenError> {
        self.mint_at(subject, role, Utc::now())
    }

    /// Mint with an explicit issuance instant. Prefer this in tests for
    /// determinism.
    pub fn mint_at(
        &self,
        subject: &str,
        role: &str,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = AccessClaims {
            sub: subject.to_string(),
            role: role.to_string(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now.timestamp(),
            exp: (now + self.expiry).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(TokenError::Sign)
    }

    /// Verify signature, lifetime, issuer and audience; returns the claims.
    pub fn verify(&self, token: &str) -> Result<AccessClaims, TokenError> {
        decode::<AccessClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(TokenError::Invalid)
    }
}

/// Opaque refresh token: a bare random identifier with no embedded claims.
/// Its only semantics come from the account record it indexes.
pub fn generate_refresh_token() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AuthConfig {
        AuthConfig {
            secret_key: "test-secret".to_string(),
            issuer: "stockroom".to_string(),
            audience: "stockroom-clients".to_string(),
            expiry_minutes: 30,
        }
    }

    #[test]
    fn mint_and_verify_round_trip() {
        let signer = TokenSigner::new(&config());
        let now = Utc::now();

        let token = signer.mint_at("admin@x.com", "Admin", now).unwrap();
        let claims = signer.verify(&token).unwrap();

        assert_eq!(claims.sub, "admin@x.com");
        assert_eq!(claims.role, "Admin");
        assert_eq!(claims.iss, "stockroom");
        assert_eq!(claims.aud, "stockroom-clients");
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn foreign_signature_is_rejected() {
        let signer = TokenSigner::new(&config());
        let other = TokenSigner::new(&AuthConfig {
            secret_key: "other-secret".to_string(),
            ..config()
        });

        let token = other.mint("admin@x.com", "Admin").unwrap();
        assert!(matches!(signer.verify(&token), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn expired_token_is_rejected() {
        let signer = TokenSigner::new(&config());
        let long_ago = Utc::now() - Duration::hours(2);

        let token = signer.mint_at("admin@x.com", "Admin", long_ago).unwrap();
        assert!(matches!(signer.verify(&token), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn wrong_audience_is_rejected() {
        let signer = TokenSigner::new(&config());
        let other = TokenSigner::new(&AuthConfig {
            audience: "someone-else".to_string(),
            ..config()
        });

        let token = other.mint("admin@x.com", "Admin").unwrap();
        assert!(matches!(signer.verify(&token), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn refresh_tokens_are_unique() {
        assert_ne!(generate_refresh_token(), generate_refresh_token());
    }
}
