use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::time::Duration;

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::{Claims, TokenKind, TokenSubject};

/// A freshly signed token together with its lifetime in seconds
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: i64,
}

/// Mints and verifies HMAC-signed JWTs
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    access_token_ttl: Duration,
    refresh_token_ttl: Duration,
    leeway: u64,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret_key.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret_key.as_bytes()),
            algorithm: config.algorithm,
            access_token_ttl: config.access_token_ttl,
            refresh_token_ttl: config.refresh_token_ttl,
            leeway: config.jwt_leeway.as_secs(),
        }
    }

    pub fn create_access_token(&self, subject: &TokenSubject) -> Result<IssuedToken> {
        self.issue(subject, TokenKind::Access, self.access_token_ttl)
    }

    pub fn create_refresh_token(&self, subject: &TokenSubject) -> Result<IssuedToken> {
        self.issue(subject, TokenKind::Refresh, self.refresh_token_ttl)
    }

    fn issue(&self, subject: &TokenSubject, kind: TokenKind, ttl: Duration) -> Result<IssuedToken> {
        let now = Utc::now().timestamp();
        let expires_in = i64::try_from(ttl.as_secs())
            .map_err(|_| AppError::Internal("Token lifetime is out of range".to_string()))?;

        let claims = Claims {
            sub: subject.email.clone(),
            role: subject.role,
            id: subject.id,
            token_type: kind,
            iat: now,
            exp: now
                .checked_add(expires_in)
                .ok_or_else(|| AppError::Internal("Token expiry is out of range".to_string()))?,
        };

        let token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to encode JWT: {}", e)))?;

        Ok(IssuedToken { token, expires_in })
    }

    /// Decode a token, checking signature, expiry and that it is of the expected kind
    pub fn verify(&self, token: &str, expected: TokenKind) -> Result<Claims> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = self.leeway;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            tracing::debug!("JWT rejected: {}", e);
            AppError::Unauthorized("Could not validate credentials".to_string())
        })?;

        if token_data.claims.token_type != expected {
            tracing::debug!(
                "JWT rejected: expected {:?} token, got {:?}",
                expected,
                token_data.claims.token_type
            );
            return Err(AppError::Unauthorized(
                "Could not validate credentials".to_string(),
            ));
        }

        Ok(token_data.claims)
    }
}
