use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tracing::{debug, instrument};

use super::types::Claims;
use crate::shared::AppError;

/// Configuration for JWT token operations
#[derive(Clone)]
pub struct TokenConfig {
    secret: String,
    pub expire_minutes: i64,
}

impl TokenConfig {
    pub fn new() -> Self {
        // Allow configuring expiration via env var, default to 30 minutes
        let expire_minutes = std::env::var("ACCESS_TOKEN_EXPIRE_MINUTES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        Self {
            secret: std::env::var("JWT_SECRET")
                .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string()),
            expire_minutes,
        }
    }

    /// Creates a token config with explicit values, bypassing the environment
    pub fn with_expiry(secret: impl Into<String>, expire_minutes: i64) -> Self {
        Self {
            secret: secret.into(),
            expire_minutes,
        }
    }

    /// Creates a new signed access token for the given customer email
    #[instrument(skip(self, email))]
    pub fn create_token(&self, email: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let exp = (now + Duration::minutes(self.expire_minutes)).timestamp() as usize;

        debug!(
            expire_minutes = self.expire_minutes,
            exp_timestamp = exp,
            "Creating access token with expiration"
        );

        let claims = Claims {
            sub: email.to_string(),
            exp,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )
        .map_err(|e| {
            debug!(error = %e, "Failed to encode access token");
            AppError::Internal
        })
    }

    /// Validates an access token signature and expiry, returning the claims if both pass
    #[instrument(skip(self, token))]
    pub fn validate_token(&self, token: &str) -> Result<Claims, AppError> {
        debug!("Decoding and validating access token");

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &Validation::default(),
        )
        .map(|data| {
            debug!(sub = %data.claims.sub, exp = data.claims.exp, "Access token decoded successfully");
            data.claims
        })
        .map_err(|e| {
            debug!(error = %e, "Failed to decode access token");
            AppError::Unauthorized("Could not validate credentials".to_string())
        })
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self::new()
    }
}
