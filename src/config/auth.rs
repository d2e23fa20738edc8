//! Authentication configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;

/// Authentication configuration (self-issued HS256 JWTs)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HMAC signing secret for access tokens
    pub jwt_secret: Secret<String>,

    /// Token issuer claim
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// Access token lifetime in seconds
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: u64,
}

impl AuthConfig {
    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.jwt_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("AUTH_JWT_SECRET"));
        }
        if self.jwt_secret.expose_secret().len() < 32 {
            return Err(ValidationError::JwtSecretTooShort);
        }
        if self.token_ttl_secs < 60 || self.token_ttl_secs > 60 * 60 * 24 * 30 {
            return Err(ValidationError::InvalidTokenLifetime);
        }
        Ok(())
    }
}

fn default_issuer() -> String {
    "tradehub".to_string()
}

fn default_token_ttl() -> u64 {
    60 * 60 * 8
}
