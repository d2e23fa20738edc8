//! HS256 JWT adapter for `SessionValidator` and `TokenIssuer`.
//!
//! Tokens are self-issued: the platform owns its users, so there is no
//! external identity provider. Claims carry the user id, email, role,
//! and optional store scope.

use async_trait::async_trait;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::config::AuthConfig;
use crate::domain::foundation::{AuthError, AuthenticatedUser, Role, StoreId, Timestamp, UserId};
use crate::domain::user::User;
use crate::ports::{IssuedToken, SessionValidator, TokenIssuer};

/// JWT claims for access tokens.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// User id.
    sub: String,
    email: String,
    role: String,
    /// Store scope for owner accounts.
    #[serde(skip_serializing_if = "Option::is_none")]
    store: Option<String>,
    iss: String,
    iat: u64,
    exp: u64,
}

/// Issues and validates HS256 access tokens.
pub struct JwtAuth {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    token_ttl_secs: u64,
}

impl JwtAuth {
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.expose_secret().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            issuer: config.issuer.clone(),
            token_ttl_secs: config.token_ttl_secs,
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation
    }
}

#[async_trait]
impl TokenIssuer for JwtAuth {
    async fn issue(&self, user: &User) -> Result<IssuedToken, AuthError> {
        let now = Timestamp::now().as_datetime().timestamp() as u64;
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            role: user.role.as_str().to_string(),
            store: user.store_id.map(|id| id.to_string()),
            iss: self.issuer.clone(),
            iat: now,
            exp: now + self.token_ttl_secs,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::service_unavailable(e.to_string()))?;

        Ok(IssuedToken {
            token,
            expires_in_secs: self.token_ttl_secs,
        })
    }
}

#[async_trait]
impl SessionValidator for JwtAuth {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation()).map_err(
            |e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            },
        )?;

        let claims = data.claims;
        let id = UserId::from_str(&claims.sub).map_err(|_| AuthError::InvalidToken)?;
        let role = Role::from_str(&claims.role).map_err(|_| AuthError::InvalidToken)?;
        let store_id = match claims.store {
            Some(s) => Some(StoreId::from_str(&s).map_err(|_| AuthError::InvalidToken)?),
            None => None,
        };

        Ok(AuthenticatedUser::new(id, claims.email, role, store_id))
    }
}
