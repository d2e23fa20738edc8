//! LoginHandler - credential check and token issuance.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::user::User;
use crate::ports::{IssuedToken, PasswordHasher, TokenIssuer, UserRepository};

/// Command to log in with email and password.
#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub token: IssuedToken,
    pub user: User,
}

pub struct LoginHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    issuer: Arc<dyn TokenIssuer>,
}

impl LoginHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        issuer: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            users,
            hasher,
            issuer,
        }
    }

    pub async fn handle(&self, cmd: LoginCommand) -> Result<LoginResult, DomainError> {
        // Same error for unknown email and wrong password; never leak
        // which one it was.
        let invalid = || DomainError::new(ErrorCode::Unauthorized, "Invalid credentials");

        let user = self
            .users
            .find_by_email(&cmd.email)
            .await?
            .ok_or_else(invalid)?;

        self.hasher
            .verify(&cmd.password, &user.password_hash)
            .map_err(|_| invalid())?;

        let token = self
            .issuer
            .issue(&user)
            .await
            .map_err(|e| DomainError::new(ErrorCode::InternalError, e.to_string()))?;

        tracing::debug!(user_id = %user.id, "login succeeded");
        Ok(LoginResult { token, user })
    }
}
