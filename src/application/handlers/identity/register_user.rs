//! RegisterUserHandler - account creation with password hashing.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, Role};
use crate::domain::user::User;
use crate::ports::{PasswordHasher, UserRepository};

/// Command to register a new account.
#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
    pub email: String,
    pub display_name: String,
    pub password: String,
    pub role: Role,
}

pub struct RegisterUserHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl RegisterUserHandler {
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    pub async fn handle(&self, cmd: RegisterUserCommand) -> Result<User, DomainError> {
        if !cmd.email.contains('@') {
            return Err(DomainError::validation("email", "Invalid email address"));
        }
        if cmd.password.len() < 8 {
            return Err(DomainError::validation(
                "password",
                "Password must be at least 8 characters",
            ));
        }
        // Admin accounts are provisioned operationally, never self-registered.
        if cmd.role == Role::Admin {
            return Err(DomainError::forbidden("Cannot self-register as admin"));
        }

        if self.users.find_by_email(&cmd.email).await?.is_some() {
            return Err(DomainError::conflict("Email is already registered"));
        }

        let hash = self
            .hasher
            .hash(&cmd.password)
            .map_err(|e| DomainError::new(ErrorCode::InternalError, e.to_string()))?;

        let user = User::new(cmd.email, cmd.display_name, hash, cmd.role);
        self.users.save(&user).await?;

        tracing::info!(user_id = %user.id, role = %user.role, "registered new user");
        Ok(user)
    }
}
