//! DeleteUserHandler - admin soft delete.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, UserId};
use crate::ports::UserRepository;

#[derive(Debug, Clone)]
pub struct DeleteUserCommand {
    pub user_id: UserId,
}

pub struct DeleteUserHandler {
    users: Arc<dyn UserRepository>,
}

impl DeleteUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(
        &self,
        cmd: DeleteUserCommand,
        actor: &AuthenticatedUser,
    ) -> Result<(), DomainError> {
        if !actor.is_admin() {
            return Err(DomainError::forbidden("Only admins can delete accounts"));
        }

        let mut user = self
            .users
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", cmd.user_id))?;

        user.soft_delete();
        self.users.update(&user).await?;

        tracing::info!(user_id = %user.id, "soft-deleted user");
        Ok(())
    }
}
