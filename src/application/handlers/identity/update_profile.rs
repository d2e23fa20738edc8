//! UpdateProfileHandler - display name and password changes.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::user::User;
use crate::ports::{PasswordHasher, UserRepository};

/// Command to update one's own profile. Absent fields are unchanged.
#[derive(Debug, Clone)]
pub struct UpdateProfileCommand {
    pub user_id: UserId,
    pub display_name: Option<String>,
    pub password: Option<String>,
}

pub struct UpdateProfileHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl UpdateProfileHandler {
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    pub async fn handle(
        &self,
        cmd: UpdateProfileCommand,
        actor: &AuthenticatedUser,
    ) -> Result<User, DomainError> {
        if !actor.can_act_for(&cmd.user_id) {
            return Err(DomainError::forbidden("Cannot update another user's account"));
        }

        let mut user = self
            .users
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", cmd.user_id))?;

        if let Some(name) = cmd.display_name {
            if name.trim().is_empty() {
                return Err(DomainError::validation("display_name", "Name cannot be empty"));
            }
            user.display_name = name;
        }

        if let Some(password) = cmd.password {
            if password.len() < 8 {
                return Err(DomainError::validation(
                    "password",
                    "Password must be at least 8 characters",
                ));
            }
            user.password_hash = self
                .hasher
                .hash(&password)
                .map_err(|e| DomainError::new(ErrorCode::InternalError, e.to_string()))?;
        }

        user.updated_at = Timestamp::now();
        self.users.update(&user).await?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{MockPasswordHasher, MockUserRepository};
    use crate::domain::foundation::Role;

    fn setup() -> (Arc<MockUserRepository>, User, AuthenticatedUser) {
        let user = User::new("a@example.com", "A", MockPasswordHasher::stored("old"), Role::Customer);
        let actor = AuthenticatedUser::new(user.id, "a@example.com", Role::Customer, None);
        let users = Arc::new(MockUserRepository::new().with_user(user.clone()));
        (users, user, actor)
    }

    #[tokio::test]
    async fn updates_display_name() {
        let (users, user, actor) = setup();
        let handler = UpdateProfileHandler::new(users, Arc::new(MockPasswordHasher::new()));

        let updated = handler
            .handle(
                UpdateProfileCommand {
                    user_id: user.id,
                    display_name: Some("New Name".to_string()),
                    password: None,
                },
                &actor,
            )
            .await
            .unwrap();
        assert_eq!(updated.display_name, "New Name");
    }

    #[tokio::test]
    async fn rehashes_new_password() {
        let (users, user, actor) = setup();
        let handler = UpdateProfileHandler::new(users, Arc::new(MockPasswordHasher::new()));

        let updated = handler
            .handle(
                UpdateProfileCommand {
                    user_id: user.id,
                    display_name: None,
                    password: Some("new-password".to_string()),
                },
                &actor,
            )
            .await
            .unwrap();
        assert_eq!(updated.password_hash, MockPasswordHasher::stored("new-password"));
    }

    #[tokio::test]
    async fn cannot_update_someone_else() {
        let (users, user, _) = setup();
        let stranger = AuthenticatedUser::new(UserId::new(), "x@example.com", Role::Customer, None);
        let handler = UpdateProfileHandler::new(users, Arc::new(MockPasswordHasher::new()));

        let err = handler
            .handle(
                UpdateProfileCommand {
                    user_id: user.id,
                    display_name: Some("Hacked".to_string()),
                    password: None,
                },
                &stranger,
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }
}
