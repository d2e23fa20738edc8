//! GetUserHandler - fetch one account.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, UserId};
use crate::domain::user::User;
use crate::ports::UserRepository;

/// Query for a user by id. Non-admins may only fetch themselves.
#[derive(Debug, Clone)]
pub struct GetUserQuery {
    pub user_id: UserId,
}

pub struct GetUserHandler {
    users: Arc<dyn UserRepository>,
}

impl GetUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(
        &self,
        query: GetUserQuery,
        actor: &AuthenticatedUser,
    ) -> Result<Option<User>, DomainError> {
        if !actor.can_act_for(&query.user_id) {
            return Err(DomainError::forbidden("Cannot view another user's account"));
        }
        self.users.find_by_id(&query.user_id).await
    }
}
