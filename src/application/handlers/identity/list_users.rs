//! ListUsersHandler - admin account listing.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, Page, PageQuery};
use crate::domain::user::User;
use crate::ports::UserRepository;

#[derive(Debug, Clone, Default)]
pub struct ListUsersQuery {
    pub page: PageQuery,
}

pub struct ListUsersHandler {
    users: Arc<dyn UserRepository>,
}

impl ListUsersHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(
        &self,
        query: ListUsersQuery,
        actor: &AuthenticatedUser,
    ) -> Result<Page<User>, DomainError> {
        if !actor.is_admin() {
            return Err(DomainError::forbidden("Only admins can list users"));
        }
        self.users.list(&query.page).await
    }
}
