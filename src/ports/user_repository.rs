//! User persistence port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Page, PageQuery, UserId};
use crate::domain::user::User;

/// Persistent storage for users.
///
/// All lookups filter soft-deleted rows.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a new user. Fails with a conflict on duplicate email.
    async fn save(&self, user: &User) -> Result<(), DomainError>;

    /// Updates an existing user (including the soft-delete flag).
    async fn update(&self, user: &User) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Admin listing, newest first.
    async fn list(&self, page: &PageQuery) -> Result<Page<User>, DomainError>;
}
