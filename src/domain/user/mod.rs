//! User entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Role, StoreId, Timestamp, UserId};

/// A platform account.
///
/// `password_hash` is an argon2 PHC string and never leaves the backend.
/// Rows are soft-deleted; a deleted user cannot log in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub display_name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub store_id: Option<StoreId>,
    pub deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// Creates a new active user.
    pub fn new(
        email: impl Into<String>,
        display_name: impl Into<String>,
        password_hash: impl Into<String>,
        role: Role,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id: UserId::new(),
            email: email.into(),
            display_name: display_name.into(),
            password_hash: password_hash.into(),
            role,
            store_id: None,
            deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Flags the account as deleted. Idempotent.
    pub fn soft_delete(&mut self) {
        self.deleted = true;
        self.updated_at = Timestamp::now();
    }
}
