//! Store entity - the tenancy boundary.
//!
//! Products, orders, and contracts all hang off a store. Store ownership
//! is the pivot for most authorization checks.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, StoreId, Timestamp, UserId};

/// A tenant store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    pub id: StoreId,
    pub owner_id: UserId,
    pub name: String,
    /// URL-safe unique handle, e.g. `acme-supplies`.
    pub slug: String,
    pub deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Store {
    /// Creates a new store after validating the slug.
    pub fn new(
        owner_id: UserId,
        name: impl Into<String>,
        slug: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        let slug = slug.into();
        validate_slug(&slug)?;
        if name.trim().is_empty() {
            return Err(DomainError::validation("name", "Store name cannot be empty"));
        }
        let now = Timestamp::now();
        Ok(Self {
            id: StoreId::new(),
            owner_id,
            name,
            slug,
            deleted: false,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name", "Store name cannot be empty"));
        }
        self.name = name;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    pub fn soft_delete(&mut self) {
        self.deleted = true;
        self.updated_at = Timestamp::now();
    }
}

fn validate_slug(slug: &str) -> Result<(), DomainError> {
    if slug.is_empty() || slug.len() > 64 {
        return Err(DomainError::validation("slug", "Slug must be 1-64 characters"));
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(DomainError::validation(
            "slug",
            "Slug may only contain lowercase letters, digits, and dashes",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_store_with_valid_slug() {
        let store = Store::new(UserId::new(), "Acme Supplies", "acme-supplies").unwrap();
        assert_eq!(store.slug, "acme-supplies");
        assert!(!store.deleted);
    }

    #[test]
    fn rejects_uppercase_slug() {
        assert!(Store::new(UserId::new(), "Acme", "Acme").is_err());
    }

    #[test]
    fn rejects_empty_name() {
        assert!(Store::new(UserId::new(), "   ", "acme").is_err());
    }

    #[test]
    fn rejects_overlong_slug() {
        let slug = "a".repeat(65);
        assert!(Store::new(UserId::new(), "Acme", slug).is_err());
    }
}
