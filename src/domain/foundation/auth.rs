//! Authentication and authorization types for the domain layer.
//!
//! `AuthenticatedUser` is populated from a validated bearer token by the
//! `SessionValidator` port and injected into request extensions. Role
//! policy lives here so endpoint handlers call one function instead of
//! repeating string comparisons.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::{StoreId, UserId};

/// Platform roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Platform operator. Sees and manages everything.
    Admin,
    /// Store owner. Manages their own stores, catalogs, and contracts.
    Owner,
    /// Supplier. Bids on contracts posted by owners.
    Supplier,
    /// Customer. Browses catalogs and places orders.
    Customer,
}

impl Role {
    /// Stable string form used in storage and token claims.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Owner => "owner",
            Role::Supplier => "supplier",
            Role::Customer => "customer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "owner" => Ok(Role::Owner),
            "supplier" => Ok(Role::Supplier),
            "customer" => Ok(Role::Customer),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// Authenticated user extracted from a validated bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// The unique user identifier.
    pub id: UserId,

    /// Email address from the token claims.
    pub email: String,

    /// The user's platform role.
    pub role: Role,

    /// Store the user belongs to, when role is store-scoped.
    pub store_id: Option<StoreId>,
}

impl AuthenticatedUser {
    pub fn new(id: UserId, email: impl Into<String>, role: Role, store_id: Option<StoreId>) -> Self {
        Self {
            id,
            email: email.into(),
            role,
            store_id,
        }
    }

    /// True for platform operators.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// True when this user is the given user.
    pub fn is_self(&self, user_id: &UserId) -> bool {
        &self.id == user_id
    }

    /// Admins act for any resource owner; everyone else only for themselves.
    pub fn can_act_for(&self, owner_id: &UserId) -> bool {
        self.is_admin() || self.is_self(owner_id)
    }

    /// Store management: admin, or the owner of the store in question.
    pub fn can_manage_store(&self, store_owner_id: &UserId) -> bool {
        self.is_admin() || (self.role == Role::Owner && self.is_self(store_owner_id))
    }

    /// Checkout is a customer action (admins may place test orders).
    pub fn can_place_order(&self) -> bool {
        matches!(self.role, Role::Customer | Role::Admin)
    }

    /// Only suppliers bid on contracts.
    pub fn can_submit_request(&self) -> bool {
        self.role == Role::Supplier
    }
}

/// Authentication errors that occur during token validation.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired.
    #[error("Token expired")]
    TokenExpired,

    /// Token is valid but the user no longer exists or is soft-deleted.
    #[error("User not found")]
    UserNotFound,

    /// The credential check failed on login.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The authentication backend is unavailable.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new(), "u@example.com", role, None)
    }

    #[test]
    fn role_roundtrips_through_str() {
        for role in [Role::Admin, Role::Owner, Role::Supplier, Role::Customer] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn admin_can_act_for_anyone() {
        let admin = user(Role::Admin);
        assert!(admin.can_act_for(&UserId::new()));
        assert!(admin.can_manage_store(&UserId::new()));
    }

    #[test]
    fn owner_manages_only_own_store() {
        let owner = user(Role::Owner);
        assert!(owner.can_manage_store(&owner.id.clone()));
        assert!(!owner.can_manage_store(&UserId::new()));
    }

    #[test]
    fn customer_cannot_manage_store_even_if_owner_id_matches() {
        let customer = user(Role::Customer);
        let own_id = customer.id;
        assert!(!customer.can_manage_store(&own_id));
    }

    #[test]
    fn only_suppliers_submit_requests() {
        assert!(user(Role::Supplier).can_submit_request());
        assert!(!user(Role::Owner).can_submit_request());
        assert!(!user(Role::Admin).can_submit_request());
    }

    #[test]
    fn customers_and_admins_place_orders() {
        assert!(user(Role::Customer).can_place_order());
        assert!(user(Role::Admin).can_place_order());
        assert!(!user(Role::Supplier).can_place_order());
    }
}
