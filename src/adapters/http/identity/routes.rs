//! Axum router configuration for identity endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    delete_user, get_me, get_user, list_users, login, register, update_me, IdentityAppState,
};

/// Authentication routes, mounted at `/api/auth`.
///
/// - `POST /register` - Create an account (public)
/// - `POST /login` - Exchange credentials for a bearer token (public)
pub fn auth_routes() -> Router<IdentityAppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Account routes, mounted at `/api/users`.
///
/// - `GET /me` - Current account
/// - `PATCH /me` - Update display name or password
/// - `GET /` - List accounts (admin)
/// - `GET /:id` - Fetch an account (admin or self)
/// - `DELETE /:id` - Soft-delete an account (admin)
pub fn user_routes() -> Router<IdentityAppState> {
    Router::new()
        .route("/me", get(get_me).patch(update_me))
        .route("/", get(list_users))
        .route("/:id", get(get_user).delete(delete_user))
}
