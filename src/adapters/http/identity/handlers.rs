//! HTTP handlers for identity endpoints.

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{not_found, ApiError};
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::identity::{
    DeleteUserCommand, DeleteUserHandler, GetUserHandler, GetUserQuery, ListUsersHandler,
    ListUsersQuery, LoginCommand, LoginHandler, RegisterUserCommand, RegisterUserHandler,
    UpdateProfileCommand, UpdateProfileHandler,
};
use crate::domain::foundation::{DomainError, PageQuery, UserId};

use super::dto::{
    LoginRequest, LoginResponse, RegisterRequest, UpdateProfileRequest, UserResponse,
};

#[derive(Clone)]
pub struct IdentityAppState {
    pub register_handler: Arc<RegisterUserHandler>,
    pub login_handler: Arc<LoginHandler>,
    pub get_handler: Arc<GetUserHandler>,
    pub list_handler: Arc<ListUsersHandler>,
    pub update_handler: Arc<UpdateProfileHandler>,
    pub delete_handler: Arc<DeleteUserHandler>,
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<IdentityAppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Response, ApiError> {
    let user = state
        .register_handler
        .handle(RegisterUserCommand {
            email: req.email,
            display_name: req.display_name,
            password: req.password,
            role: req.role,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))).into_response())
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<IdentityAppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    let result = state
        .login_handler
        .handle(LoginCommand {
            email: req.email,
            password: req.password,
        })
        .await?;
    Ok(Json(LoginResponse::new(result.token, result.user)).into_response())
}

/// GET /api/users/me
pub async fn get_me(
    State(state): State<IdentityAppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Response, ApiError> {
    match state
        .get_handler
        .handle(GetUserQuery { user_id: user.id }, &user)
        .await?
    {
        Some(found) => Ok(Json(UserResponse::from(found)).into_response()),
        None => Ok(not_found("User", user.id)),
    }
}

/// GET /api/users/:id
pub async fn get_user(
    State(state): State<IdentityAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let user_id = parse_id::<UserId>(&id, "user id")?;
    match state
        .get_handler
        .handle(GetUserQuery { user_id }, &user)
        .await?
    {
        Some(found) => Ok(Json(UserResponse::from(found)).into_response()),
        None => Ok(not_found("User", user_id)),
    }
}

/// GET /api/users
pub async fn list_users(
    State(state): State<IdentityAppState>,
    RequireAuth(user): RequireAuth,
    Query(page): Query<PageQuery>,
) -> Result<Response, ApiError> {
    let users = state
        .list_handler
        .handle(ListUsersQuery { page }, &user)
        .await?;
    Ok(Json(users.map(UserResponse::from)).into_response())
}

/// PATCH /api/users/me
pub async fn update_me(
    State(state): State<IdentityAppState>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Response, ApiError> {
    let updated = state
        .update_handler
        .handle(
            UpdateProfileCommand {
                user_id: user.id,
                display_name: req.display_name,
                password: req.password,
            },
            &user,
        )
        .await?;
    Ok(Json(UserResponse::from(updated)).into_response())
}

/// DELETE /api/users/:id
pub async fn delete_user(
    State(state): State<IdentityAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let user_id = parse_id::<UserId>(&id, "user id")?;
    state
        .delete_handler
        .handle(DeleteUserCommand { user_id }, &user)
        .await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

/// Parses a path segment into a typed id with a 400 on failure.
pub(crate) fn parse_id<T: FromStr>(raw: &str, what: &str) -> Result<T, ApiError> {
    raw.parse::<T>()
        .map_err(|_| ApiError(DomainError::validation(what, format!("Invalid {}", what))))
}
