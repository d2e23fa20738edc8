//! HTTP handlers for store endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{not_found, ApiError};
use crate::adapters::http::identity::handlers::parse_id;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::store::{
    CreateStoreCommand, CreateStoreHandler, DeleteStoreCommand, DeleteStoreHandler,
    GetStoreHandler, GetStoreQuery, ListStoresHandler, ListStoresQuery, UpdateStoreCommand,
    UpdateStoreHandler,
};
use crate::domain::foundation::{PageQuery, StoreId};

use super::dto::{CreateStoreRequest, StoreResponse, UpdateStoreRequest};

#[derive(Clone)]
pub struct StoreAppState {
    pub create_handler: Arc<CreateStoreHandler>,
    pub get_handler: Arc<GetStoreHandler>,
    pub list_handler: Arc<ListStoresHandler>,
    pub update_handler: Arc<UpdateStoreHandler>,
    pub delete_handler: Arc<DeleteStoreHandler>,
}

/// POST /api/stores
pub async fn create_store(
    State(state): State<StoreAppState>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<CreateStoreRequest>,
) -> Result<Response, ApiError> {
    let store = state
        .create_handler
        .handle(CreateStoreCommand { name: req.name, slug: req.slug }, &user)
        .await?;
    Ok((StatusCode::CREATED, Json(StoreResponse::from(store))).into_response())
}

/// GET /api/stores/:id
pub async fn get_store(
    State(state): State<StoreAppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let store_id = parse_id::<StoreId>(&id, "store id")?;
    match state.get_handler.handle(GetStoreQuery { store_id }).await? {
        Some(store) => Ok(Json(StoreResponse::from(store)).into_response()),
        None => Ok(not_found("Store", store_id)),
    }
}

/// GET /api/stores
pub async fn list_stores(
    State(state): State<StoreAppState>,
    Query(page): Query<PageQuery>,
) -> Result<Response, ApiError> {
    let stores = state.list_handler.handle(ListStoresQuery { page }).await?;
    Ok(Json(stores.map(StoreResponse::from)).into_response())
}

/// PATCH /api/stores/:id
pub async fn update_store(
    State(state): State<StoreAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    Json(req): Json<UpdateStoreRequest>,
) -> Result<Response, ApiError> {
    let store_id = parse_id::<StoreId>(&id, "store id")?;
    let store = state
        .update_handler
        .handle(UpdateStoreCommand { store_id, name: req.name }, &user)
        .await?;
    Ok(Json(StoreResponse::from(store)).into_response())
}

/// DELETE /api/stores/:id
pub async fn delete_store(
    State(state): State<StoreAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let store_id = parse_id::<StoreId>(&id, "store id")?;
    state
        .delete_handler
        .handle(DeleteStoreCommand { store_id }, &user)
        .await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
