//! HTTP handlers for catalog endpoints.

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
use crate::application::handlers::catalog::{
    CreateProductCommand, CreateProductHandler, DeleteProductCommand, DeleteProductHandler,
    GetProductHandler, GetProductQuery, ListProductsHandler, ListProductsQuery,
    UpdateProductCommand, UpdateProductHandler,
};
use crate::domain::foundation::{Money, ProductId, StoreId};

use super::dto::{
    CreateProductRequest, ListProductsParams, ProductResponse, UpdateProductRequest,
};

#[derive(Clone)]
pub struct CatalogAppState {
    pub create_handler: Arc<CreateProductHandler>,
    pub get_handler: Arc<GetProductHandler>,
    pub list_handler: Arc<ListProductsHandler>,
    pub update_handler: Arc<UpdateProductHandler>,
    pub delete_handler: Arc<DeleteProductHandler>,
}

/// POST /api/products
pub async fn create_product(
    State(state): State<CatalogAppState>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<CreateProductRequest>,
) -> Result<Response, ApiError> {
    let store_id = parse_id::<StoreId>(&req.store_id, "store id")?;
    let product = state
        .create_handler
        .handle(
            CreateProductCommand {
                store_id,
                name: req.name,
                description: req.description,
                price: Money::from_cents(req.price_cents),
                stock: req.stock,
            },
            &user,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ProductResponse::from(product))).into_response())
}

/// GET /api/products/:id
pub async fn get_product(
    State(state): State<CatalogAppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let product_id = parse_id::<ProductId>(&id, "product id")?;
    match state
        .get_handler
        .handle(GetProductQuery { product_id })
        .await?
    {
        Some(product) => Ok(Json(ProductResponse::from(product)).into_response()),
        None => Ok(not_found("Product", product_id)),
    }
}

/// GET /api/products?store_id=...
pub async fn list_products(
    State(state): State<CatalogAppState>,
    Query(params): Query<ListProductsParams>,
) -> Result<Response, ApiError> {
    let store_id = parse_id::<StoreId>(&params.store_id, "store id")?;
    let products = state
        .list_handler
        .handle(ListProductsQuery { store_id, page: params.page_query() })
        .await?;
    Ok(Json(products.map(ProductResponse::from)).into_response())
}

/// PATCH /api/products/:id
pub async fn update_product(
    State(state): State<CatalogAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    Json(req): Json<UpdateProductRequest>,
) -> Result<Response, ApiError> {
    let product_id = parse_id::<ProductId>(&id, "product id")?;
    let product = state
        .update_handler
        .handle(
            UpdateProductCommand {
                product_id,
                name: req.name,
                description: req.description,
                price: req.price_cents.map(Money::from_cents),
                stock: req.stock,
            },
            &user,
        )
        .await?;
    Ok(Json(ProductResponse::from(product)).into_response())
}

/// DELETE /api/products/:id
pub async fn delete_product(
    State(state): State<CatalogAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let product_id = parse_id::<ProductId>(&id, "product id")?;
    state
        .delete_handler
        .handle(DeleteProductCommand { product_id }, &user)
        .await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
