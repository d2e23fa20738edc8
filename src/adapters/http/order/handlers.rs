//! HTTP handlers for order endpoints.

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
use crate::application::handlers::order::{
    CancelOrderCommand, CancelOrderHandler, CheckoutLine, GetOrderHandler, GetOrderQuery,
    ListMyOrdersQuery, ListOrdersHandler, ListStoreOrdersQuery, ProcessCheckoutCommand,
    ProcessCheckoutHandler, UpdateOrderStatusCommand, UpdateOrderStatusHandler,
};
use crate::domain::foundation::{OrderId, PageQuery, ProductId, StoreId};

use super::dto::{
    CheckoutRequest, CheckoutResponse, OrderDetailsResponse, OrderResponse,
    UpdateOrderStatusRequest,
};

#[derive(Clone)]
pub struct OrderAppState {
    pub checkout_handler: Arc<ProcessCheckoutHandler>,
    pub get_handler: Arc<GetOrderHandler>,
    pub list_handler: Arc<ListOrdersHandler>,
    pub status_handler: Arc<UpdateOrderStatusHandler>,
    pub cancel_handler: Arc<CancelOrderHandler>,
}

/// POST /api/orders/checkout
pub async fn checkout(
    State(state): State<OrderAppState>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<CheckoutRequest>,
) -> Result<Response, ApiError> {
    let store_id = parse_id::<StoreId>(&req.store_id, "store id")?;
    let mut lines = Vec::with_capacity(req.lines.len());
    for line in req.lines {
        lines.push(CheckoutLine {
            product_id: parse_id::<ProductId>(&line.product_id, "product id")?,
            quantity: line.quantity,
        });
    }

    let result = state
        .checkout_handler
        .handle(ProcessCheckoutCommand { store_id, lines }, &user)
        .await?;

    let response = CheckoutResponse {
        order: result.order.into(),
        invoice_id: result.invoice.id.to_string(),
        invoice_number: result.invoice.number,
    };
    Ok((StatusCode::CREATED, Json(response)).into_response())
}

/// GET /api/orders/:id
pub async fn get_order(
    State(state): State<OrderAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let order_id = parse_id::<OrderId>(&id, "order id")?;
    match state
        .get_handler
        .handle(GetOrderQuery { order_id }, &user)
        .await?
    {
        Some(details) => Ok(Json(OrderDetailsResponse::from(details)).into_response()),
        None => Ok(not_found("Order", order_id)),
    }
}

/// GET /api/orders
pub async fn list_my_orders(
    State(state): State<OrderAppState>,
    RequireAuth(user): RequireAuth,
    Query(page): Query<PageQuery>,
) -> Result<Response, ApiError> {
    let orders = state
        .list_handler
        .handle_mine(ListMyOrdersQuery { page }, &user)
        .await?;
    Ok(Json(orders.map(OrderResponse::from)).into_response())
}

/// GET /api/orders/store/:store_id
pub async fn list_store_orders(
    State(state): State<OrderAppState>,
    RequireAuth(user): RequireAuth,
    Path(store_id): Path<String>,
    Query(page): Query<PageQuery>,
) -> Result<Response, ApiError> {
    let store_id = parse_id::<StoreId>(&store_id, "store id")?;
    let orders = state
        .list_handler
        .handle_store(ListStoreOrdersQuery { store_id, page }, &user)
        .await?;
    Ok(Json(orders.map(OrderResponse::from)).into_response())
}

/// POST /api/orders/:id/status
pub async fn update_status(
    State(state): State<OrderAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    Json(req): Json<UpdateOrderStatusRequest>,
) -> Result<Response, ApiError> {
    let order_id = parse_id::<OrderId>(&id, "order id")?;
    state
        .status_handler
        .handle(UpdateOrderStatusCommand { order_id, status: req.status }, &user)
        .await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

/// POST /api/orders/:id/cancel
pub async fn cancel_order(
    State(state): State<OrderAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let order_id = parse_id::<OrderId>(&id, "order id")?;
    state
        .cancel_handler
        .handle(CancelOrderCommand { order_id }, &user)
        .await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
