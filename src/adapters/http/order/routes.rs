//! Axum router configuration for order endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    cancel_order, checkout, get_order, list_my_orders, list_store_orders, update_status,
    OrderAppState,
};

/// Order routes, mounted at `/api/orders`. All require authentication.
///
/// - `POST /checkout` - Create order + lines + invoice atomically
/// - `GET /` - List the caller's orders
/// - `GET /store/:store_id` - List a store's orders (store owner, admin)
/// - `GET /:id` - Fetch an order with lines
/// - `POST /:id/status` - Advance fulfilment (store owner, admin)
/// - `POST /:id/cancel` - Cancel (customer while pending; store side later)
pub fn order_routes() -> Router<OrderAppState> {
    Router::new()
        .route("/checkout", post(checkout))
        .route("/", get(list_my_orders))
        .route("/store/:store_id", get(list_store_orders))
        .route("/:id", get(get_order))
        .route("/:id/status", post(update_status))
        .route("/:id/cancel", post(cancel_order))
}
