//! Axum router configuration for store endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_store, delete_store, get_store, list_stores, update_store, StoreAppState,
};

/// Store routes, mounted at `/api/stores`.
///
/// - `POST /` - Create a store (owner)
/// - `GET /` - List stores (public)
/// - `GET /:id` - Fetch a store (public)
/// - `PATCH /:id` - Rename (store owner, admin)
/// - `DELETE /:id` - Soft-delete (store owner, admin)
pub fn store_routes() -> Router<StoreAppState> {
    Router::new()
        .route("/", post(create_store).get(list_stores))
        .route("/:id", get(get_store).patch(update_store).delete(delete_store))
}
