//! Axum router configuration for catalog endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_product, delete_product, get_product, list_products, update_product, CatalogAppState,
};

/// Catalog routes, mounted at `/api/products`.
///
/// - `POST /` - Create a product (store owner, admin)
/// - `GET /?store_id=...` - List a store's products (public)
/// - `GET /:id` - Fetch a product (public)
/// - `PATCH /:id` - Update (store owner, admin)
/// - `DELETE /:id` - Soft-delete (store owner, admin)
pub fn catalog_routes() -> Router<CatalogAppState> {
    Router::new()
        .route("/", post(create_product).get(list_products))
        .route(
            "/:id",
            get(get_product).patch(update_product).delete(delete_product),
        )
}
