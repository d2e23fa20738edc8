//! Axum router configuration for invoice endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    get_invoice, list_my_invoices, list_store_invoices, void_invoice, InvoiceAppState,
};

/// Invoice routes, mounted at `/api/invoices`. All require
/// authentication.
///
/// - `GET /` - List the caller's invoices
/// - `GET /store/:store_id` - List a store's invoices (store owner, admin)
/// - `GET /:id` - Fetch an invoice
/// - `POST /:id/void` - Void an unpaid invoice (store owner, admin)
pub fn invoice_routes() -> Router<InvoiceAppState> {
    Router::new()
        .route("/", get(list_my_invoices))
        .route("/store/:store_id", get(list_store_invoices))
        .route("/:id", get(get_invoice))
        .route("/:id/void", post(void_invoice))
}
