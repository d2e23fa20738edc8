//! HTTP handlers for invoice endpoints.

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
use crate::application::handlers::invoice::{
    GetInvoiceHandler, GetInvoiceQuery, ListInvoicesHandler, ListMyInvoicesQuery,
    ListStoreInvoicesQuery, VoidInvoiceCommand, VoidInvoiceHandler,
};
use crate::domain::foundation::{InvoiceId, PageQuery, StoreId};

use super::dto::InvoiceResponse;

#[derive(Clone)]
pub struct InvoiceAppState {
    pub get_handler: Arc<GetInvoiceHandler>,
    pub list_handler: Arc<ListInvoicesHandler>,
    pub void_handler: Arc<VoidInvoiceHandler>,
}

/// GET /api/invoices/:id
pub async fn get_invoice(
    State(state): State<InvoiceAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let invoice_id = parse_id::<InvoiceId>(&id, "invoice id")?;
    match state
        .get_handler
        .handle(GetInvoiceQuery { invoice_id }, &user)
        .await?
    {
        Some(invoice) => Ok(Json(InvoiceResponse::from(invoice)).into_response()),
        None => Ok(not_found("Invoice", invoice_id)),
    }
}

/// GET /api/invoices
pub async fn list_my_invoices(
    State(state): State<InvoiceAppState>,
    RequireAuth(user): RequireAuth,
    Query(page): Query<PageQuery>,
) -> Result<Response, ApiError> {
    let invoices = state
        .list_handler
        .handle_mine(ListMyInvoicesQuery { page }, &user)
        .await?;
    Ok(Json(invoices.map(InvoiceResponse::from)).into_response())
}

/// GET /api/invoices/store/:store_id
pub async fn list_store_invoices(
    State(state): State<InvoiceAppState>,
    RequireAuth(user): RequireAuth,
    Path(store_id): Path<String>,
    Query(page): Query<PageQuery>,
) -> Result<Response, ApiError> {
    let store_id = parse_id::<StoreId>(&store_id, "store id")?;
    let invoices = state
        .list_handler
        .handle_store(ListStoreInvoicesQuery { store_id, page }, &user)
        .await?;
    Ok(Json(invoices.map(InvoiceResponse::from)).into_response())
}

/// POST /api/invoices/:id/void
pub async fn void_invoice(
    State(state): State<InvoiceAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let invoice_id = parse_id::<InvoiceId>(&id, "invoice id")?;
    state
        .void_handler
        .handle(VoidInvoiceCommand { invoice_id }, &user)
        .await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
