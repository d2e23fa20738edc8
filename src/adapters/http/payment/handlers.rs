//! HTTP handlers for payment endpoints.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::identity::handlers::parse_id;
use crate::adapters::http::invoice::dto::InvoiceResponse;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::payment::{
    ListPaymentsHandler, ListPaymentsQuery, RecordPaymentCommand, RecordPaymentHandler,
};
use crate::domain::foundation::{InvoiceId, Money};

use super::dto::{ListPaymentsParams, PaymentResponse, RecordPaymentRequest};

#[derive(Clone)]
pub struct PaymentAppState {
    pub record_handler: Arc<RecordPaymentHandler>,
    pub list_handler: Arc<ListPaymentsHandler>,
}

/// Returned from recording: the payment and the invoice's new state.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RecordPaymentResponse {
    pub payment: PaymentResponse,
    pub invoice: InvoiceResponse,
}

/// POST /api/payments
pub async fn record_payment(
    State(state): State<PaymentAppState>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<RecordPaymentRequest>,
) -> Result<Response, ApiError> {
    let invoice_id = parse_id::<InvoiceId>(&req.invoice_id, "invoice id")?;
    let result = state
        .record_handler
        .handle(
            RecordPaymentCommand {
                invoice_id,
                amount: Money::from_cents(req.amount_cents),
                method: req.method,
                reference: req.reference,
            },
            &user,
        )
        .await?;

    let response = RecordPaymentResponse {
        payment: result.payment.into(),
        invoice: result.invoice.into(),
    };
    Ok((StatusCode::CREATED, Json(response)).into_response())
}

/// GET /api/payments?invoice_id=...
pub async fn list_payments(
    State(state): State<PaymentAppState>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<ListPaymentsParams>,
) -> Result<Response, ApiError> {
    let invoice_id = parse_id::<InvoiceId>(&params.invoice_id, "invoice id")?;
    let payments = state
        .list_handler
        .handle(ListPaymentsQuery { invoice_id }, &user)
        .await?;
    let payments: Vec<PaymentResponse> = payments.into_iter().map(PaymentResponse::from).collect();
    Ok(Json(payments).into_response())
}
