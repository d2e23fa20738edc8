//! Axum router configuration for payment endpoints.

use axum::{routing::get, Router};

use super::handlers::{list_payments, record_payment, PaymentAppState};

/// Payment routes, mounted at `/api/payments`. All require
/// authentication.
///
/// - `POST /` - Record a payment against an invoice
/// - `GET /?invoice_id=...` - List an invoice's payments
pub fn payment_routes() -> Router<PaymentAppState> {
    Router::new().route("/", get(list_payments).post(record_payment))
}
