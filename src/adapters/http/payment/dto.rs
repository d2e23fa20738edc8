//! HTTP DTOs for payment endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;
use crate::domain::payment::{Payment, PaymentMethod};

#[derive(Debug, Clone, Deserialize)]
pub struct RecordPaymentRequest {
    pub invoice_id: String,
    /// Amount in cents.
    pub amount_cents: i64,
    pub method: PaymentMethod,
    pub reference: Option<String>,
}

/// Query parameters for the payment listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ListPaymentsParams {
    pub invoice_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentResponse {
    pub id: String,
    pub invoice_id: String,
    pub payer_id: String,
    pub amount_cents: i64,
    pub method: PaymentMethod,
    pub reference: Option<String>,
    pub created_at: Timestamp,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id.to_string(),
            invoice_id: payment.invoice_id.to_string(),
            payer_id: payment.payer_id.to_string(),
            amount_cents: payment.amount.cents(),
            method: payment.method,
            reference: payment.reference,
            created_at: payment.created_at,
        }
    }
}
