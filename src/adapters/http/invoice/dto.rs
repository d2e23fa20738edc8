//! HTTP DTOs for invoice endpoints.

use serde::Serialize;

use crate::domain::foundation::Timestamp;
use crate::domain::invoice::{Invoice, InvoiceStatus};

#[derive(Debug, Clone, Serialize)]
pub struct InvoiceResponse {
    pub id: String,
    pub order_id: String,
    pub customer_id: String,
    pub number: String,
    pub amount_due_cents: i64,
    pub amount_paid_cents: i64,
    pub outstanding_cents: i64,
    pub status: InvoiceStatus,
    pub issued_at: Timestamp,
    pub due_at: Timestamp,
}

impl From<Invoice> for InvoiceResponse {
    fn from(invoice: Invoice) -> Self {
        Self {
            id: invoice.id.to_string(),
            order_id: invoice.order_id.to_string(),
            customer_id: invoice.customer_id.to_string(),
            number: invoice.number.clone(),
            amount_due_cents: invoice.amount_due.cents(),
            amount_paid_cents: invoice.amount_paid.cents(),
            outstanding_cents: invoice.outstanding().cents(),
            status: invoice.status,
            issued_at: invoice.issued_at,
            due_at: invoice.due_at,
        }
    }
}
