//! Payment persistence port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, InvoiceId, Money};
use crate::domain::invoice::Invoice;
use crate::domain::payment::Payment;

/// Persistent storage for payments.
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Inserts the payment and applies it to the invoice in one
    /// transaction. The invoice update is predicated on
    /// `expected_paid_before` so two concurrent payments cannot both
    /// apply against the same balance; the loser gets a conflict.
    async fn record_and_apply(
        &self,
        payment: &Payment,
        invoice: &Invoice,
        expected_paid_before: Money,
    ) -> Result<(), DomainError>;

    async fn list_for_invoice(&self, invoice_id: &InvoiceId) -> Result<Vec<Payment>, DomainError>;
}
