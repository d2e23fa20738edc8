//! Invoice persistence port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, InvoiceId, OrderId, Page, PageQuery, StoreId, UserId};
use crate::domain::invoice::Invoice;

/// Persistent storage for invoices.
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    async fn find_by_id(&self, id: &InvoiceId) -> Result<Option<Invoice>, DomainError>;

    /// The invoice issued at checkout for an order.
    async fn find_by_order(&self, order_id: &OrderId) -> Result<Option<Invoice>, DomainError>;

    async fn list_by_customer(
        &self,
        customer_id: &UserId,
        page: &PageQuery,
    ) -> Result<Page<Invoice>, DomainError>;

    async fn list_by_store(
        &self,
        store_id: &StoreId,
        page: &PageQuery,
    ) -> Result<Page<Invoice>, DomainError>;

    /// Voids an invoice, predicated on it having no recorded payments.
    async fn void(&self, id: &InvoiceId) -> Result<(), DomainError>;

    /// Allocates the next invoice number for a store. Numbers are unique
    /// and monotonic per store; gaps from abandoned checkouts are fine.
    async fn next_invoice_number(&self, store_id: &StoreId) -> Result<String, DomainError>;
}
