//! Order persistence port, including the atomic checkout write.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, OrderId, Page, PageQuery, StoreId, UserId};
use crate::domain::invoice::Invoice;
use crate::domain::order::{Order, OrderLine, OrderStatus};

/// Persistent storage for orders and their lines.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persists the whole checkout in one transaction: the order, its
    /// lines, the stock decrements, and the invoice. Fails with a
    /// conflict (and writes nothing) if any product lacks stock.
    async fn create_checkout(
        &self,
        order: &Order,
        lines: &[OrderLine],
        invoice: &Invoice,
    ) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, DomainError>;

    async fn find_lines(&self, order_id: &OrderId) -> Result<Vec<OrderLine>, DomainError>;

    async fn list_by_customer(
        &self,
        customer_id: &UserId,
        page: &PageQuery,
    ) -> Result<Page<Order>, DomainError>;

    async fn list_by_store(
        &self,
        store_id: &StoreId,
        page: &PageQuery,
    ) -> Result<Page<Order>, DomainError>;

    /// Moves an order from `from` to `to`, predicated on the current
    /// status so a concurrent conflicting update affects zero rows and
    /// surfaces as a conflict.
    async fn update_status(
        &self,
        id: &OrderId,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<(), DomainError>;
}
