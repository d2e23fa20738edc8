//! ListPaymentsHandler.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, InvoiceId};
use crate::domain::payment::Payment;
use crate::ports::{InvoiceRepository, OrderRepository, PaymentRepository, StoreRepository};

#[derive(Debug, Clone)]
pub struct ListPaymentsQuery {
    pub invoice_id: InvoiceId,
}

pub struct ListPaymentsHandler {
    payments: Arc<dyn PaymentRepository>,
    invoices: Arc<dyn InvoiceRepository>,
    orders: Arc<dyn OrderRepository>,
    stores: Arc<dyn StoreRepository>,
}

impl ListPaymentsHandler {
    pub fn new(
        payments: Arc<dyn PaymentRepository>,
        invoices: Arc<dyn InvoiceRepository>,
        orders: Arc<dyn OrderRepository>,
        stores: Arc<dyn StoreRepository>,
    ) -> Self {
        Self {
            payments,
            invoices,
            orders,
            stores,
        }
    }

    pub async fn handle(
        &self,
        query: ListPaymentsQuery,
        actor: &AuthenticatedUser,
    ) -> Result<Vec<Payment>, DomainError> {
        let invoice = self
            .invoices
            .find_by_id(&query.invoice_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Invoice", query.invoice_id))?;

        let allowed = if actor.is_admin() || actor.is_self(&invoice.customer_id) {
            true
        } else if let Some(order) = self.orders.find_by_id(&invoice.order_id).await? {
            match self.stores.find_by_id(&order.store_id).await? {
                Some(store) => actor.can_manage_store(&store.owner_id),
                None => false,
            }
        } else {
            false
        };

        if !allowed {
            return Err(DomainError::forbidden("Cannot view this invoice's payments"));
        }

        self.payments.list_for_invoice(&query.invoice_id).await
    }
}
