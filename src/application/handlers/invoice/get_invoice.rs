//! GetInvoiceHandler.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, InvoiceId};
use crate::domain::invoice::Invoice;
use crate::ports::{InvoiceRepository, OrderRepository, StoreRepository};

#[derive(Debug, Clone)]
pub struct GetInvoiceQuery {
    pub invoice_id: InvoiceId,
}

pub struct GetInvoiceHandler {
    invoices: Arc<dyn InvoiceRepository>,
    orders: Arc<dyn OrderRepository>,
    stores: Arc<dyn StoreRepository>,
}

impl GetInvoiceHandler {
    pub fn new(
        invoices: Arc<dyn InvoiceRepository>,
        orders: Arc<dyn OrderRepository>,
        stores: Arc<dyn StoreRepository>,
    ) -> Self {
        Self {
            invoices,
            orders,
            stores,
        }
    }

    /// The paying customer, the invoiced store's owner, and admins may
    /// view an invoice.
    pub async fn handle(
        &self,
        query: GetInvoiceQuery,
        actor: &AuthenticatedUser,
    ) -> Result<Option<Invoice>, DomainError> {
        let Some(invoice) = self.invoices.find_by_id(&query.invoice_id).await? else {
            return Ok(None);
        };

        if actor.is_admin() || actor.is_self(&invoice.customer_id) {
            return Ok(Some(invoice));
        }

        if let Some(order) = self.orders.find_by_id(&invoice.order_id).await? {
            if let Some(store) = self.stores.find_by_id(&order.store_id).await? {
                if actor.can_manage_store(&store.owner_id) {
                    return Ok(Some(invoice));
                }
            }
        }

        Err(DomainError::forbidden("Cannot view this invoice"))
    }
}
