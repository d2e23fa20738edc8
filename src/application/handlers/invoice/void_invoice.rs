//! VoidInvoiceHandler.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, InvoiceId};
use crate::ports::{InvoiceRepository, OrderRepository, StoreRepository};

#[derive(Debug, Clone)]
pub struct VoidInvoiceCommand {
    pub invoice_id: InvoiceId,
}

pub struct VoidInvoiceHandler {
    invoices: Arc<dyn InvoiceRepository>,
    orders: Arc<dyn OrderRepository>,
    stores: Arc<dyn StoreRepository>,
}

impl VoidInvoiceHandler {
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

    /// Only the invoiced store's side may void, and only while unpaid;
    /// the repository enforces the unpaid predicate.
    pub async fn handle(
        &self,
        cmd: VoidInvoiceCommand,
        actor: &AuthenticatedUser,
    ) -> Result<(), DomainError> {
        let invoice = self
            .invoices
            .find_by_id(&cmd.invoice_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Invoice", cmd.invoice_id))?;

        if !actor.is_admin() {
            let order = self
                .orders
                .find_by_id(&invoice.order_id)
                .await?
                .ok_or_else(|| DomainError::not_found("Order", invoice.order_id))?;
            let store = self
                .stores
                .find_by_id(&order.store_id)
                .await?
                .ok_or_else(|| DomainError::not_found("Store", order.store_id))?;
            if !actor.can_manage_store(&store.owner_id) {
                return Err(DomainError::forbidden("Cannot void this invoice"));
            }
        }

        self.invoices.void(&cmd.invoice_id).await
    }
}
