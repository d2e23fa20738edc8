//! CancelOrderHandler.
//!
//! Customers may cancel while the order is still pending; the store
//! side may also cancel during processing. Cancelling voids the
//! checkout invoice, so an order with recorded payments cannot be
//! cancelled here.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, Money, OrderId};
use crate::domain::order::OrderStatus;
use crate::ports::{InvoiceRepository, OrderRepository, StoreRepository};

#[derive(Debug, Clone)]
pub struct CancelOrderCommand {
    pub order_id: OrderId,
}

pub struct CancelOrderHandler {
    orders: Arc<dyn OrderRepository>,
    stores: Arc<dyn StoreRepository>,
    invoices: Arc<dyn InvoiceRepository>,
}

impl CancelOrderHandler {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        stores: Arc<dyn StoreRepository>,
        invoices: Arc<dyn InvoiceRepository>,
    ) -> Self {
        Self {
            orders,
            stores,
            invoices,
        }
    }

    pub async fn handle(
        &self,
        cmd: CancelOrderCommand,
        actor: &AuthenticatedUser,
    ) -> Result<(), DomainError> {
        let order = self
            .orders
            .find_by_id(&cmd.order_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Order", cmd.order_id))?;

        let is_customer = actor.is_self(&order.customer_id);
        let is_store_side = match self.stores.find_by_id(&order.store_id).await? {
            Some(store) => actor.can_manage_store(&store.owner_id),
            None => actor.is_admin(),
        };

        if !is_customer && !is_store_side {
            return Err(DomainError::forbidden("Cannot cancel this order"));
        }

        // Customers only before fulfilment starts.
        if is_customer && !is_store_side && order.status != OrderStatus::Pending {
            return Err(DomainError::conflict(
                "Order is already being processed; contact the store to cancel",
            ));
        }

        if !order.status.can_become(OrderStatus::Cancelled) {
            return Err(DomainError::invalid_transition(order.status, OrderStatus::Cancelled));
        }

        if let Some(invoice) = self.invoices.find_by_order(&order.id).await? {
            if invoice.amount_paid > Money::ZERO {
                return Err(DomainError::conflict(
                    "Order has recorded payments and cannot be cancelled",
                ));
            }
            self.invoices.void(&invoice.id).await?;
        }

        self.orders
            .update_status(&cmd.order_id, order.status, OrderStatus::Cancelled)
            .await?;

        tracing::info!(order_id = %order.id, "order cancelled");
        Ok(())
    }
}
