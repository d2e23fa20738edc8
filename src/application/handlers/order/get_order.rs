//! GetOrderHandler - order with lines, visibility-scoped.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, OrderId};
use crate::domain::order::{Order, OrderLine};
use crate::ports::{OrderRepository, StoreRepository};

#[derive(Debug, Clone)]
pub struct GetOrderQuery {
    pub order_id: OrderId,
}

/// An order and its lines.
#[derive(Debug, Clone)]
pub struct OrderDetails {
    pub order: Order,
    pub lines: Vec<OrderLine>,
}

pub struct GetOrderHandler {
    orders: Arc<dyn OrderRepository>,
    stores: Arc<dyn StoreRepository>,
}

impl GetOrderHandler {
    pub fn new(orders: Arc<dyn OrderRepository>, stores: Arc<dyn StoreRepository>) -> Self {
        Self { orders, stores }
    }

    /// Customers see their own orders, store owners their store's, and
    /// admins everything.
    pub async fn handle(
        &self,
        query: GetOrderQuery,
        actor: &AuthenticatedUser,
    ) -> Result<Option<OrderDetails>, DomainError> {
        let Some(order) = self.orders.find_by_id(&query.order_id).await? else {
            return Ok(None);
        };

        if !self.can_view(&order, actor).await? {
            return Err(DomainError::forbidden("Cannot view this order"));
        }

        let lines = self.orders.find_lines(&order.id).await?;
        Ok(Some(OrderDetails { order, lines }))
    }

    async fn can_view(&self, order: &Order, actor: &AuthenticatedUser) -> Result<bool, DomainError> {
        if actor.is_admin() || actor.is_self(&order.customer_id) {
            return Ok(true);
        }
        match self.stores.find_by_id(&order.store_id).await? {
            Some(store) => Ok(actor.can_manage_store(&store.owner_id)),
            None => Ok(false),
        }
    }
}
