//! UpdateOrderStatusHandler - fulfilment transitions.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, OrderId};
use crate::domain::order::OrderStatus;
use crate::ports::{OrderRepository, StoreRepository};

#[derive(Debug, Clone)]
pub struct UpdateOrderStatusCommand {
    pub order_id: OrderId,
    pub status: OrderStatus,
}

pub struct UpdateOrderStatusHandler {
    orders: Arc<dyn OrderRepository>,
    stores: Arc<dyn StoreRepository>,
}

impl UpdateOrderStatusHandler {
    pub fn new(orders: Arc<dyn OrderRepository>, stores: Arc<dyn StoreRepository>) -> Self {
        Self { orders, stores }
    }

    pub async fn handle(
        &self,
        cmd: UpdateOrderStatusCommand,
        actor: &AuthenticatedUser,
    ) -> Result<(), DomainError> {
        let order = self
            .orders
            .find_by_id(&cmd.order_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Order", cmd.order_id))?;

        let store = self
            .stores
            .find_by_id(&order.store_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Store", order.store_id))?;

        if !actor.can_manage_store(&store.owner_id) {
            return Err(DomainError::forbidden("Cannot manage this store's orders"));
        }

        if !order.status.can_become(cmd.status) {
            return Err(DomainError::invalid_transition(order.status, cmd.status));
        }

        // The repository predicates on the status read above; a racing
        // update turns into a conflict rather than a lost write.
        self.orders
            .update_status(&cmd.order_id, order.status, cmd.status)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{MockOrderRepository, MockStoreRepository};
    use crate::domain::foundation::{ErrorCode, Money, Role, UserId};
    use crate::domain::order::Order;
    use crate::domain::store::Store;

    fn setup() -> (Order, Store, Arc<MockOrderRepository>, UpdateOrderStatusHandler) {
        let store = Store::new(UserId::new(), "Acme", "acme").unwrap();
        let order = Order::new(store.id, UserId::new(), Money::from_cents(100));
        let orders = Arc::new(MockOrderRepository::new().with_order(order.clone()));
        let handler = UpdateOrderStatusHandler::new(
            orders.clone(),
            Arc::new(MockStoreRepository::new().with_store(store.clone())),
        );
        (order, store, orders, handler)
    }

    #[tokio::test]
    async fn owner_moves_pending_to_processing() {
        let (order, store, orders, handler) = setup();
        let actor = AuthenticatedUser::new(store.owner_id, "o@example.com", Role::Owner, None);

        handler
            .handle(
                UpdateOrderStatusCommand { order_id: order.id, status: OrderStatus::Processing },
                &actor,
            )
            .await
            .unwrap();
        assert_eq!(orders.saved_orders()[0].status, OrderStatus::Processing);
    }

    #[tokio::test]
    async fn status_regression_is_rejected() {
        let (order, store, _, handler) = setup();
        let actor = AuthenticatedUser::new(store.owner_id, "o@example.com", Role::Owner, None);

        let err = handler
            .handle(
                UpdateOrderStatusCommand { order_id: order.id, status: OrderStatus::Delivered },
                &actor,
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidStateTransition);
    }

    #[tokio::test]
    async fn customer_cannot_update_status() {
        let (order, _, _, handler) = setup();
        let actor =
            AuthenticatedUser::new(order.customer_id, "c@example.com", Role::Customer, None);

        let err = handler
            .handle(
                UpdateOrderStatusCommand { order_id: order.id, status: OrderStatus::Processing },
                &actor,
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }
}
