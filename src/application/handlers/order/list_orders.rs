//! ListOrdersHandler - customer and store order listings.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, Page, PageQuery, StoreId};
use crate::domain::order::Order;
use crate::ports::{OrderRepository, StoreRepository};

#[derive(Debug, Clone, Default)]
pub struct ListMyOrdersQuery {
    pub page: PageQuery,
}

#[derive(Debug, Clone)]
pub struct ListStoreOrdersQuery {
    pub store_id: StoreId,
    pub page: PageQuery,
}

pub struct ListOrdersHandler {
    orders: Arc<dyn OrderRepository>,
    stores: Arc<dyn StoreRepository>,
}

impl ListOrdersHandler {
    pub fn new(orders: Arc<dyn OrderRepository>, stores: Arc<dyn StoreRepository>) -> Self {
        Self { orders, stores }
    }

    pub async fn handle_mine(
        &self,
        query: ListMyOrdersQuery,
        actor: &AuthenticatedUser,
    ) -> Result<Page<Order>, DomainError> {
        self.orders.list_by_customer(&actor.id, &query.page).await
    }

    pub async fn handle_store(
        &self,
        query: ListStoreOrdersQuery,
        actor: &AuthenticatedUser,
    ) -> Result<Page<Order>, DomainError> {
        let store = self
            .stores
            .find_by_id(&query.store_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Store", query.store_id))?;

        if !actor.can_manage_store(&store.owner_id) {
            return Err(DomainError::forbidden("Cannot view this store's orders"));
        }

        self.orders.list_by_store(&query.store_id, &query.page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{MockOrderRepository, MockStoreRepository};
    use crate::domain::foundation::{ErrorCode, Money, Role, UserId};
    use crate::domain::store::Store;

    #[tokio::test]
    async fn customer_sees_only_their_orders() {
        let customer_id = UserId::new();
        let orders = Arc::new(
            MockOrderRepository::new()
                .with_order(Order::new(StoreId::new(), customer_id, Money::from_cents(1)))
                .with_order(Order::new(StoreId::new(), UserId::new(), Money::from_cents(2))),
        );
        let handler = ListOrdersHandler::new(orders, Arc::new(MockStoreRepository::new()));
        let actor = AuthenticatedUser::new(customer_id, "c@example.com", Role::Customer, None);

        let page = handler.handle_mine(ListMyOrdersQuery::default(), &actor).await.unwrap();
        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn stranger_cannot_list_store_orders() {
        let store = Store::new(UserId::new(), "Acme", "acme").unwrap();
        let handler = ListOrdersHandler::new(
            Arc::new(MockOrderRepository::new()),
            Arc::new(MockStoreRepository::new().with_store(store.clone())),
        );
        let actor = AuthenticatedUser::new(UserId::new(), "x@example.com", Role::Owner, None);

        let err = handler
            .handle_store(
                ListStoreOrdersQuery { store_id: store.id, page: PageQuery::default() },
                &actor,
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }
}
