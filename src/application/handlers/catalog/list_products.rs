//! ListProductsHandler.

use std::sync::Arc;

use crate::domain::catalog::Product;
use crate::domain::foundation::{DomainError, Page, PageQuery, StoreId};
use crate::ports::{ProductRepository, StoreRepository};

#[derive(Debug, Clone)]
pub struct ListProductsQuery {
    pub store_id: StoreId,
    pub page: PageQuery,
}

pub struct ListProductsHandler {
    products: Arc<dyn ProductRepository>,
    stores: Arc<dyn StoreRepository>,
}

impl ListProductsHandler {
    pub fn new(products: Arc<dyn ProductRepository>, stores: Arc<dyn StoreRepository>) -> Self {
        Self { products, stores }
    }

    pub async fn handle(&self, query: ListProductsQuery) -> Result<Page<Product>, DomainError> {
        // A deleted store's catalog is gone with it.
        if self.stores.find_by_id(&query.store_id).await?.is_none() {
            return Err(DomainError::not_found("Store", query.store_id));
        }
        self.products.list_by_store(&query.store_id, &query.page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{MockProductRepository, MockStoreRepository};
    use crate::domain::foundation::{ErrorCode, Money, UserId};
    use crate::domain::store::Store;

    #[tokio::test]
    async fn lists_only_the_requested_store() {
        let store = Store::new(UserId::new(), "Acme", "acme").unwrap();
        let other = Store::new(UserId::new(), "Other", "other").unwrap();
        let stores = Arc::new(MockStoreRepository::new().with_store(store.clone()));
        let products = Arc::new(
            MockProductRepository::new()
                .with_product(
                    crate::domain::catalog::Product::new(
                        store.id,
                        "A",
                        "",
                        Money::from_cents(100),
                        1,
                    )
                    .unwrap(),
                )
                .with_product(
                    crate::domain::catalog::Product::new(
                        other.id,
                        "B",
                        "",
                        Money::from_cents(100),
                        1,
                    )
                    .unwrap(),
                ),
        );

        let page = ListProductsHandler::new(products, stores)
            .handle(ListProductsQuery {
                store_id: store.id,
                page: PageQuery::default(),
            })
            .await
            .unwrap();
        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn deleted_store_is_not_found() {
        let mut store = Store::new(UserId::new(), "Acme", "acme").unwrap();
        store.soft_delete();
        let stores = Arc::new(MockStoreRepository::new().with_store(store.clone()));
        let products = Arc::new(MockProductRepository::new());

        let err = ListProductsHandler::new(products, stores)
            .handle(ListProductsQuery {
                store_id: store.id,
                page: PageQuery::default(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
