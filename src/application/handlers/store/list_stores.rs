//! ListStoresHandler.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Page, PageQuery};
use crate::domain::store::Store;
use crate::ports::StoreRepository;

#[derive(Debug, Clone, Default)]
pub struct ListStoresQuery {
    pub page: PageQuery,
}

pub struct ListStoresHandler {
    stores: Arc<dyn StoreRepository>,
}

impl ListStoresHandler {
    pub fn new(stores: Arc<dyn StoreRepository>) -> Self {
        Self { stores }
    }

    pub async fn handle(&self, query: ListStoresQuery) -> Result<Page<Store>, DomainError> {
        self.stores.list(&query.page).await
    }
}
