//! GetStoreHandler.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, StoreId};
use crate::domain::store::Store;
use crate::ports::StoreRepository;

/// Stores are public; no authorization needed to view one.
#[derive(Debug, Clone)]
pub struct GetStoreQuery {
    pub store_id: StoreId,
}

pub struct GetStoreHandler {
    stores: Arc<dyn StoreRepository>,
}

impl GetStoreHandler {
    pub fn new(stores: Arc<dyn StoreRepository>) -> Self {
        Self { stores }
    }

    pub async fn handle(&self, query: GetStoreQuery) -> Result<Option<Store>, DomainError> {
        self.stores.find_by_id(&query.store_id).await
    }
}
