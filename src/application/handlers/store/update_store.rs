//! UpdateStoreHandler.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, StoreId, Timestamp};
use crate::domain::store::Store;
use crate::ports::StoreRepository;

#[derive(Debug, Clone)]
pub struct UpdateStoreCommand {
    pub store_id: StoreId,
    pub name: Option<String>,
}

pub struct UpdateStoreHandler {
    stores: Arc<dyn StoreRepository>,
}

impl UpdateStoreHandler {
    pub fn new(stores: Arc<dyn StoreRepository>) -> Self {
        Self { stores }
    }

    pub async fn handle(
        &self,
        cmd: UpdateStoreCommand,
        actor: &AuthenticatedUser,
    ) -> Result<Store, DomainError> {
        let mut store = self
            .stores
            .find_by_id(&cmd.store_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Store", cmd.store_id))?;

        if !actor.can_manage_store(&store.owner_id) {
            return Err(DomainError::forbidden("Cannot manage this store"));
        }

        if let Some(name) = cmd.name {
            store.rename(name)?;
        }
        store.updated_at = Timestamp::now();
        self.stores.update(&store).await?;
        Ok(store)
    }
}
