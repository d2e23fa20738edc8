//! DeleteStoreHandler - soft delete.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, StoreId};
use crate::ports::StoreRepository;

#[derive(Debug, Clone)]
pub struct DeleteStoreCommand {
    pub store_id: StoreId,
}

pub struct DeleteStoreHandler {
    stores: Arc<dyn StoreRepository>,
}

impl DeleteStoreHandler {
    pub fn new(stores: Arc<dyn StoreRepository>) -> Self {
        Self { stores }
    }

    pub async fn handle(
        &self,
        cmd: DeleteStoreCommand,
        actor: &AuthenticatedUser,
    ) -> Result<(), DomainError> {
        let mut store = self
            .stores
            .find_by_id(&cmd.store_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Store", cmd.store_id))?;

        if !actor.can_manage_store(&store.owner_id) {
            return Err(DomainError::forbidden("Cannot manage this store"));
        }

        store.soft_delete();
        self.stores.update(&store).await?;

        tracing::info!(store_id = %store.id, "soft-deleted store");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::MockStoreRepository;
    use crate::domain::foundation::{Role, UserId};
    use crate::domain::store::Store;
    use crate::ports::StoreRepository as _;

    #[tokio::test]
    async fn deleted_store_disappears_from_lookups() {
        let owner_id = UserId::new();
        let store = Store::new(owner_id, "Acme", "acme").unwrap();
        let stores = Arc::new(MockStoreRepository::new().with_store(store.clone()));
        let actor = AuthenticatedUser::new(owner_id, "o@example.com", Role::Owner, None);

        DeleteStoreHandler::new(stores.clone())
            .handle(DeleteStoreCommand { store_id: store.id }, &actor)
            .await
            .unwrap();

        assert!(stores.find_by_id(&store.id).await.unwrap().is_none());
    }
}
