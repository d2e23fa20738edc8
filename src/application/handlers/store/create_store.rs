//! CreateStoreHandler.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, Role};
use crate::domain::store::Store;
use crate::ports::StoreRepository;

#[derive(Debug, Clone)]
pub struct CreateStoreCommand {
    pub name: String,
    pub slug: String,
}

pub struct CreateStoreHandler {
    stores: Arc<dyn StoreRepository>,
}

impl CreateStoreHandler {
    pub fn new(stores: Arc<dyn StoreRepository>) -> Self {
        Self { stores }
    }

    pub async fn handle(
        &self,
        cmd: CreateStoreCommand,
        actor: &AuthenticatedUser,
    ) -> Result<Store, DomainError> {
        if !matches!(actor.role, Role::Owner | Role::Admin) {
            return Err(DomainError::forbidden("Only owners can create stores"));
        }

        let store = Store::new(actor.id, cmd.name, cmd.slug)?;
        self.stores.save(&store).await?;

        tracing::info!(store_id = %store.id, slug = %store.slug, "created store");
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::MockStoreRepository;
    use crate::domain::foundation::{ErrorCode, UserId};

    fn owner() -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new(), "o@example.com", Role::Owner, None)
    }

    #[tokio::test]
    async fn owner_creates_store() {
        let stores = Arc::new(MockStoreRepository::new());
        let store = CreateStoreHandler::new(stores.clone())
            .handle(
                CreateStoreCommand {
                    name: "Acme".to_string(),
                    slug: "acme".to_string(),
                },
                &owner(),
            )
            .await
            .unwrap();
        assert_eq!(store.slug, "acme");
        assert_eq!(stores.stores.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn customer_cannot_create_store() {
        let stores = Arc::new(MockStoreRepository::new());
        let customer = AuthenticatedUser::new(UserId::new(), "c@example.com", Role::Customer, None);

        let err = CreateStoreHandler::new(stores)
            .handle(
                CreateStoreCommand {
                    name: "Acme".to_string(),
                    slug: "acme".to_string(),
                },
                &customer,
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn duplicate_slug_conflicts() {
        let stores = Arc::new(MockStoreRepository::new());
        let handler = CreateStoreHandler::new(stores);
        let cmd = CreateStoreCommand {
            name: "Acme".to_string(),
            slug: "acme".to_string(),
        };

        handler.handle(cmd.clone(), &owner()).await.unwrap();
        let err = handler.handle(cmd, &owner()).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::Conflict);
    }
}
