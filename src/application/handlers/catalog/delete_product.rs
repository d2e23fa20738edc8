//! DeleteProductHandler - soft delete.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, ProductId};
use crate::ports::{ProductRepository, StoreRepository};

#[derive(Debug, Clone)]
pub struct DeleteProductCommand {
    pub product_id: ProductId,
}

pub struct DeleteProductHandler {
    products: Arc<dyn ProductRepository>,
    stores: Arc<dyn StoreRepository>,
}

impl DeleteProductHandler {
    pub fn new(products: Arc<dyn ProductRepository>, stores: Arc<dyn StoreRepository>) -> Self {
        Self { products, stores }
    }

    pub async fn handle(
        &self,
        cmd: DeleteProductCommand,
        actor: &AuthenticatedUser,
    ) -> Result<(), DomainError> {
        let mut product = self
            .products
            .find_by_id(&cmd.product_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Product", cmd.product_id))?;

        let store = self
            .stores
            .find_by_id(&product.store_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Store", product.store_id))?;

        if !actor.can_manage_store(&store.owner_id) {
            return Err(DomainError::forbidden("Cannot manage this store's catalog"));
        }

        product.soft_delete();
        self.products.update(&product).await?;
        Ok(())
    }
}
