//! CreateProductHandler.

use std::sync::Arc;

use crate::domain::catalog::Product;
use crate::domain::foundation::{AuthenticatedUser, DomainError, Money, StoreId};
use crate::ports::{ProductRepository, StoreRepository};

#[derive(Debug, Clone)]
pub struct CreateProductCommand {
    pub store_id: StoreId,
    pub name: String,
    pub description: String,
    pub price: Money,
    pub stock: i32,
}

pub struct CreateProductHandler {
    products: Arc<dyn ProductRepository>,
    stores: Arc<dyn StoreRepository>,
}

impl CreateProductHandler {
    pub fn new(products: Arc<dyn ProductRepository>, stores: Arc<dyn StoreRepository>) -> Self {
        Self { products, stores }
    }

    pub async fn handle(
        &self,
        cmd: CreateProductCommand,
        actor: &AuthenticatedUser,
    ) -> Result<Product, DomainError> {
        let store = self
            .stores
            .find_by_id(&cmd.store_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Store", cmd.store_id))?;

        if !actor.can_manage_store(&store.owner_id) {
            return Err(DomainError::forbidden("Cannot manage this store's catalog"));
        }

        let product = Product::new(cmd.store_id, cmd.name, cmd.description, cmd.price, cmd.stock)?;
        self.products.save(&product).await?;
        Ok(product)
    }
}
