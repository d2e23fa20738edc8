//! UpdateProductHandler.

use std::sync::Arc;

use crate::domain::catalog::Product;
use crate::domain::foundation::{AuthenticatedUser, DomainError, Money, ProductId, Timestamp};
use crate::ports::{ProductRepository, StoreRepository};

/// Absent fields are unchanged.
#[derive(Debug, Clone)]
pub struct UpdateProductCommand {
    pub product_id: ProductId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Money>,
    pub stock: Option<i32>,
}

pub struct UpdateProductHandler {
    products: Arc<dyn ProductRepository>,
    stores: Arc<dyn StoreRepository>,
}

impl UpdateProductHandler {
    pub fn new(products: Arc<dyn ProductRepository>, stores: Arc<dyn StoreRepository>) -> Self {
        Self { products, stores }
    }

    pub async fn handle(
        &self,
        cmd: UpdateProductCommand,
        actor: &AuthenticatedUser,
    ) -> Result<Product, DomainError> {
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

        if let Some(name) = cmd.name {
            if name.trim().is_empty() {
                return Err(DomainError::validation("name", "Product name cannot be empty"));
            }
            product.name = name;
        }
        if let Some(description) = cmd.description {
            product.description = description;
        }
        if let Some(price) = cmd.price {
            if price.cents() < 0 {
                return Err(DomainError::validation("price", "Price cannot be negative"));
            }
            product.price = price;
        }
        if let Some(stock) = cmd.stock {
            if stock < 0 {
                return Err(DomainError::validation("stock", "Stock cannot be negative"));
            }
            product.stock = stock;
        }

        product.updated_at = Timestamp::now();
        self.products.update(&product).await?;
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{MockProductRepository, MockStoreRepository};
    use crate::domain::foundation::{Role, UserId};
    use crate::domain::store::Store;

    #[tokio::test]
    async fn owner_updates_price_and_stock() {
        let owner_id = UserId::new();
        let store = Store::new(owner_id, "Acme", "acme").unwrap();
        let product =
            Product::new(store.id, "Widget", "", Money::from_cents(100), 5).unwrap();
        let stores = Arc::new(MockStoreRepository::new().with_store(store));
        let products = Arc::new(MockProductRepository::new().with_product(product.clone()));
        let actor = AuthenticatedUser::new(owner_id, "o@example.com", Role::Owner, None);

        let updated = UpdateProductHandler::new(products, stores)
            .handle(
                UpdateProductCommand {
                    product_id: product.id,
                    name: None,
                    description: None,
                    price: Some(Money::from_cents(250)),
                    stock: Some(7),
                },
                &actor,
            )
            .await
            .unwrap();
        assert_eq!(updated.price, Money::from_cents(250));
        assert_eq!(updated.stock, 7);
        assert_eq!(updated.name, "Widget");
    }
}
