//! Product catalog entities.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, Money, ProductId, StoreId, Timestamp};

/// A sellable product, scoped to one store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub store_id: StoreId,
    pub name: String,
    pub description: String,
    pub price: Money,
    pub stock: i32,
    pub deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Product {
    pub fn new(
        store_id: StoreId,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Money,
        stock: i32,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name", "Product name cannot be empty"));
        }
        if price.cents() < 0 {
            return Err(DomainError::validation("price", "Price cannot be negative"));
        }
        if stock < 0 {
            return Err(DomainError::validation("stock", "Stock cannot be negative"));
        }
        let now = Timestamp::now();
        Ok(Self {
            id: ProductId::new(),
            store_id,
            name,
            description: description.into(),
            price,
            stock,
            deleted: false,
            created_at: now,
            updated_at: now,
        })
    }

    /// True when `quantity` units can be sold right now.
    pub fn has_stock(&self, quantity: i32) -> bool {
        !self.deleted && self.stock >= quantity
    }

    pub fn soft_delete(&mut self) {
        self.deleted = true;
        self.updated_at = Timestamp::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(stock: i32) -> Product {
        Product::new(StoreId::new(), "Widget", "", Money::from_cents(500), stock).unwrap()
    }

    #[test]
    fn rejects_negative_price() {
        let result = Product::new(StoreId::new(), "Widget", "", Money::from_cents(-1), 1);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_negative_stock() {
        let result = Product::new(StoreId::new(), "Widget", "", Money::ZERO, -5);
        assert!(result.is_err());
    }

    #[test]
    fn has_stock_checks_quantity() {
        let p = product(3);
        assert!(p.has_stock(3));
        assert!(!p.has_stock(4));
    }

    #[test]
    fn deleted_product_has_no_stock() {
        let mut p = product(10);
        p.soft_delete();
        assert!(!p.has_stock(1));
    }
}
