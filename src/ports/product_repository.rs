//! Product persistence port.

use async_trait::async_trait;

use crate::domain::catalog::Product;
use crate::domain::foundation::{DomainError, Page, PageQuery, ProductId, StoreId};

/// Persistent storage for catalog products.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn save(&self, product: &Product) -> Result<(), DomainError>;

    async fn update(&self, product: &Product) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, DomainError>;

    /// Batch lookup for checkout. Soft-deleted products are omitted, so
    /// callers must treat a missing id as unavailable.
    async fn find_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, DomainError>;

    async fn list_by_store(
        &self,
        store_id: &StoreId,
        page: &PageQuery,
    ) -> Result<Page<Product>, DomainError>;
}
