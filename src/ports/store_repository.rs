//! Store persistence port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Page, PageQuery, StoreId};
use crate::domain::store::Store;

/// Persistent storage for stores.
#[async_trait]
pub trait StoreRepository: Send + Sync {
    /// Inserts a new store. Fails with a conflict on duplicate slug.
    async fn save(&self, store: &Store) -> Result<(), DomainError>;

    async fn update(&self, store: &Store) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &StoreId) -> Result<Option<Store>, DomainError>;

    async fn list(&self, page: &PageQuery) -> Result<Page<Store>, DomainError>;
}
