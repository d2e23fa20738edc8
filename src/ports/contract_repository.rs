//! Contract persistence port.

use async_trait::async_trait;

use crate::domain::contract::Contract;
use crate::domain::foundation::{ContractId, DomainError, Page, PageQuery, UserId};

/// Persistent storage for contracts.
#[async_trait]
pub trait ContractRepository: Send + Sync {
    async fn save(&self, contract: &Contract) -> Result<(), DomainError>;

    async fn update(&self, contract: &Contract) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &ContractId) -> Result<Option<Contract>, DomainError>;

    /// Contracts still open for bidding, for suppliers to browse.
    async fn list_open(&self, page: &PageQuery) -> Result<Page<Contract>, DomainError>;

    async fn list_by_owner(
        &self,
        owner_id: &UserId,
        page: &PageQuery,
    ) -> Result<Page<Contract>, DomainError>;

    /// Flips the paid flag, predicated on it being unset.
    async fn mark_paid(&self, id: &ContractId) -> Result<(), DomainError>;
}
